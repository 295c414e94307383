use std::sync::Arc;

use crate::config::Config;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};
use transfer_scheduler_core::{
    fees::FeePolicy,
    transfers::{TransferService, TransferServiceTrait},
    utils::time_utils::SystemClock,
};
use transfer_scheduler_storage_sqlite::{
    db::{self, write_actor},
    transfers::TransferRepository,
};

pub struct AppState {
    pub transfer_service: Arc<dyn TransferServiceTrait + Send + Sync>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("TS_LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("text") {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    } else {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let transfer_repository = Arc::new(TransferRepository::new(pool.clone(), writer.clone()));
    let fee_policy = Arc::new(FeePolicy::standard());
    for rule in fee_policy.rule_descriptions() {
        tracing::debug!("Fee rule loaded: {}", rule);
    }

    let transfer_service: Arc<dyn TransferServiceTrait + Send + Sync> = Arc::new(
        TransferService::new(transfer_repository, fee_policy, Arc::new(SystemClock)),
    );

    Ok(Arc::new(AppState {
        transfer_service,
        db_path,
    }))
}
