use std::{path::Path, sync::Arc};

use crate::main_lib::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Router};

async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the database file is in place.
async fn readyz(State(state): State<Arc<AppState>>) -> (StatusCode, &'static str) {
    if Path::new(&state.db_path).exists() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
