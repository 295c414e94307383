use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let raw_addr =
            std::env::var("TS_LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let listen_addr: SocketAddr = raw_addr
            .parse()
            .with_context(|| format!("Invalid TS_LISTEN_ADDR '{}'", raw_addr))?;
        let db_path =
            std::env::var("TS_DB_PATH").unwrap_or_else(|_| "./db/transfers.db".into());
        let cors_allow = std::env::var("TS_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let raw_timeout =
            std::env::var("TS_REQUEST_TIMEOUT_MS").unwrap_or_else(|_| "30000".into());
        let timeout_ms: u64 = raw_timeout
            .parse()
            .with_context(|| format!("Invalid TS_REQUEST_TIMEOUT_MS '{}'", raw_timeout))?;
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
