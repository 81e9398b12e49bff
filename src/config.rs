//! Environment configuration.

use std::time::Duration;

/// Runtime settings, loaded once at startup. `DATABASE_URL` is optional: with
/// no database the service runs fully in memory.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub price_base_url: String,
    pub price_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let database_url = std::env::var("DATABASE_URL").ok();
        let db_max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        let price_base_url = std::env::var("PRICE_SOURCE_URL")
            .unwrap_or_else(|_| "http://localhost:8081".to_string());
        let price_timeout_secs = std::env::var("PRICE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);
        Self {
            bind_addr,
            database_url,
            db_max_connections,
            price_base_url,
            price_timeout: Duration::from_secs(price_timeout_secs),
        }
    }
}
