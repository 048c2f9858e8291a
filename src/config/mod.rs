//! Configuration module for the TagHub backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// MongoDB connection string
    pub mongo_uri: String,
    /// MongoDB database name
    pub db_name: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("TAGHUB_API_PSK").ok();

        let mongo_uri = env::var("TAGHUB_MONGO_URI")
            .unwrap_or_else(|_| "mongodb://127.0.0.1:27017".to_string());

        let db_name = env::var("TAGHUB_DB_NAME").unwrap_or_else(|_| "taghub".to_string());

        let bind_addr = env::var("TAGHUB_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid TAGHUB_BIND_ADDR format");

        let log_level = env::var("TAGHUB_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_psk,
            mongo_uri,
            db_name,
            bind_addr,
            log_level,
        }
    }
}
