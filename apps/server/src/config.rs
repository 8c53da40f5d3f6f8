//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. Missing values never abort startup: the service token defaults
//! to empty, which denies every authentication-endpoint request at request
//! time (fail closed, not fail fast).

use serde::{Deserialize, Serialize};
use std::env;

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Path to the persisted session file (one serialized current-user
    /// record: id, username, role)
    pub session_file: String,

    /// Static bearer credential required by the authentication endpoint.
    /// Empty means every bearer check fails.
    pub service_token: String,

    /// Password used when bootstrapping the default admin account
    pub admin_password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            http_port: env::var("ELEGANTE_HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("ELEGANTE_HTTP_PORT".to_string()))?,

            database_path: env::var("ELEGANTE_DATABASE_PATH")
                .unwrap_or_else(|_| "./data/elegante.db".to_string()),

            session_file: env::var("ELEGANTE_SESSION_FILE")
                .unwrap_or_else(|_| "./data/session.json".to_string()),

            service_token: env::var("ELEGANTE_SERVICE_TOKEN").unwrap_or_default(),

            admin_password: env::var("ELEGANTE_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_string()),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
