//! Detect API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;

use cardlink_core::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

/// Detect API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP server port
    pub http_port: u16,

    /// Bind address
    pub bind_addr: String,

    /// Fallback viewport width for requests that supply no dimensions
    pub default_viewport_width: f64,

    /// Fallback viewport height for requests that supply no dimensions
    pub default_viewport_height: f64,

    /// Maximum accepted request body size in bytes
    pub max_body_bytes: usize,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ApiConfig {
            http_port: env::var("HTTP_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("HTTP_PORT".to_string()))?,

            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),

            default_viewport_width: env::var("DEFAULT_VIEWPORT_WIDTH")
                .unwrap_or_else(|_| DEFAULT_VIEWPORT_WIDTH.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DEFAULT_VIEWPORT_WIDTH".to_string()))?,

            default_viewport_height: env::var("DEFAULT_VIEWPORT_HEIGHT")
                .unwrap_or_else(|_| DEFAULT_VIEWPORT_HEIGHT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DEFAULT_VIEWPORT_HEIGHT".to_string()))?,

            max_body_bytes: env::var("MAX_BODY_BYTES")
                .unwrap_or_else(|_| "16384".to_string()) // 16 KiB
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MAX_BODY_BYTES".to_string()))?,
        };

        // A zero or negative fallback viewport would make every header-only
        // request fail validation.
        if !config.default_viewport_width.is_finite() || config.default_viewport_width <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_VIEWPORT_WIDTH".to_string(),
            ));
        }
        if !config.default_viewport_height.is_finite() || config.default_viewport_height <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_VIEWPORT_HEIGHT".to_string(),
            ));
        }

        // A zero body limit would reject every POST before deserialization.
        if config.max_body_bytes == 0 {
            return Err(ConfigError::InvalidValue("MAX_BODY_BYTES".to_string()));
        }

        Ok(config)
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.http_port)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_port: 8080,
            bind_addr: "0.0.0.0".to_string(),
            default_viewport_width: DEFAULT_VIEWPORT_WIDTH,
            default_viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            max_body_bytes: 16 * 1024,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
