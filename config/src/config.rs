//! Configuration structures for the connector.
//!
//! All structures use `serde` for serialization and `validator` for input
//! validation; every field has a default so a config file only needs to
//! state what it overrides. The API token has no default on purpose.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default remote API root.
pub const DEFAULT_BASE_URL: &str = "https://faultline.io/api/0/";

/// Top-level connector configuration.
///
/// Aggregates the remote connection settings and the observability knobs.
/// Sources are merged with the usual precedence: environment variables
/// override file values, file values override defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct Config {
    /// Remote API connection settings
    #[serde(default)]
    #[validate(nested)]
    pub connection: ConnectionConfig,

    /// Logging configuration
    #[serde(default)]
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Validate the full configuration, flattening validator output into a
    /// single configuration error.
    pub fn validated(self) -> errors::ConnectorResult<Self> {
        self.validate()
            .map_err(|e| errors::ConnectorError::config(e.to_string()))?;
        Ok(self)
    }
}

/// Remote API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ConnectionConfig {
    /// Bearer token used on every request. Required; there is no usable
    /// default.
    #[validate(length(min = 1, message = "api_token must not be empty"))]
    #[serde(default)]
    pub api_token: String,

    /// API root URL
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct ObservabilityConfig {
    /// Logging level (trace/debug/info/warn/error)
    #[validate(custom(function = "validate_log_level"))]
    #[serde(default = "default_log_level")]
    pub logging_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            logging_level: default_log_level(),
            json_logs: false,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}

fn validate_log_level(level: &str) -> Result<(), validator::ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(validator::ValidationError::new("logging_level")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_expected_values() {
        let config = Config::default();
        assert_eq!(config.connection.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.connection.timeout_seconds, 30);
        assert_eq!(config.observability.logging_level, "info");
        assert!(!config.observability.json_logs);
    }

    #[test]
    fn test_empty_token_fails_validation() {
        let config = Config::default();
        assert!(config.validated().is_err());
    }

    #[test]
    fn test_populated_token_passes_validation() {
        let mut config = Config::default();
        config.connection.api_token = "sntrys_token".to_string();
        assert!(config.validated().is_ok());
    }

    #[test]
    fn test_invalid_log_level_fails_validation() {
        let mut config = Config::default();
        config.connection.api_token = "sntrys_token".to_string();
        config.observability.logging_level = "loud".to_string();
        assert!(config.validated().is_err());
    }

    #[test]
    fn test_timeout_out_of_range_fails_validation() {
        let mut config = Config::default();
        config.connection.api_token = "sntrys_token".to_string();
        config.connection.timeout_seconds = 0;
        assert!(config.validated().is_err());
    }
}
