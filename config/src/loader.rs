//! Environment variable loader.
//!
//! Loads configuration from `FAULTLINE_*` environment variables following
//! 12-factor app principles. Environment variables override file values
//! but can be overridden by CLI arguments.
//!
//! # Environment Variables
//! - `FAULTLINE_API_TOKEN`: Bearer token (required unless supplied elsewhere)
//! - `FAULTLINE_BASE_URL`: API root (default: `https://faultline.io/api/0/`)
//! - `FAULTLINE_TIMEOUT_SECONDS`: Per-request timeout (default: 30)
//! - `FAULTLINE_LOG_LEVEL`: Logging level (default: "info")
//! - `FAULTLINE_JSON_LOGS`: Emit JSON log lines (true/false, default: false)

use crate::config::Config;
use std::env;

/// Load configuration from environment variables on top of defaults.
pub fn load_from_env() -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Apply `FAULTLINE_*` overrides to an already-loaded configuration, e.g.
/// one read from a file.
pub fn apply_env_overrides(config: &mut Config) -> Result<(), Box<dyn std::error::Error>> {
    if let Ok(token) = env::var("FAULTLINE_API_TOKEN") {
        config.connection.api_token = token;
    }
    if let Ok(url) = env::var("FAULTLINE_BASE_URL") {
        config.connection.base_url = url;
    }
    if let Some(timeout) = parse_env("FAULTLINE_TIMEOUT_SECONDS")? {
        config.connection.timeout_seconds = timeout;
    }
    if let Ok(level) = env::var("FAULTLINE_LOG_LEVEL") {
        config.observability.logging_level = level;
    }
    if let Some(json_logs) = parse_env("FAULTLINE_JSON_LOGS")? {
        config.observability.json_logs = json_logs;
    }

    Ok(())
}

/// Parse an optional environment variable; absence is `None`, an
/// unparseable value is an error rather than a silent default.
fn parse_env<T>(key: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => Ok(Some(
            value
                .parse()
                .map_err(|e| format!("invalid value for {key}: {e}"))?,
        )),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_load_from_env_defaults() {
        unsafe {
            env::remove_var("FAULTLINE_API_TOKEN");
            env::remove_var("FAULTLINE_BASE_URL");
            env::remove_var("FAULTLINE_TIMEOUT_SECONDS");
            env::remove_var("FAULTLINE_LOG_LEVEL");
            env::remove_var("FAULTLINE_JSON_LOGS");
        }
        let config = load_from_env().unwrap();
        assert_eq!(config.connection.api_token, "");
        assert_eq!(config.connection.base_url, "https://faultline.io/api/0/");
        assert_eq!(config.connection.timeout_seconds, 30);
        assert_eq!(config.observability.logging_level, "info");
    }

    #[test]
    #[serial]
    fn test_load_from_env_overrides() {
        unsafe {
            env::set_var("FAULTLINE_API_TOKEN", "sntrys_test");
            env::set_var("FAULTLINE_BASE_URL", "http://localhost:9000/api/0/");
            env::set_var("FAULTLINE_TIMEOUT_SECONDS", "60");
        }

        let config = load_from_env().unwrap();
        assert_eq!(config.connection.api_token, "sntrys_test");
        assert_eq!(config.connection.base_url, "http://localhost:9000/api/0/");
        assert_eq!(config.connection.timeout_seconds, 60);

        unsafe {
            env::remove_var("FAULTLINE_API_TOKEN");
            env::remove_var("FAULTLINE_BASE_URL");
            env::remove_var("FAULTLINE_TIMEOUT_SECONDS");
        }
    }

    #[test]
    #[serial]
    fn test_unparseable_override_is_an_error() {
        unsafe {
            env::set_var("FAULTLINE_TIMEOUT_SECONDS", "soon");
        }
        let result = load_from_env();
        assert!(result.is_err());
        unsafe {
            env::remove_var("FAULTLINE_TIMEOUT_SECONDS");
        }
    }
}
