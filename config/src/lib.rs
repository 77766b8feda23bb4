//! # Configuration System
//!
//! Centralized configuration for the Faultline connector.
//!
//! This crate provides:
//! - Configuration structures for the connection and observability settings
//! - Environment variable loading (12-factor app principles)
//! - Configuration file loading (TOML/YAML)
//! - Configuration precedence (env > file > defaults)
//! - Configuration validation via the `validator` crate

pub mod config;
pub mod file_loader;
pub mod loader;

pub use config::{Config, ConnectionConfig, DEFAULT_BASE_URL, ObservabilityConfig};
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::{apply_env_overrides, load_from_env};
pub use validator::Validate;
