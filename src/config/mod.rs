//! Configuration management for eventbox
//!
//! Settings are layered, lowest priority first:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables
//!
//! # Usage
//!
//! ```no_run
//! use eventbox::config::Config;
//!
//! let config = Config::load().expect("Failed to load configuration");
//! println!("Retaining {} ledgers", config.store.retention_window);
//! ```
//!
//! # Environment Variables
//!
//! Any key can be overridden with `EVENTBOX__<section>__<key>`:
//! - `EVENTBOX__STORE__RETENTION_WINDOW=1440`
//! - `EVENTBOX__SERVER__BIND_ADDR=127.0.0.1:9000`
//!
//! # Configuration File
//!
//! Loaded from `config/eventbox.toml` unless `EVENTBOX_CONFIG` points
//! elsewhere. A missing file is not an error.

mod models;
mod sources;
mod validation;

pub use models::{Config, ServerConfig, StoreConfig, TelemetryConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path plus the environment
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}
