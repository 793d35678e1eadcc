// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Wardlink Configuration System
//!
//! Type-safe configuration loader for the wardlink hub with support for:
//! - TOML file parsing (`wardlink.toml`)
//! - Environment variable overrides (`WARDLINK_*`)
//! - Validation of port/timing/oracle settings before the hub starts
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wardlink_config::load_config;
//!
//! let config = load_config(None).expect("Failed to load config");
//! println!("Input port: {}", config.signal.input_port);
//! println!("Oracle model: {}", config.oracle.model);
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{apply_environment_overrides, find_config_file, load_config};
pub use types::*;
pub use validation::validate_config;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = WardlinkConfig::default();
        validate_config(&config).expect("defaults must be valid");
    }
}
