// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! Catches settings that would make the hub misbehave at runtime (a zero
//! poll interval busy-spins, a zero window starves the oracle prompt).

use crate::{ConfigError, ConfigResult, WardlinkConfig};

/// Validate a complete configuration
pub fn validate_config(config: &WardlinkConfig) -> ConfigResult<()> {
    if config.signal.input_port.is_empty() {
        return Err(ConfigError::ValidationError(
            "signal.input_port must not be empty".to_string(),
        ));
    }
    if config.signal.output_port.is_empty() {
        return Err(ConfigError::ValidationError(
            "signal.output_port must not be empty".to_string(),
        ));
    }
    if config.signal.input_port == config.signal.output_port {
        return Err(ConfigError::ValidationError(format!(
            "signal.input_port and signal.output_port both use {}",
            config.signal.input_port
        )));
    }
    if config.signal.baud_rate == 0 {
        return Err(ConfigError::InvalidValue(
            "signal.baud_rate must be greater than 0".to_string(),
        ));
    }
    if config.signal.poll_interval_ms == 0 {
        return Err(ConfigError::InvalidValue(
            "signal.poll_interval_ms must be greater than 0".to_string(),
        ));
    }

    if config.oracle.endpoint.is_empty() {
        return Err(ConfigError::ValidationError(
            "oracle.endpoint must not be empty".to_string(),
        ));
    }
    if !config.oracle.endpoint.starts_with("http://")
        && !config.oracle.endpoint.starts_with("https://")
    {
        return Err(ConfigError::InvalidValue(format!(
            "oracle.endpoint must be an http(s) URL, got '{}'",
            config.oracle.endpoint
        )));
    }
    if config.oracle.model.is_empty() {
        return Err(ConfigError::ValidationError(
            "oracle.model must not be empty".to_string(),
        ));
    }
    if config.oracle.timeout_secs == 0 {
        return Err(ConfigError::InvalidValue(
            "oracle.timeout_secs must be greater than 0".to_string(),
        ));
    }
    if config.oracle.history_window == 0 {
        return Err(ConfigError::InvalidValue(
            "oracle.history_window must be greater than 0".to_string(),
        ));
    }
    if !(0.0..=2.0).contains(&config.oracle.temperature) {
        return Err(ConfigError::InvalidValue(format!(
            "oracle.temperature must be within 0.0..=2.0, got {}",
            config.oracle.temperature
        )));
    }

    if config.feed.window == 0 {
        return Err(ConfigError::InvalidValue(
            "feed.window must be greater than 0".to_string(),
        ));
    }

    Ok(())
}
