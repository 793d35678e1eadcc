// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `wardlink.toml`.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WardlinkConfig {
    pub signal: SignalConfig,
    pub oracle: OracleConfig,
    pub feed: FeedConfig,
    pub logging: LoggingConfig,
}

/// Signal channel configuration (patient-side input device + indicator output)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Serial port of the button device (e.g. "/dev/ttyUSB0", "COM6")
    pub input_port: String,
    /// Serial port of the indicator device (e.g. "/dev/ttyUSB1", "COM5")
    pub output_port: String,
    /// Baud rate shared by both devices
    pub baud_rate: u32,
    /// Relay poll cadence in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            input_port: "/dev/ttyUSB0".to_string(),
            output_port: "/dev/ttyUSB1".to_string(),
            baud_rate: 9600,
            poll_interval_ms: 10,
        }
    }
}

/// Scoring oracle (LLM API) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleConfig {
    /// Base URL of the generative API
    pub endpoint: String,
    /// Model identifier passed to the generateContent endpoint
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// How many trailing history records are summarized per request
    pub history_window: usize,
    /// Sampling temperature for the triage prompt
    pub temperature: f32,
    /// Output token cap for the triage response
    pub max_output_tokens: u32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 20,
            history_window: 10,
            temperature: 0.2,
            max_output_tokens: 500,
        }
    }
}

/// Feed assembly configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeedConfig {
    /// How many trailing records the request feed shows
    pub window: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { window: 10 }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive (e.g. "info", "wardlink_signal=debug,info")
    pub level: String,
    /// Base directory for file logs (only used with the file-logging feature)
    pub directory: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "./logs".to_string(),
        }
    }
}
