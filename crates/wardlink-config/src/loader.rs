// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! Two-tier loading:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)

use crate::{validate_config, ConfigError, ConfigResult, WardlinkConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "wardlink.toml";

/// Find the wardlink configuration file
///
/// Search order:
/// 1. `WARDLINK_CONFIG_PATH` environment variable
/// 2. Current working directory: `./wardlink.toml`
/// 3. Ancestor directories (up to 5 levels, for workspace-root configs)
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("WARDLINK_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by WARDLINK_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "Wardlink configuration file '{}' not found in any of these locations:\n{}\n\nSet WARDLINK_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for
///   the config file, and fall back to built-in defaults when none exists.
///
/// # Errors
///
/// Returns error if an explicitly given config file is missing, contains
/// invalid TOML, or fails validation
pub fn load_config(config_path: Option<&Path>) -> ConfigResult<WardlinkConfig> {
    let mut config = match config_path {
        Some(path) => parse_file(path)?,
        None => match find_config_file() {
            Ok(path) => parse_file(&path)?,
            // The hub must stay usable without a config file on disk
            Err(ConfigError::FileNotFound(_)) => WardlinkConfig::default(),
            Err(e) => return Err(e),
        },
    };

    apply_environment_overrides(&mut config);
    validate_config(&config)?;
    Ok(config)
}

fn parse_file(path: &Path) -> ConfigResult<WardlinkConfig> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Apply `WARDLINK_*` environment variable overrides
///
/// Supported overrides:
/// - `WARDLINK_INPUT_PORT`, `WARDLINK_OUTPUT_PORT`, `WARDLINK_BAUD_RATE`
/// - `WARDLINK_POLL_INTERVAL_MS`
/// - `WARDLINK_ORACLE_ENDPOINT`, `WARDLINK_ORACLE_MODEL`
/// - `WARDLINK_LOG_LEVEL`
pub fn apply_environment_overrides(config: &mut WardlinkConfig) {
    if let Ok(v) = env::var("WARDLINK_INPUT_PORT") {
        config.signal.input_port = v;
    }
    if let Ok(v) = env::var("WARDLINK_OUTPUT_PORT") {
        config.signal.output_port = v;
    }
    if let Ok(v) = env::var("WARDLINK_BAUD_RATE") {
        if let Ok(rate) = v.parse() {
            config.signal.baud_rate = rate;
        }
    }
    if let Ok(v) = env::var("WARDLINK_POLL_INTERVAL_MS") {
        if let Ok(ms) = v.parse() {
            config.signal.poll_interval_ms = ms;
        }
    }
    if let Ok(v) = env::var("WARDLINK_ORACLE_ENDPOINT") {
        config.oracle.endpoint = v;
    }
    if let Ok(v) = env::var("WARDLINK_ORACLE_MODEL") {
        config.oracle.model = v;
    }
    if let Ok(v) = env::var("WARDLINK_LOG_LEVEL") {
        config.logging.level = v;
    }
}
