// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for the wardlink hub
//!
//! Console output is filtered through `EnvFilter` (config value, overridable
//! with `RUST_LOG`). With the `file-logging` feature a timestamped run folder
//! also receives a JSON log file.

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

#[cfg(feature = "file-logging")]
use std::path::PathBuf;

/// Logging initialization result
///
/// Must stay alive for the duration of the process; dropping it flushes any
/// file appenders.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
}

/// Initialize logging with console output (and file output when the
/// `file-logging` feature is enabled)
///
/// # Arguments
/// * `filter` - Base filter directive (e.g. "info", "wardlink_signal=debug,info")
/// * `log_dir` - Base directory for file logs (ignored without `file-logging`)
pub fn init_logging(filter: &str, log_dir: Option<&str>) -> Result<LoggingGuard> {
    // RUST_LOG wins over the configured level
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    let mut layers = Vec::new();

    // Console layer (human-readable)
    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_filter(env_filter)
        .boxed();
    layers.push(console_layer);

    #[cfg(feature = "file-logging")]
    let file_guards = {
        use anyhow::Context;
        use tracing_appender::rolling;

        let base_log_dir = PathBuf::from(log_dir.unwrap_or("./logs"));
        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let run_folder = base_log_dir.join(format!("run_{}", timestamp));
        std::fs::create_dir_all(&run_folder)
            .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

        let file_appender = rolling::daily(&run_folder, "wardlink.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(EnvFilter::new(filter))
            .boxed();
        layers.push(file_layer);

        vec![guard]
    };

    #[cfg(not(feature = "file-logging"))]
    let _ = log_dir;

    Registry::default().with(layers).init();

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guards: file_guards,
    })
}

/// Initialize logging with default settings ("info" level, console only)
pub fn init_logging_default() -> Result<LoggingGuard> {
    init_logging("info", None)
}
