// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # wardlink-observability
//!
//! Logging infrastructure for the wardlink hub.
//!
//! Console logging is always on; the `file-logging` feature adds a rotated
//! JSON log file per run under the configured log directory.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod init;

pub use init::{init_logging, init_logging_default, LoggingGuard};

/// Wardlink crate names used for per-crate filter directives
pub const KNOWN_CRATES: &[&str] = &[
    "wardlink",
    "wardlink-config",
    "wardlink-signal",
    "wardlink-triage",
];
