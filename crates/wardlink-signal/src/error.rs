// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Signal layer error types

use thiserror::Error;

/// Channel and decode failures
///
/// All of these are recoverable at the relay loop: the offending chunk or
/// channel operation is logged and dropped, the loop continues.
#[derive(Error, Debug)]
pub enum SignalError {
    /// Channel could not be opened at startup
    #[error("Failed to open channel '{name}': {reason}")]
    Open { name: String, reason: String },

    /// Read/write failure on an open channel
    #[error("Channel I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific device failure
    #[error("Device error: {0}")]
    Device(String),
}
