// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Oracle error types

use thiserror::Error;

/// Failures while consulting the scoring oracle
///
/// Every variant is recoverable: the cache maps it to the degraded fallback
/// result and moves on. Nothing here escapes the feed-read path.
#[derive(Error, Debug)]
pub enum OracleError {
    /// API key environment variable is missing or empty
    #[error("Oracle API key not set: environment variable {0} is missing or empty")]
    MissingApiKey(String),

    /// Transport-level failure (connect, timeout, non-2xx status)
    #[error("Oracle request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response arrived but carried no candidate text
    #[error("Oracle response contained no candidate text")]
    EmptyResponse,

    /// Candidate text could not be parsed into the triage shape
    #[error("Oracle response malformed: {0}")]
    MalformedResponse(String),
}
