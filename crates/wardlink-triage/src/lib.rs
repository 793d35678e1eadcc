// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # wardlink-triage
//!
//! The triage core of the wardlink hub:
//! - [`HistoryLog`]: shared append-only log of patient requests
//! - [`PrioritizationCache`]: change-detecting guard in front of the oracle
//! - [`GeminiOracleClient`]: HTTP client for the external scoring oracle
//! - [`assemble_feed`]: pure assembly of the exported care-staff feed
//!
//! The cache is the load-bearing piece: the oracle call is slow and
//! rate-limited, so it is paid for only when the request history actually
//! changes, never on a timer.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cache;
pub mod error;
pub mod feed;
pub mod history;
pub mod oracle;
pub mod record;
pub mod stats;
pub mod types;

pub use cache::PrioritizationCache;
pub use error::OracleError;
pub use feed::{assemble_feed, FeedEntry, FeedSnapshot};
pub use history::HistoryLog;
pub use oracle::{GeminiOracleClient, ScoringOracle};
pub use record::RequestRecord;
pub use stats::RequestStats;
pub use types::{PrioritizedTask, TriageResult, Urgency, WellbeingSummary};
