// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Wardlink - Patient Call-Button Triage Hub
//!
//! Wardlink ingests call-button events from a patient-side device, mirrors
//! the raw signal to an indicator device, keeps a timestamped request
//! history, and serves an AI-ranked triage feed for care staff. The scoring
//! oracle (an LLM API) is consulted only when the history actually changes.
//!
//! ## Components
//!
//! - [`wardlink_signal`]: hardware channels, code decoding, the relay loop
//! - [`wardlink_triage`]: history log, prioritization cache, oracle client,
//!   feed assembly
//! - [`wardlink_config`]: TOML configuration with env overrides
//! - [`wardlink_observability`]: tracing initialization
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wardlink::{Hub, UnconfiguredOracle};
//! use wardlink_config::WardlinkConfig;
//!
//! # async fn run() {
//! let config = WardlinkConfig::default();
//! let mut hub = Hub::new(config, Arc::new(UnconfiguredOracle::new("GEMINI_API_KEY")));
//! hub.start();
//!
//! let feed = hub.feed_snapshot().await;
//! println!("{}", serde_json::to_string_pretty(&feed).unwrap());
//! # }
//! ```

pub mod hub;

pub use hub::{Hub, UnconfiguredOracle};

// Re-export the component crates under their own names
pub use wardlink_config;
pub use wardlink_observability;
pub use wardlink_signal;
pub use wardlink_triage;

// Commonly used types at the crate root
pub use wardlink_config::WardlinkConfig;
pub use wardlink_triage::{FeedSnapshot, HistoryLog, PrioritizationCache, TriageResult};
