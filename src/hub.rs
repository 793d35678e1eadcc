// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Hub wiring
//!
//! Owns the explicit shared state (history log, last-echo cell, cache) and
//! connects the signal relay to the triage components. State is injected,
//! never ambient: everything a component touches arrives through its
//! constructor.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use wardlink_config::WardlinkConfig;
use wardlink_signal::{open_or_null, LastEcho, RelayHandle, SignalChannel, SignalRelay};
use wardlink_triage::{
    assemble_feed, FeedSnapshot, HistoryLog, OracleError, PrioritizationCache, RequestRecord,
    ScoringOracle, TriageResult,
};

/// Stand-in oracle for hubs without API credentials
///
/// Every call fails, so the cache serves the degraded fallback; the rest of
/// the pipeline (ingestion, forwarding, raw feed) stays fully functional.
pub struct UnconfiguredOracle {
    api_key_env: String,
}

impl UnconfiguredOracle {
    pub fn new(api_key_env: impl Into<String>) -> Self {
        Self {
            api_key_env: api_key_env.into(),
        }
    }
}

#[async_trait]
impl ScoringOracle for UnconfiguredOracle {
    async fn score(&self, _window: &[RequestRecord]) -> Result<TriageResult, OracleError> {
        Err(OracleError::MissingApiKey(self.api_key_env.clone()))
    }
}

/// The assembled wardlink pipeline
pub struct Hub {
    config: WardlinkConfig,
    history: Arc<HistoryLog>,
    last_echo: LastEcho,
    cache: PrioritizationCache,
    relay: Option<RelayHandle>,
}

impl Hub {
    pub fn new(config: WardlinkConfig, oracle: Arc<dyn ScoringOracle>) -> Self {
        let cache = PrioritizationCache::new(oracle, config.oracle.history_window);
        Self {
            config,
            history: Arc::new(HistoryLog::new()),
            last_echo: Arc::new(RwLock::new(String::new())),
            cache,
            relay: None,
        }
    }

    /// Open the configured serial channels (degrading to null channels on
    /// failure) and start the ingestion task
    pub fn start(&mut self) {
        let input = open_or_null(
            "input",
            &self.config.signal.input_port,
            self.config.signal.baud_rate,
        );
        let output = open_or_null(
            "output",
            &self.config.signal.output_port,
            self.config.signal.baud_rate,
        );
        self.start_with_channels(input, output);
    }

    /// Start the ingestion task over caller-provided channels (tests use
    /// in-memory pairs)
    pub fn start_with_channels(
        &mut self,
        input: Box<dyn SignalChannel>,
        output: Box<dyn SignalChannel>,
    ) {
        if self.relay.is_some() {
            warn!("relay already running, ignoring start request");
            return;
        }

        let relay = SignalRelay::new(
            input,
            output,
            self.history.clone(),
            self.last_echo.clone(),
            Duration::from_millis(self.config.signal.poll_interval_ms),
        );
        self.relay = Some(relay.spawn());
    }

    /// Shared history log (the feed path and tests read through this)
    pub fn history(&self) -> &Arc<HistoryLog> {
        &self.history
    }

    /// Build the current feed snapshot
    ///
    /// Refreshes the prioritization through the cache (one oracle call at
    /// most, and only if history changed), then assembles the pure feed
    /// view. Always returns a valid snapshot; oracle trouble shows up as
    /// the degraded fallback, never as an error.
    pub async fn feed_snapshot(&self) -> FeedSnapshot {
        let result = self.cache.get_prioritization(&self.history).await;
        let snapshot = self.history.snapshot();
        let last_code = self.last_echo.read().clone();
        assemble_feed(&snapshot, self.config.feed.window, &result, &last_code)
    }

    /// Stop the ingestion task
    pub async fn shutdown(&mut self) {
        if let Some(relay) = self.relay.take() {
            relay.stop().await;
        }
    }
}
