// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! wardlink-hub - run the triage pipeline
//!
//! Loads configuration, starts the signal relay, and logs a feed snapshot
//! on a fixed cadence until Ctrl-C. The snapshot logged here is the same
//! object a web layer would serve as JSON.

use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use wardlink::{Hub, UnconfiguredOracle};
use wardlink_triage::{GeminiOracleClient, ScoringOracle};

const SNAPSHOT_INTERVAL: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = wardlink_config::load_config(None).context("failed to load configuration")?;

    let _guard = wardlink_observability::init_logging(
        &config.logging.level,
        Some(config.logging.directory.as_str()),
    )
    .context("failed to initialize logging")?;

    info!(version = env!("CARGO_PKG_VERSION"), "wardlink hub starting");

    let oracle: Arc<dyn ScoringOracle> = match GeminiOracleClient::new(
        &config.oracle.endpoint,
        &config.oracle.model,
        &config.oracle.api_key_env,
        Duration::from_secs(config.oracle.timeout_secs),
        config.oracle.temperature,
        config.oracle.max_output_tokens,
    ) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            warn!(error = %e, "scoring oracle unavailable, feed will use the degraded fallback");
            Arc::new(UnconfiguredOracle::new(&config.oracle.api_key_env))
        }
    };

    let mut hub = Hub::new(config, oracle);
    hub.start();

    let mut ticker = tokio::time::interval(SNAPSHOT_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let feed = hub.feed_snapshot().await;
                match serde_json::to_string(&feed) {
                    Ok(json) => info!(requests = feed.stats.total_requests, feed = %json, "feed snapshot"),
                    Err(e) => warn!(error = %e, "failed to serialize feed snapshot"),
                }
            }
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    warn!(error = %e, "ctrl-c handler failed, shutting down");
                }
                break;
            }
        }
    }

    info!("wardlink hub shutting down");
    hub.shutdown().await;
    Ok(())
}
