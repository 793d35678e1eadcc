// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! End-to-end pipeline tests over in-memory channels and a counting mock
//! oracle: button press -> relay -> history -> cache -> feed snapshot.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wardlink::{Hub, UnconfiguredOracle};
use wardlink_config::WardlinkConfig;
use wardlink_signal::MemoryChannel;
use wardlink_triage::record::EMERGENCY_LABEL;
use wardlink_triage::{
    OracleError, PrioritizedTask, RequestRecord, ScoringOracle, TriageResult, Urgency,
};

struct CountingOracle {
    calls: AtomicUsize,
}

impl CountingOracle {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ScoringOracle for CountingOracle {
    async fn score(&self, window: &[RequestRecord]) -> Result<TriageResult, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(TriageResult {
            prioritized_tasks: vec![PrioritizedTask {
                task: format!("Respond to {}", window.last().unwrap().label),
                urgency: Urgency::High,
                ai_score: 9.0,
            }],
            ai_insights: vec!["mock insight".to_string()],
            wellbeing_summary: Default::default(),
        })
    }
}

fn test_config() -> WardlinkConfig {
    let mut config = WardlinkConfig::default();
    config.signal.poll_interval_ms = 1;
    config
}

async fn wait_for_history(hub: &Hub, expected: usize) {
    for _ in 0..200 {
        if hub.history().len() >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    panic!(
        "history never reached {} records (got {})",
        expected,
        hub.history().len()
    );
}

#[tokio::test]
async fn test_emergency_press_flows_to_ranked_feed() {
    let oracle = CountingOracle::new();
    let mut hub = Hub::new(test_config(), oracle.clone());

    let (input, input_handle) = MemoryChannel::new("memory:in");
    let (output, output_handle) = MemoryChannel::new("memory:out");
    hub.start_with_channels(Box::new(input), Box::new(output));

    // Patient presses the emergency button
    input_handle.feed(b"R5\n");
    wait_for_history(&hub, 1).await;

    let snapshot = hub.history().snapshot();
    assert_eq!(snapshot[0].label, EMERGENCY_LABEL);

    // Raw bytes mirrored verbatim, then the confirmation echo
    assert_eq!(output_handle.written(), b"R5\nR5\n");
    assert_eq!(input_handle.written(), b"R5\n");

    // Changed history: exactly one oracle call behind the feed
    let feed = hub.feed_snapshot().await;
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);

    // Windowed view classifies the emergency as high independently of the
    // oracle's output
    assert_eq!(feed.request_feed.len(), 1);
    assert_eq!(feed.request_feed[0].label, EMERGENCY_LABEL);
    assert_eq!(feed.request_feed[0].urgency, Urgency::High);
    assert_eq!(feed.last_code_sent, "R5");
    assert_eq!(feed.prioritized_tasks[0].task, "Respond to HELP! Emergency");

    hub.shutdown().await;
}

#[tokio::test]
async fn test_unchanged_history_serves_cached_feed() {
    let oracle = CountingOracle::new();
    let mut hub = Hub::new(test_config(), oracle.clone());

    let (input, input_handle) = MemoryChannel::new("memory:in");
    let (output, _output_handle) = MemoryChannel::new("memory:out");
    hub.start_with_channels(Box::new(input), Box::new(output));

    input_handle.feed(b"R1 R2 R3\n");
    wait_for_history(&hub, 3).await;

    let first = hub.feed_snapshot().await;
    let second = hub.feed_snapshot().await;

    // Length-3 history unchanged between the two reads: one oracle call
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);
    assert_eq!(first.prioritized_tasks, second.prioritized_tasks);
    assert_eq!(first.request_feed, second.request_feed);

    // New press invalidates the cache
    input_handle.feed(b"R5\n");
    wait_for_history(&hub, 4).await;
    hub.feed_snapshot().await;
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 2);

    hub.shutdown().await;
}

#[tokio::test]
async fn test_empty_history_feed_needs_no_oracle() {
    let oracle = CountingOracle::new();
    let mut hub = Hub::new(test_config(), oracle.clone());

    let (input, _input_handle) = MemoryChannel::new("memory:in");
    let (output, _output_handle) = MemoryChannel::new("memory:out");
    hub.start_with_channels(Box::new(input), Box::new(output));

    let feed = hub.feed_snapshot().await;
    assert_eq!(oracle.calls.load(Ordering::SeqCst), 0);
    assert!(feed.request_feed.is_empty());
    assert_eq!(feed.wellbeing_summary.score, "10/10");
    assert_eq!(feed.stats.total_requests, 0);

    hub.shutdown().await;
}

#[tokio::test]
async fn test_unconfigured_oracle_degrades_but_feed_stays_valid() {
    let mut hub = Hub::new(test_config(), Arc::new(UnconfiguredOracle::new("GEMINI_API_KEY")));

    let (input, input_handle) = MemoryChannel::new("memory:in");
    let (output, _output_handle) = MemoryChannel::new("memory:out");
    hub.start_with_channels(Box::new(input), Box::new(output));

    input_handle.feed(b"R2\n");
    wait_for_history(&hub, 1).await;

    let feed = hub.feed_snapshot().await;
    // Degraded fallback instead of an error
    assert_eq!(feed.prioritized_tasks.len(), 1);
    assert_eq!(feed.prioritized_tasks[0].urgency, Urgency::High);
    assert_eq!(feed.wellbeing_summary.score, "unavailable");
    // Raw feed is unaffected by the oracle being down
    assert_eq!(feed.request_feed.len(), 1);
    assert_eq!(feed.request_feed[0].urgency, Urgency::Medium);

    hub.shutdown().await;
}
