// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Feed assembly
//!
//! Pure combination of the history snapshot, the cached triage result, and
//! the last echoed code into the read-only snapshot the web layer serves.
//! No I/O, no side effects.

use crate::record::RequestRecord;
use crate::stats::RequestStats;
use crate::types::{PrioritizedTask, TriageResult, Urgency, WellbeingSummary};
use serde::Serialize;

/// One windowed history record, formatted for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedEntry {
    pub label: String,
    pub timestamp: String,
    /// Fixed classification: emergency is always high, everything else
    /// medium. Independent of the oracle's own ranking, so the raw feed
    /// stays honest when the oracle is degraded.
    pub urgency: Urgency,
}

/// The exported care-staff feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedSnapshot {
    pub prioritized_tasks: Vec<PrioritizedTask>,
    pub request_feed: Vec<FeedEntry>,
    pub ai_insights: Vec<String>,
    pub wellbeing_summary: WellbeingSummary,
    /// Last code echoed to the indicator device
    pub last_code_sent: String,
    pub stats: RequestStats,
}

fn classify(record: &RequestRecord) -> Urgency {
    if record.is_emergency() {
        Urgency::High
    } else {
        Urgency::Medium
    }
}

/// Assemble the feed from a full history snapshot and the current cached
/// result. `feed_window` bounds the raw request feed; stats cover the whole
/// history.
pub fn assemble_feed(
    history: &[RequestRecord],
    feed_window: usize,
    result: &TriageResult,
    last_code_sent: &str,
) -> FeedSnapshot {
    let start = history.len().saturating_sub(feed_window);
    let request_feed = history[start..]
        .iter()
        .map(|record| FeedEntry {
            label: record.label.clone(),
            timestamp: record.formatted_time(),
            urgency: classify(record),
        })
        .collect();

    FeedSnapshot {
        prioritized_tasks: result.prioritized_tasks.clone(),
        request_feed,
        ai_insights: result.ai_insights.clone(),
        wellbeing_summary: result.wellbeing_summary.clone(),
        last_code_sent: last_code_sent.to_string(),
        stats: RequestStats::from_records(history),
    }
}
