// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Triage result shapes
//!
//! These mirror the JSON contract with the scoring oracle:
//! `{prioritized_tasks[], ai_insights[], wellbeing_summary{score, rationale}}`.

use serde::{Deserialize, Serialize};

/// Urgency tier for a task or feed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

/// One ranked task from the oracle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrioritizedTask {
    pub task: String,
    pub urgency: Urgency,
    /// Combined urgency + recency score assigned by the oracle
    #[serde(default)]
    pub ai_score: f64,
}

/// Oracle's read on overall patient wellbeing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WellbeingSummary {
    /// e.g. "7/10", or "unavailable" when the oracle is unreachable
    pub score: String,
    pub rationale: String,
}

/// Complete triage result - the unit the prioritization cache stores
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageResult {
    pub prioritized_tasks: Vec<PrioritizedTask>,
    pub ai_insights: Vec<String>,
    pub wellbeing_summary: WellbeingSummary,
}

impl TriageResult {
    /// Fixed result for an empty history. No oracle involved.
    pub fn baseline() -> Self {
        Self {
            prioritized_tasks: vec![PrioritizedTask {
                task: "Idle - no pending requests".to_string(),
                urgency: Urgency::Low,
                ai_score: 0.0,
            }],
            ai_insights: vec!["No requests in history".to_string()],
            wellbeing_summary: WellbeingSummary {
                score: "10/10".to_string(),
                rationale: "Patient has not signaled; no pending needs.".to_string(),
            },
        }
    }

    /// Fixed degraded fallback for any oracle failure
    ///
    /// Valid enough to cache and serve; it is not retried until history
    /// changes again, so a failing oracle is never hammered.
    pub fn degraded(reason: &str) -> Self {
        Self {
            prioritized_tasks: vec![PrioritizedTask {
                task: "Check patient requests manually - automated triage unavailable".to_string(),
                urgency: Urgency::High,
                ai_score: 10.0,
            }],
            ai_insights: vec![format!("Scoring oracle unavailable: {}", reason)],
            wellbeing_summary: WellbeingSummary {
                score: "unavailable".to_string(),
                rationale: "Wellbeing assessment requires the scoring oracle.".to_string(),
            },
        }
    }
}
