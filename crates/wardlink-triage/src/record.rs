// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Patient request records and the canonical label vocabulary

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical labels for the fixed button alphabet
pub const BATHROOM_LABEL: &str = "Bathroom Request";
pub const WATER_LABEL: &str = "Water Request";
pub const FOOD_LABEL: &str = "Food Request";
pub const BLANKET_LABEL: &str = "Blanket Request";
pub const EMERGENCY_LABEL: &str = "HELP! Emergency";

/// A single normalized patient request
///
/// Immutable once created; the timestamp is the arrival time of the raw
/// chunk the request was decoded from, not decode-completion time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub label: String,
    pub timestamp: DateTime<Utc>,
}

impl RequestRecord {
    pub fn new(label: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            label: label.into(),
            timestamp,
        }
    }

    /// Human-readable timestamp, e.g. "2025-03-14 09:26:53"
    pub fn formatted_time(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Whether this record carries the emergency label
    pub fn is_emergency(&self) -> bool {
        self.label == EMERGENCY_LABEL
    }
}
