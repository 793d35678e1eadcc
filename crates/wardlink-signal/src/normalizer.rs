// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Event normalization
//!
//! Maps a decoded request code to its canonical label. Policy for
//! unrecognized codes: they are stored verbatim as their own literal label
//! rather than dropped - a misflashed device firmware still produces a
//! visible trail for staff.

use crate::codes::canonical_label;
use chrono::{DateTime, Utc};
use wardlink_triage::RequestRecord;

/// Build a [`RequestRecord`] from a decoded code
///
/// `timestamp` is the arrival time of the raw chunk the code came from, so
/// decode latency never skews recency ordering.
pub fn normalize(code: &str, timestamp: DateTime<Utc>) -> RequestRecord {
    let label = canonical_label(code).unwrap_or(code);
    RequestRecord::new(label, timestamp)
}
