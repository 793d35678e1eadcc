// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Shared append-only request history
//!
//! Single writer (the signal relay), many readers (feed requests). The lock
//! is held only long enough to push or copy; comparisons against cache
//! snapshots happen outside any lock.

use crate::record::RequestRecord;
use parking_lot::Mutex;

/// In-memory, append-only, time-ordered request log
///
/// Records are never mutated or reordered once appended. Unbounded for the
/// life of the process; there is no deletion and no deduplication - a
/// patient pressing the same button twice is legitimate signal.
#[derive(Debug, Default)]
pub struct HistoryLog {
    records: Mutex<Vec<RequestRecord>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record. O(1) amortized, bounded critical section.
    pub fn append(&self, record: RequestRecord) {
        self.records.lock().push(record);
    }

    /// Full structural copy, independently iterable and comparable
    pub fn snapshot(&self) -> Vec<RequestRecord> {
        self.records.lock().clone()
    }

    /// Last `n` records in arrival order (fewer if history is shorter)
    pub fn window(&self, n: usize) -> Vec<RequestRecord> {
        let records = self.records.lock();
        let start = records.len().saturating_sub(n);
        records[start..].to_vec()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BATHROOM_LABEL, EMERGENCY_LABEL, WATER_LABEL};
    use chrono::{TimeZone, Utc};

    fn record(label: &str, secs: u32) -> RequestRecord {
        RequestRecord::new(label, Utc.with_ymd_and_hms(2025, 3, 14, 9, 0, secs).unwrap())
    }

    #[test]
    fn test_append_preserves_arrival_order() {
        let log = HistoryLog::new();
        log.append(record(BATHROOM_LABEL, 1));
        log.append(record(WATER_LABEL, 2));
        log.append(record(EMERGENCY_LABEL, 3));

        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].label, BATHROOM_LABEL);
        assert_eq!(snapshot[2].label, EMERGENCY_LABEL);
    }

    #[test]
    fn test_repeated_requests_are_kept() {
        let log = HistoryLog::new();
        log.append(record(WATER_LABEL, 1));
        log.append(record(WATER_LABEL, 1));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_window_returns_trailing_records() {
        let log = HistoryLog::new();
        for i in 0..5 {
            log.append(record(WATER_LABEL, i));
        }
        let window = log.window(3);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].timestamp, log.snapshot()[2].timestamp);

        // Shorter history than window
        assert_eq!(log.window(100).len(), 5);
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let log = HistoryLog::new();
        log.append(record(WATER_LABEL, 1));
        let snapshot = log.snapshot();
        log.append(record(EMERGENCY_LABEL, 2));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(log.len(), 2);
    }
}
