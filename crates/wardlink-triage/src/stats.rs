// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Request-rate statistics
//!
//! In-memory counterpart of the offline CSV analytics: counts by label, by
//! hour of day, and by calendar day, recomputed from the history snapshot
//! on each feed request.

use crate::record::RequestRecord;
use chrono::Timelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated request counts for the feed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestStats {
    pub total_requests: usize,
    pub requests_by_type: BTreeMap<String, usize>,
    pub requests_by_hour: BTreeMap<u32, usize>,
    pub requests_by_day: BTreeMap<String, usize>,
}

impl RequestStats {
    pub fn from_records(records: &[RequestRecord]) -> Self {
        let mut stats = Self {
            total_requests: records.len(),
            ..Default::default()
        };

        for record in records {
            *stats
                .requests_by_type
                .entry(record.label.clone())
                .or_default() += 1;
            *stats
                .requests_by_hour
                .entry(record.timestamp.hour())
                .or_default() += 1;
            *stats
                .requests_by_day
                .entry(record.timestamp.format("%Y-%m-%d").to_string())
                .or_default() += 1;
        }

        stats
    }
}
