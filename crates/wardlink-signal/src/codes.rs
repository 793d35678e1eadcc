// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Button-code alphabet and frame decoding
//!
//! Inbound frames are ASCII tokens separated by whitespace. Tokens starting
//! with `R` are request codes; anything else is line noise from the device
//! and gets dropped.

use tracing::debug;
use wardlink_triage::record::{
    BATHROOM_LABEL, BLANKET_LABEL, EMERGENCY_LABEL, FOOD_LABEL, WATER_LABEL,
};

/// Fixed code -> canonical label table for the button device
pub const CODE_TABLE: &[(&str, &str)] = &[
    ("R1", BATHROOM_LABEL),
    ("R2", WATER_LABEL),
    ("R3", FOOD_LABEL),
    ("R4", BLANKET_LABEL),
    ("R5", EMERGENCY_LABEL),
];

/// Look up the canonical label for a request code
pub fn canonical_label(code: &str) -> Option<&'static str> {
    CODE_TABLE
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| *label)
}

/// Decode a raw chunk into zero or more request codes
///
/// Splits on ASCII whitespace and keeps tokens beginning with `R`
/// (recognized or not - unknown codes are normalized to literal labels
/// downstream). Other tokens are dropped and logged at debug.
pub fn decode_frame(chunk: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(chunk);
    let mut codes = Vec::new();

    for token in text.split_ascii_whitespace() {
        if token.starts_with('R') {
            codes.push(token.to_string());
        } else {
            debug!(token, "dropping non-request token");
        }
    }

    codes
}
