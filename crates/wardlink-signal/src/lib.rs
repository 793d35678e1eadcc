// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # wardlink-signal
//!
//! The hardware-facing half of the wardlink hub:
//! - [`SignalChannel`]: byte-oriented duplex link abstraction, with serial
//!   (feature `serial`), null (degraded), and in-memory (test) backends
//! - [`codes`]: the fixed button-code alphabet and frame decoding
//! - [`SignalRelay`]: the long-lived poll loop that mirrors raw bytes to
//!   the indicator device and appends normalized requests to the shared
//!   history
//!
//! Channel failures are never fatal: a port that cannot be opened degrades
//! to a no-op channel and the rest of the hub keeps working.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod channel;
pub mod codes;
pub mod error;
pub mod normalizer;
pub mod relay;

pub use channel::{open_or_null, MemoryChannel, MemoryChannelHandle, NullChannel, SignalChannel};
pub use codes::{canonical_label, decode_frame};
pub use error::SignalError;
pub use normalizer::normalize;
pub use relay::{LastEcho, RelayHandle, SignalRelay};

#[cfg(feature = "serial")]
pub use channel::serial::SerialChannel;
