// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Signal channel backends
//!
//! A [`SignalChannel`] is a byte-oriented duplex link to a physical device.
//! Backends:
//! - `serial`: real serial port [feature: serial]
//! - `null`: no-op substitute when a port cannot be opened
//! - `memory`: in-process loopback for tests

use crate::error::SignalError;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::warn;

#[cfg(feature = "serial")]
pub mod serial;

/// Byte-oriented duplex link to a physical device
///
/// Mirrors the behavior of a non-blocking serial handle: `bytes_available`
/// never blocks, `read_available` drains whatever is currently buffered,
/// `write_all` pushes a full buffer out.
pub trait SignalChannel: Send {
    /// Channel name for logging (e.g. "/dev/ttyUSB0", "null", "memory:in")
    fn name(&self) -> &str;

    /// Number of inbound bytes currently buffered
    fn bytes_available(&mut self) -> Result<usize, SignalError>;

    /// Drain and return all currently buffered inbound bytes
    fn read_available(&mut self) -> Result<Vec<u8>, SignalError>;

    /// Write the whole buffer to the device
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), SignalError>;
}

/// No-op channel substituted when a device cannot be opened
///
/// Reads nothing, discards writes. Keeps the hub testable and usable
/// without hardware attached.
#[derive(Debug, Default)]
pub struct NullChannel;

impl SignalChannel for NullChannel {
    fn name(&self) -> &str {
        "null"
    }

    fn bytes_available(&mut self) -> Result<usize, SignalError> {
        Ok(0)
    }

    fn read_available(&mut self) -> Result<Vec<u8>, SignalError> {
        Ok(Vec::new())
    }

    fn write_all(&mut self, _bytes: &[u8]) -> Result<(), SignalError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryChannelState {
    inbound: VecDeque<u8>,
    outbound: Vec<u8>,
}

/// In-process loopback channel for tests
pub struct MemoryChannel {
    name: String,
    state: Arc<Mutex<MemoryChannelState>>,
}

/// Test-side handle paired with a [`MemoryChannel`]
///
/// Feeds inbound bytes and captures everything the channel wrote.
#[derive(Clone)]
pub struct MemoryChannelHandle {
    state: Arc<Mutex<MemoryChannelState>>,
}

impl MemoryChannel {
    pub fn new(name: impl Into<String>) -> (Self, MemoryChannelHandle) {
        let state = Arc::new(Mutex::new(MemoryChannelState::default()));
        (
            Self {
                name: name.into(),
                state: state.clone(),
            },
            MemoryChannelHandle { state },
        )
    }
}

impl MemoryChannelHandle {
    /// Inject bytes as if the device had sent them
    pub fn feed(&self, bytes: &[u8]) {
        self.state.lock().inbound.extend(bytes);
    }

    /// Everything written to the device so far
    pub fn written(&self) -> Vec<u8> {
        self.state.lock().outbound.clone()
    }

    /// Drain the captured writes
    pub fn take_written(&self) -> Vec<u8> {
        std::mem::take(&mut self.state.lock().outbound)
    }
}

impl SignalChannel for MemoryChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn bytes_available(&mut self) -> Result<usize, SignalError> {
        Ok(self.state.lock().inbound.len())
    }

    fn read_available(&mut self) -> Result<Vec<u8>, SignalError> {
        let mut state = self.state.lock();
        Ok(state.inbound.drain(..).collect())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), SignalError> {
        self.state.lock().outbound.extend_from_slice(bytes);
        Ok(())
    }
}

/// Open a serial channel, degrading to [`NullChannel`] on any failure
///
/// Open failures are logged and never fatal (the rest of the hub keeps
/// running without the device). Without the `serial` feature this always
/// returns a null channel.
pub fn open_or_null(role: &str, port: &str, baud_rate: u32) -> Box<dyn SignalChannel> {
    #[cfg(feature = "serial")]
    {
        match serial::SerialChannel::open(port, baud_rate) {
            Ok(channel) => {
                tracing::info!(role, port, baud_rate, "serial channel opened");
                return Box::new(channel);
            }
            Err(e) => {
                warn!(role, port, error = %e, "serial channel unavailable, using null channel");
                return Box::new(NullChannel);
            }
        }
    }

    #[cfg(not(feature = "serial"))]
    {
        let _ = baud_rate;
        warn!(role, port, "built without the 'serial' feature, using null channel");
        Box::new(NullChannel)
    }
}
