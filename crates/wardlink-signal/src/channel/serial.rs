// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Serial-port channel backend [feature: serial]

use crate::channel::SignalChannel;
use crate::error::SignalError;
use std::io::{Read, Write};
use std::time::Duration;

/// A [`SignalChannel`] backed by a real serial port
pub struct SerialChannel {
    name: String,
    port: Box<dyn serialport::SerialPort>,
}

impl SerialChannel {
    /// Open `port` at `baud_rate` with a short read timeout
    pub fn open(port: &str, baud_rate: u32) -> Result<Self, SignalError> {
        let handle = serialport::new(port, baud_rate)
            .timeout(Duration::from_millis(100))
            .open()
            .map_err(|e| SignalError::Open {
                name: port.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            name: port.to_string(),
            port: handle,
        })
    }
}

impl SignalChannel for SerialChannel {
    fn name(&self) -> &str {
        &self.name
    }

    fn bytes_available(&mut self) -> Result<usize, SignalError> {
        self.port
            .bytes_to_read()
            .map(|n| n as usize)
            .map_err(|e| SignalError::Device(e.to_string()))
    }

    fn read_available(&mut self) -> Result<Vec<u8>, SignalError> {
        let available = self.bytes_available()?;
        if available == 0 {
            return Ok(Vec::new());
        }
        let mut buf = vec![0u8; available];
        let read = self.port.read(&mut buf)?;
        buf.truncate(read);
        Ok(buf)
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), SignalError> {
        self.port.write_all(bytes)?;
        Ok(())
    }
}
