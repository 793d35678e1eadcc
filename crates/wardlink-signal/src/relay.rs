// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Signal relay - the ingestion loop
//!
//! Polls the input channel, mirrors every raw chunk to the output channel
//! verbatim, decodes request codes, appends normalized records to the
//! shared history, and echoes each accepted code back as a
//! newline-terminated token on both channels (the echo drives the
//! confirmation indicator on the button device).
//!
//! Any single chunk's I/O or decode failure is logged and skipped; the loop
//! itself never dies.

use crate::channel::SignalChannel;
use crate::codes::decode_frame;
use crate::normalizer::normalize;
use chrono::Utc;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use wardlink_triage::HistoryLog;

/// Shared cell holding the last code echoed to the indicator device
pub type LastEcho = Arc<RwLock<String>>;

/// The ingestion loop over a pair of signal channels
pub struct SignalRelay {
    input: Box<dyn SignalChannel>,
    output: Box<dyn SignalChannel>,
    history: Arc<HistoryLog>,
    last_echo: LastEcho,
    poll_interval: Duration,
}

/// Handle to a spawned relay task
pub struct RelayHandle {
    running: Arc<AtomicBool>,
    join: JoinHandle<()>,
}

impl RelayHandle {
    /// Signal the relay to stop and wait for the task to finish
    pub async fn stop(self) {
        self.running.store(false, Ordering::SeqCst);
        let _ = self.join.await;
    }
}

impl SignalRelay {
    pub fn new(
        input: Box<dyn SignalChannel>,
        output: Box<dyn SignalChannel>,
        history: Arc<HistoryLog>,
        last_echo: LastEcho,
        poll_interval: Duration,
    ) -> Self {
        Self {
            input,
            output,
            history,
            last_echo,
            poll_interval,
        }
    }

    /// One poll tick: read whatever is buffered, forward it, decode it
    ///
    /// Public so tests can drive the loop body without the task.
    pub fn poll_once(&mut self) {
        let available = match self.input.bytes_available() {
            Ok(n) => n,
            Err(e) => {
                warn!(channel = self.input.name(), error = %e, "poll failed");
                return;
            }
        };
        if available == 0 {
            return;
        }

        let chunk = match self.input.read_available() {
            Ok(chunk) => chunk,
            Err(e) => {
                warn!(channel = self.input.name(), error = %e, "read failed, dropping chunk");
                return;
            }
        };
        if chunk.is_empty() {
            return;
        }

        // Arrival time of the whole chunk, captured before decode
        let arrived = Utc::now();

        // Mirror the identical bytes regardless of decode outcome
        match self.output.write_all(&chunk) {
            Ok(()) => debug!(bytes = chunk.len(), "forwarded raw chunk"),
            Err(e) => warn!(channel = self.output.name(), error = %e, "forward failed"),
        }

        for code in decode_frame(&chunk) {
            let record = normalize(&code, arrived);
            info!(code = %code, label = %record.label, "request received");
            self.history.append(record);
            self.echo(&code);
        }
    }

    /// Echo the accepted code back as `CODE\n` on both channels and record
    /// it as the last echo
    fn echo(&mut self, code: &str) {
        let message = format!("{}\n", code);

        if let Err(e) = self.input.write_all(message.as_bytes()) {
            warn!(channel = self.input.name(), error = %e, "echo to input device failed");
        }
        if let Err(e) = self.output.write_all(message.as_bytes()) {
            warn!(channel = self.output.name(), error = %e, "echo to output device failed");
        }

        *self.last_echo.write() = code.to_string();
    }

    /// Run the relay on a background task until the handle is stopped
    pub fn spawn(mut self) -> RelayHandle {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();

        let join = tokio::spawn(async move {
            let interval_ms = self.poll_interval.as_millis() as u64;
            info!(
                input = self.input.name(),
                output = self.output.name(),
                interval_ms,
                "signal relay started"
            );

            let mut ticker = tokio::time::interval(self.poll_interval);
            while flag.load(Ordering::SeqCst) {
                ticker.tick().await;
                self.poll_once();
            }

            info!("signal relay stopped");
        });

        RelayHandle { running, join }
    }
}
