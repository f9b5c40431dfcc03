//! Telemetry utilities for chat command timing and spans.

use std::time::Instant;
use tracing::{Span, info_span};

/// Span covering one chat command, from dispatch to reply.
pub fn command_span(command: &str, sender: &str) -> Span {
    info_span!("command", name = %command, sender = %sender)
}

/// Records command latency when dropped.
pub struct CommandTimer<'a> {
    command: &'a str,
    start: Instant,
}

impl<'a> CommandTimer<'a> {
    pub fn start(command: &'a str) -> Self {
        Self {
            command,
            start: Instant::now(),
        }
    }
}

impl Drop for CommandTimer<'_> {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        tracing::trace!(command = %self.command, micros = elapsed.as_micros() as u64, "Command finished");
        crate::metrics::record_command(self.command, elapsed.as_secs_f64());
    }
}
