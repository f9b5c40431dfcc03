//! Prometheus metrics collection for qbot.
//!
//! Exposed on an optional HTTP endpoint (see [`crate::http`]).
//!
//! - `qbot_commands_total{command}` - Chat commands handled by type
//! - `qbot_command_duration_seconds{command}` - Command latency histogram
//! - `qbot_command_errors_total{command,error}` - Queue operation failures
//! - `qbot_queue_length` - Participants currently waiting

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::sync::OnceLock;

/// Global Prometheus registry for all metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters (monotonic increasing)
// ========================================================================

/// Replies written to the channel.
pub static MESSAGES_SENT: OnceLock<IntCounter> = OnceLock::new();

/// Replies refused at the responder boundary.
pub static MESSAGES_REJECTED: OnceLock<IntCounter> = OnceLock::new();

/// Sessions started (first connect plus reconnects).
pub static SESSIONS: OnceLock<IntCounter> = OnceLock::new();

pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Gauges
// ========================================================================

pub static QUEUE_LENGTH: OnceLock<IntGauge> = OnceLock::new();

/// Initialize the Prometheus metrics registry.
///
/// Must be called once at startup before any metrics are recorded. Recording
/// before `init` is a no-op.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            let m = $init.expect(concat!(stringify!($metric), " creation failed"));
            if let Err(e) = r.register(Box::new(m.clone())) {
                tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
            }
            let _ = $metric.set(m);
        };
    }

    register!(MESSAGES_SENT, IntCounter::new("qbot_messages_sent_total", "Replies sent to the channel"));
    register!(MESSAGES_REJECTED, IntCounter::new("qbot_messages_rejected_total", "Replies rejected before sending"));
    register!(SESSIONS, IntCounter::new("qbot_sessions_total", "Chat sessions started"));
    register!(QUEUE_LENGTH, IntGauge::new("qbot_queue_length", "Participants waiting in the queue"));

    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("qbot_commands_total", "Chat commands handled by type"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("qbot_command_duration_seconds", "Chat command latency by type")
            .buckets(vec![0.00001, 0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01]),
        &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("qbot_command_errors_total", "Queue operation failures by command"), &["command", "error"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Helper functions for metric updates
// ============================================================================

/// Record a command execution with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a failed queue operation.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
}

#[inline]
pub fn set_queue_length(len: usize) {
    if let Some(g) = QUEUE_LENGTH.get() {
        g.set(len as i64);
    }
}

#[inline]
pub fn record_message_sent() {
    if let Some(c) = MESSAGES_SENT.get() {
        c.inc();
    }
}

#[inline]
pub fn record_message_rejected() {
    if let Some(c) = MESSAGES_REJECTED.get() {
        c.inc();
    }
}

#[inline]
pub fn record_session() {
    if let Some(c) = SESSIONS.get() {
        c.inc();
    }
}
