//! Unified error handling for qbot.
//!
//! Errors are split by how far they reach:
//! - [`QueueError`]: recoverable queue conditions, reported back to chat.
//! - [`SayError`]: responder failures; rejected replies are dropped, transport
//!   failures end the session.
//! - [`SessionError`]: connection-fatal failures that trigger a reconnect.

use crate::protocol::CodecError;
use thiserror::Error;

// ============================================================================
// Queue Errors (queue engine operations)
// ============================================================================

/// Capacity and state violations raised by the queue engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue is full ({max} players)")]
    Full { max: usize },

    #[error("queue is empty")]
    Empty,
}

impl QueueError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Full { .. } => "queue_full",
            Self::Empty => "queue_empty",
        }
    }

    /// Text sent back to the channel when an operation fails.
    pub fn to_chat_reply(&self) -> String {
        match self {
            Self::Full { max } => format!("Queue is full ({max} players)"),
            Self::Empty => "Queue is empty".to_string(),
        }
    }
}

// ============================================================================
// Responder Errors
// ============================================================================

/// Errors returned when sending a reply to the channel.
#[derive(Debug, Error)]
pub enum SayError {
    #[error("message was empty")]
    EmptyMessage,

    #[error("message size {len} exceeded byte limit of {limit}")]
    MessageTooLong { len: usize, limit: usize },

    #[error("transport error: {0}")]
    Transport(#[from] CodecError),
}

impl SayError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyMessage => "empty_message",
            Self::MessageTooLong { .. } => "message_too_long",
            Self::Transport(_) => "transport",
        }
    }

    /// Whether the reply was refused at the boundary rather than lost in transit.
    pub fn is_rejected(&self) -> bool {
        !matches!(self, Self::Transport(_))
    }
}

// ============================================================================
// Session Errors (connection lifecycle)
// ============================================================================

/// Failures that end the current connection.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read from server: {0}")]
    Read(#[source] CodecError),

    #[error("failed to write to server: {0}")]
    Write(#[source] CodecError),

    #[error("connection closed by server")]
    Closed,
}

impl SessionError {
    /// Get a static error code string for metrics labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Connect { .. } => "connect",
            Self::Read(_) => "read",
            Self::Write(_) => "write",
            Self::Closed => "closed",
        }
    }
}
