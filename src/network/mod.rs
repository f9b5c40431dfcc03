//! Network layer.
//!
//! A [`Connection`] is one session with the chat server: connect, register,
//! then read and answer lines until the transport fails.

pub mod connection;

pub use connection::{ChannelResponder, Connection, Responder, check_reply};
