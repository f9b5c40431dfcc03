//! Twitch chat wire protocol.
//!
//! - [`codec`]: CRLF line framing for tokio.
//! - [`line`]: classification of inbound lines into pings and chat events.
//! - [`outbound`]: construction of the lines the bot sends.

pub mod codec;
pub mod line;
pub mod outbound;

pub use codec::{ChatCodec, CodecError};
pub use line::{ChatEvent, Line, parse_line};

/// Keep-alive probe sent by the Twitch chat server.
pub const PING_LINE: &str = "PING :tmi.twitch.tv";

/// The only accepted answer to [`PING_LINE`].
pub const PONG_LINE: &str = "PONG :tmi.twitch.tv";

/// Maximum size in bytes of a chat reply body.
pub const MAX_MESSAGE_BYTES: usize = 500;
