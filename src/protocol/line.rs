//! Inbound line classification.
//!
//! Every line read from the server becomes exactly one [`Line`]. Anything that
//! is not the keep-alive probe or a channel message is [`Line::Ignored`];
//! malformed input is never an error.

use super::PING_LINE;
use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

/// `:<sender>!<user>@<host>.tmi.twitch.tv PRIVMSG #<channel>[ :<body>]`
static CHAT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:([0-9A-Za-z_]+)![0-9A-Za-z_]+@[0-9A-Za-z_]+\.tmi\.twitch\.tv PRIVMSG #[0-9A-Za-z_]+(?: :(.*))?$")
        .expect("chat line pattern is valid")
});

/// A single message posted to the channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    sender: String,
    text: String,
    received_at: DateTime<Utc>,
}

impl ChatEvent {
    /// Create an event stamped with the current time.
    pub fn new(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            received_at: Utc::now(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }
}

/// Classification of one inbound line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// Server keep-alive; must be answered immediately.
    Ping,
    /// A channel message.
    Chat(ChatEvent),
    /// Joins, parts, numerics and anything unrecognized.
    Ignored,
}

/// Classify a raw line (without its terminator).
pub fn parse_line(raw: &str) -> Line {
    if raw == PING_LINE {
        return Line::Ping;
    }

    match CHAT_LINE.captures(raw) {
        Some(caps) => {
            let sender = caps.get(1).map_or("", |m| m.as_str());
            let text = caps.get(2).map_or("", |m| m.as_str());
            Line::Chat(ChatEvent::new(sender, text))
        }
        None => Line::Ignored,
    }
}
