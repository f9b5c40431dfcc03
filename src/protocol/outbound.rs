//! Lines sent by the bot.

use super::PONG_LINE;

pub fn pass(password: &str) -> String {
    format!("PASS {password}")
}

pub fn nick(name: &str) -> String {
    format!("NICK {name}")
}

pub fn join(channel: &str) -> String {
    format!("JOIN #{channel}")
}

pub fn pong() -> String {
    PONG_LINE.to_string()
}

/// A message to the channel.
pub fn privmsg(channel: &str, text: &str) -> String {
    format!("PRIVMSG #{channel} :{text}")
}

/// Registration burst, in the order the server expects it.
pub fn handshake(password: &str, name: &str, channel: &str) -> [String; 3] {
    [pass(password), nick(name), join(channel)]
}
