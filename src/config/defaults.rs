//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use crate::state::DEFAULT_MAX_SIZE;

// =============================================================================
// Connection Defaults
// =============================================================================

pub fn default_server() -> String {
    "irc.chat.twitch.tv".to_string()
}

pub fn default_port() -> u16 {
    6667
}

// =============================================================================
// Queue Defaults
// =============================================================================

pub fn default_max_size() -> usize {
    DEFAULT_MAX_SIZE
}

// =============================================================================
// Timing Defaults
// =============================================================================

/// Roughly 2/3 of a second between processed lines.
pub fn default_message_interval_ms() -> u64 {
    667
}

pub fn default_reconnect_delay_ms() -> u64 {
    1000
}

// =============================================================================
// Template Placeholders
// =============================================================================

pub const TEMPLATE_NAME: &str = "your_twitch_name";
pub const TEMPLATE_CHANNEL: &str = "your_twitch_channel";
pub const TEMPLATE_PASSWORD: &str = "your_oauth_password_here";
