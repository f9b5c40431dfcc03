//! qbot - queue bot for a Twitch chat channel.
//!
//! Viewers type `!join`, `!leave` and `!queue` in chat; the channel owner
//! calls players up with `!pop [count]`.

pub mod bot;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod metrics;
pub mod network;
pub mod protocol;
pub mod state;
pub mod telemetry;
