//! Integration test common infrastructure.
//!
//! Provides a fake chat server the bot connects to, and helpers for running
//! the bot against it.

pub mod server;

#[allow(unused_imports)]
pub use server::{BotPeer, FakeChatServer, RunningBot, spawn_bot, test_config};
