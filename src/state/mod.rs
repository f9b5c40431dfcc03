//! State management module.
//!
//! Contains the participant queue owned by the bot.

mod queue;

pub use queue::{DEFAULT_MAX_SIZE, DEFAULT_POP_COUNT, PREVIEW_COUNT, Participant, Queue};
