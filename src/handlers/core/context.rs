//! Command handler context and core types.

use crate::error::QueueError;
use crate::protocol::ChatEvent;
use crate::state::Queue;

/// Handler context passed to each command handler.
pub struct Context<'a> {
    /// The queue owned by the bot.
    pub queue: &'a mut Queue,
    /// The message that carried the command.
    pub event: &'a ChatEvent,
    /// Tokens after the command, split on single spaces. Empty tokens are kept.
    pub args: &'a [&'a str],
}

impl Context<'_> {
    /// Name of the participant who sent the command.
    pub fn sender(&self) -> &str {
        self.event.sender()
    }
}

/// Text to send back to the channel, if any.
pub type HandlerResult = Result<Option<String>, QueueError>;

/// A chat command.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult;
}
