//! Command handler registry and dispatch.

use super::context::{Context, Handler, HandlerResult};
use crate::handlers::queue::{JoinHandler, LeaveHandler, PopHandler, ShowQueueHandler};
use crate::protocol::ChatEvent;
use crate::state::Queue;
use crate::telemetry::{CommandTimer, command_span};
use std::collections::HashMap;
use tracing::debug;

/// Registry of chat command handlers.
pub struct Registry {
    /// Commands anyone in the channel may use.
    handlers: HashMap<&'static str, Box<dyn Handler>>,
    /// Commands restricted to the owner.
    owner_handlers: HashMap<&'static str, Box<dyn Handler>>,
    owner: String,
}

impl Registry {
    /// Create a registry with every command registered.
    ///
    /// `owner` is compared verbatim against the sender of each message.
    pub fn new(owner: impl Into<String>) -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();
        handlers.insert("!join", Box::new(JoinHandler));
        handlers.insert("!leave", Box::new(LeaveHandler));
        handlers.insert("!queue", Box::new(ShowQueueHandler));

        let mut owner_handlers: HashMap<&'static str, Box<dyn Handler>> = HashMap::new();
        owner_handlers.insert("!pop", Box::new(PopHandler));

        Self {
            handlers,
            owner_handlers,
            owner: owner.into(),
        }
    }

    /// Whether `sender` may use owner-only commands.
    pub fn is_owner(&self, sender: &str) -> bool {
        sender == self.owner
    }

    /// Route a chat message to its command handler.
    ///
    /// Messages that are not commands, and owner-only commands from anyone
    /// else, return `Ok(None)`. Errors from the handler are returned as-is.
    pub fn dispatch(&self, queue: &mut Queue, event: &ChatEvent) -> HandlerResult {
        let tokens: Vec<&str> = event.text().split(' ').collect();
        let Some((command, args)) = tokens.split_first() else {
            return Ok(None);
        };

        let handler = self.handlers.get(*command).or_else(|| {
            let owner_only = self.owner_handlers.get(*command)?;
            if self.is_owner(event.sender()) {
                Some(owner_only)
            } else {
                debug!(sender = %event.sender(), command = %command, "Ignoring owner-only command");
                None
            }
        });

        let Some(handler) = handler else {
            return Ok(None);
        };

        let _span = command_span(command, event.sender()).entered();
        let _timer = CommandTimer::start(command);
        let mut ctx = Context { queue, event, args };
        handler.handle(&mut ctx)
    }
}
