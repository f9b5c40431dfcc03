//! Chat command handlers.
//!
//! The [`Registry`] splits a message into a command token and arguments and
//! dispatches to one of the handlers in [`queue`].

mod core;
mod queue;

pub use self::core::{Context, Handler, HandlerResult, Registry};
pub use queue::{JoinHandler, LeaveHandler, PopHandler, ShowQueueHandler, parse_pop_count};
