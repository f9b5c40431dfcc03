//! Queue commands: `!join`, `!leave`, `!queue` and the owner's `!pop`.

use super::core::{Context, Handler, HandlerResult};
use crate::state::DEFAULT_POP_COUNT;
use tracing::info;

pub struct JoinHandler;

impl Handler for JoinHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        info!(sender = %ctx.sender(), "Received request to join queue");
        let name = ctx.sender().to_string();
        ctx.queue.join(&name).map(Some)
    }
}

pub struct LeaveHandler;

impl Handler for LeaveHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        info!(sender = %ctx.sender(), "Received request to leave queue");
        let name = ctx.sender().to_string();
        Ok(Some(ctx.queue.leave(&name)))
    }
}

pub struct ShowQueueHandler;

impl Handler for ShowQueueHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        Ok(Some(ctx.queue.render()))
    }
}

/// `!pop [count]`
pub struct PopHandler;

impl Handler for PopHandler {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult {
        let count = parse_pop_count(ctx.args);
        info!(count, "Received request to pop players");
        ctx.queue.pop_front(count).map(Some)
    }
}

/// Count from the first argument; anything but a positive integer means the default.
pub fn parse_pop_count(args: &[&str]) -> usize {
    match args.first() {
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) if n > 0 => n,
            _ => {
                info!(arg = %raw, "Couldn't read pop count, using default");
                DEFAULT_POP_COUNT
            }
        },
        None => DEFAULT_POP_COUNT,
    }
}
