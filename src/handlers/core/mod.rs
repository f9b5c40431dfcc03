//! Core handler infrastructure.
//!
//! The [`Registry`] maps command tokens to handlers and owns the owner-only
//! command table; [`Context`] carries what a handler may touch.

pub mod context;
pub mod registry;

pub use context::{Context, Handler, HandlerResult};
pub use registry::Registry;
