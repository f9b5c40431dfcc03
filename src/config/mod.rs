//! Configuration loading and management.
//!
//! - [`types`]: config structs and TOML loading
//! - [`defaults`]: serde default functions and template placeholders
//! - [`validation`]: startup checks

mod defaults;
mod types;
mod validation;

pub use types::{Config, ConfigError, QueueConfig, Settings, TimingConfig};
pub use validation::{ValidationError, validate};
