//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use super::defaults::{TEMPLATE_CHANNEL, TEMPLATE_NAME, TEMPLATE_PASSWORD};
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("bot.name is required")]
    MissingName,
    #[error("bot.channel is required")]
    MissingChannel,
    #[error("bot.password is required")]
    MissingPassword,
    #[error("bot.server is required")]
    MissingServer,
    #[error("bot.port must be non-zero")]
    InvalidPort,
    #[error("bot.{field} must be a single word, got '{value}'")]
    NotAWord { field: &'static str, value: String },
    #[error("bot.{field} still holds the template placeholder")]
    Placeholder { field: &'static str },
    #[error("queue.max_size must be at least 1")]
    InvalidMaxSize,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let bot = &config.bot;

    if bot.name.is_empty() {
        errors.push(ValidationError::MissingName);
    } else if !is_word(&bot.name) {
        errors.push(ValidationError::NotAWord {
            field: "name",
            value: bot.name.clone(),
        });
    }

    if bot.channel.is_empty() {
        errors.push(ValidationError::MissingChannel);
    } else if !is_word(&bot.channel) {
        errors.push(ValidationError::NotAWord {
            field: "channel",
            value: bot.channel.clone(),
        });
    }

    if bot.password.is_empty() {
        errors.push(ValidationError::MissingPassword);
    }

    for (field, value, placeholder) in [
        ("name", &bot.name, TEMPLATE_NAME),
        ("channel", &bot.channel, TEMPLATE_CHANNEL),
        ("password", &bot.password, TEMPLATE_PASSWORD),
    ] {
        if value == placeholder {
            errors.push(ValidationError::Placeholder { field });
        }
    }

    if bot.server.is_empty() {
        errors.push(ValidationError::MissingServer);
    }
    if bot.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    if config.queue.max_size == 0 {
        errors.push(ValidationError::InvalidMaxSize);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Names and channels go on the wire unquoted.
fn is_word(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
