//! Core configuration types and loading.

use super::defaults::{
    TEMPLATE_CHANNEL, TEMPLATE_NAME, TEMPLATE_PASSWORD, default_max_size,
    default_message_interval_ms, default_port, default_reconnect_delay_ms, default_server,
};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Bot configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Prometheus metrics HTTP port. Absent or 0 disables the endpoint.
    pub metrics_port: Option<u16>,
    /// Identity and connection settings.
    pub bot: Settings,
    /// Queue limits.
    #[serde(default)]
    pub queue: QueueConfig,
    /// Pacing of the read loop and reconnects.
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(content)?;
        config.bot.channel = config.bot.channel.trim_start_matches('#').to_string();
        Ok(config)
    }

    /// Configuration filled with placeholder credentials and defaults.
    pub fn template_config() -> Self {
        Self {
            metrics_port: None,
            bot: Settings {
                name: TEMPLATE_NAME.to_string(),
                channel: TEMPLATE_CHANNEL.to_string(),
                password: TEMPLATE_PASSWORD.to_string(),
                server: default_server(),
                port: default_port(),
            },
            queue: QueueConfig::default(),
            timing: TimingConfig::default(),
        }
    }

    /// TOML text for a fresh config file.
    pub fn template() -> String {
        let config = Self::template_config();
        format!(
            r#"# qbot configuration

# Port for the Prometheus /metrics endpoint (0 disables it).
metrics_port = 0

[bot]
# Twitch account the bot logs in as. Also the only account allowed to !pop.
name = "{name}"
# Channel to watch, without the leading '#'.
channel = "{channel}"
# OAuth token, e.g. "oauth:abcdef0123456789".
password = "{password}"
server = "{server}"
port = {port}

[queue]
max_size = {max_size}

[timing]
message_interval_ms = {interval}
reconnect_delay_ms = {reconnect}
"#,
            name = config.bot.name,
            channel = config.bot.channel,
            password = config.bot.password,
            server = config.bot.server,
            port = config.bot.port,
            max_size = config.queue.max_size,
            interval = config.timing.message_interval_ms,
            reconnect = config.timing.reconnect_delay_ms,
        )
    }

    /// Write [`Config::template`] to `path`.
    pub fn write_template<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        std::fs::write(path, Self::template())?;
        Ok(())
    }
}

/// Information needed to join a chat server and channel.
#[derive(Clone, Deserialize)]
pub struct Settings {
    /// Login name; doubles as the owner identity.
    pub name: String,
    /// Channel name without `#`.
    pub channel: String,
    /// OAuth password.
    pub password: String,
    #[serde(default = "default_server")]
    pub server: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Settings {
    /// `host:port` for the TCP connection.
    pub fn address(&self) -> String {
        format!("{}:{}", self.server, self.port)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("name", &self.name)
            .field("channel", &self.channel)
            .field("password", &"<hidden>")
            .field("server", &self.server)
            .field("port", &self.port)
            .finish()
    }
}

/// Queue limits.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueConfig {
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_size: default_max_size(),
        }
    }
}

/// Read-loop and reconnect pacing.
#[derive(Debug, Clone, Deserialize)]
pub struct TimingConfig {
    /// Pause after each processed line, throttling outbound traffic.
    #[serde(default = "default_message_interval_ms")]
    pub message_interval_ms: u64,
    /// Back-off before opening a new session after a failure.
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,
}

impl TimingConfig {
    pub fn message_interval(&self) -> Duration {
        Duration::from_millis(self.message_interval_ms)
    }

    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            message_interval_ms: default_message_interval_ms(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
        }
    }
}
