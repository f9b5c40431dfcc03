//! The bot: configuration, queue and command registry, plus the reconnect loop.
//!
//! The queue lives here rather than in the [`Connection`] so that it survives
//! reconnects.

use crate::config::Config;
use crate::error::SessionError;
use crate::handlers::Registry;
use crate::metrics;
use crate::network::Connection;
use crate::state::Queue;
use std::future::Future;
use tracing::{error, info};

pub struct Bot {
    config: Config,
    queue: Queue,
    registry: Registry,
}

impl Bot {
    pub fn new(config: Config) -> Self {
        let queue = Queue::new(config.queue.max_size);
        let registry = Registry::new(config.bot.name.clone());
        Self {
            config,
            queue,
            registry,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    /// Run one session: connect, join, and process lines until it fails.
    pub async fn run_session(&mut self) -> Result<(), SessionError> {
        metrics::record_session();
        let mut conn =
            Connection::connect(&self.config.bot, self.config.timing.message_interval()).await?;

        let result = match conn.join_channel().await {
            Ok(()) => conn.run(&mut self.queue, &self.registry).await,
            Err(e) => Err(e),
        };

        info!(
            uptime_secs = conn.uptime().as_secs_f64(),
            "Closed connection"
        );
        result
    }

    /// Keep a session running until `shutdown` resolves.
    ///
    /// A failed session is torn down and a fresh one started after
    /// `timing.reconnect_delay_ms`.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let delay = self.config.timing.reconnect_delay();

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    return;
                }
                result = self.run_session() => {
                    if let Err(e) = result {
                        error!(error = %e, code = e.error_code(), "Session ended");
                    }
                }
            }

            info!(delay_ms = delay.as_millis() as u64, "Starting up again");
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested");
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }
}
