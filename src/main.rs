//! qbot - queue bot for a Twitch chat channel.

use qbot::bot::Bot;
use qbot::config::{Config, validate};
use qbot::{http, metrics};
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "qbot.toml".to_string());

    if !Path::new(&config_path).exists() {
        Config::write_template(&config_path)?;
        error!(path = %config_path, "No config file found, wrote a template");
        error!("  Fill in name, channel and password, then start qbot again.");
        return Err(anyhow::anyhow!("missing config file {config_path}"));
    }

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        return Err(anyhow::anyhow!(
            "configuration has {} error(s)",
            errors.len()
        ));
    }

    info!(
        name = %config.bot.name,
        channel = %config.bot.channel,
        server = %config.bot.server,
        port = config.bot.port,
        max_size = config.queue.max_size,
        "Starting qbot"
    );

    // Convention: metrics_port = 0 disables the HTTP endpoint.
    match config.metrics_port {
        Some(port) if port != 0 => {
            metrics::init();
            let listener = http::bind(port).await.map_err(|e| {
                error!(port, error = %e, "Failed to bind metrics HTTP server");
                e
            })?;
            tokio::spawn(async move {
                if let Err(e) = http::serve(listener).await {
                    error!(error = %e, "Metrics HTTP server error");
                }
            });
        }
        _ => info!("Metrics disabled"),
    }

    let mut bot = Bot::new(config);
    bot.run(async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    })
    .await;

    info!(waiting = bot.queue().len(), "qbot stopped");
    Ok(())
}
