//! Monit collector daemon
//!
//! Accepts monit agent notifications over HTTP, decodes them and hands each
//! document to a consumer task through a bounded queue.

use clap::Parser;
use monit_collector::config::DaemonConfig;
use monit_collector::error::{DaemonError, DaemonResult};
use monit_collector::{consumer, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Monit collector CLI
#[derive(Parser)]
#[command(name = "monit-collectord")]
#[command(about = "Monit collector - receives monit agent notifications", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MONIT_COLLECTOR_CONFIG")]
    config: Option<String>,

    /// Listen address, overrides the configuration file
    #[arg(short, long, env = "MONIT_COLLECTOR_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, env = "MONIT_COLLECTOR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "MONIT_COLLECTOR_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        "Starting monit collector"
    );

    let (server, rx) = Server::with_queue(config)?;
    let consumer = tokio::spawn(consumer::run(rx));

    server.run().await?;

    // The server owned the last sender; the consumer finishes what is queued.
    if let Err(e) = consumer.await {
        tracing::error!(error = %e, "Consumer task failed");
    }

    Ok(())
}
