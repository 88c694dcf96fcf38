//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::collector::Collector;
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use axum::Router;
use monit_core::Document;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Collector daemon server
pub struct Server {
    config: DaemonConfig,
    collector: Collector,
}

impl Server {
    /// Create a server publishing accepted documents onto `queue`
    pub fn new(config: DaemonConfig, queue: mpsc::Sender<Document>) -> DaemonResult<Self> {
        config.validate()?;
        Ok(Self::assemble(config, queue))
    }

    /// Create a server together with a queue sized from `collector.queue_capacity`
    ///
    /// The receiver is the consumer's end of the queue.
    pub fn with_queue(config: DaemonConfig) -> DaemonResult<(Self, mpsc::Receiver<Document>)> {
        config.validate()?;
        let (tx, rx) = mpsc::channel(config.collector.queue_capacity);
        Ok((Self::assemble(config, tx), rx))
    }

    fn assemble(config: DaemonConfig, queue: mpsc::Sender<Document>) -> Self {
        let collector = Collector::from_config(queue, &config.collector);
        Self { config, collector }
    }

    pub fn router(&self) -> Router {
        create_router(
            AppState::new(self.collector.clone()),
            &self.config.collector.path,
            self.config.server.max_body_size,
        )
    }

    /// Run the server until a shutdown signal arrives
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let app = self.router();

        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Monit collector listening on {}", addr);
        tracing::info!(
            path = %self.config.collector.path,
            queue_capacity = self.config.collector.queue_capacity,
            publish_timeout_ms = self.config.collector.publish_timeout_ms,
            "Collector endpoint ready"
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("Monit collector shutting down");

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
