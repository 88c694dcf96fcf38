//! Notification collector
//!
//! Parses one request body per call and hands the document to the consumer
//! over a bounded queue. A full queue holds the request until the consumer
//! frees a slot or the publish timeout expires.

use crate::config::CollectorConfig;
use crate::error::{CollectError, CollectResult};
use axum::body::Bytes;
use monit_core::{Document, Parser};
use std::time::Duration;
use tokio::sync::mpsc::{self, error::SendTimeoutError};

/// Parses notifications and publishes them onto the hand-off queue
#[derive(Debug, Clone)]
pub struct Collector {
    queue: mpsc::Sender<Document>,
    publish_timeout: Duration,
}

impl Collector {
    /// Create a collector publishing onto `queue`
    pub fn new(queue: mpsc::Sender<Document>, publish_timeout: Duration) -> Self {
        Self {
            queue,
            publish_timeout,
        }
    }

    pub fn from_config(queue: mpsc::Sender<Document>, config: &CollectorConfig) -> Self {
        Self::new(queue, config.publish_timeout())
    }

    /// Parse a request body and publish the document
    pub async fn collect(&self, body: Bytes) -> CollectResult<()> {
        let document = Parser::new(body.as_ref()).parse().map_err(|e| {
            tracing::warn!(error = %e, bytes = body.len(), "Rejected notification");
            e
        })?;
        drop(body);

        tracing::info!(
            id = %document.id,
            host = %document.server.local_hostname,
            services = document.services.len(),
            event = document.event.is_some(),
            "Accepted notification"
        );

        self.publish(document).await
    }

    /// Hand a document to the consumer, waiting at most the publish timeout
    pub async fn publish(&self, document: Document) -> CollectResult<()> {
        match self.queue.send_timeout(document, self.publish_timeout).await {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(document)) => {
                tracing::warn!(
                    id = %document.id,
                    timeout_ms = self.publish_timeout.as_millis() as u64,
                    "Consumer did not accept notification in time"
                );
                Err(CollectError::PublishTimeout(self.publish_timeout))
            }
            Err(SendTimeoutError::Closed(_)) => {
                tracing::error!("Notification queue closed");
                Err(CollectError::QueueClosed)
            }
        }
    }

    /// Total queue slots
    pub fn queue_capacity(&self) -> usize {
        self.queue.max_capacity()
    }

    /// Queue slots currently free
    pub fn queue_available(&self) -> usize {
        self.queue.capacity()
    }
}
