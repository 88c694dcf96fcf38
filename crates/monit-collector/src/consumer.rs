//! Reference consumer
//!
//! Drains the hand-off queue one document at a time and reports what each
//! notification carries. Services are projected onto their own kind;
//! records that cannot be projected are reported and skipped.

use monit_core::{Document, ServiceView};
use tokio::sync::mpsc;

/// Summary of one consumed document
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConsumedDocument {
    pub projected: usize,
    pub skipped: usize,
}

/// Drain `queue` until every collector has been dropped
pub async fn run(mut queue: mpsc::Receiver<Document>) {
    let mut documents = 0u64;
    while let Some(document) = queue.recv().await {
        consume(&document);
        documents += 1;
    }
    tracing::info!(documents, "Notification queue closed, consumer stopping");
}

/// Report one document
pub fn consume(document: &Document) -> ConsumedDocument {
    let mut summary = ConsumedDocument::default();

    tracing::info!(
        id = %document.id,
        incarnation = %document.incarnation,
        version = %document.version,
        host = %document.server.local_hostname,
        uptime = document.server.uptime,
        services = document.services.len(),
        groups = document.service_groups.len(),
        "Notification"
    );

    if let Some(event) = &document.event {
        tracing::info!(
            service = %event.service,
            event_id = event.id,
            state = event.state,
            action = event.action,
            collected_at = ?event.collected_at(),
            message = %event.message,
            "Event"
        );
    }

    for service in &document.services {
        match service.project() {
            Ok(view) => {
                report(&view);
                summary.projected += 1;
            }
            Err(e) => {
                tracing::warn!(service = %service.name(), error = %e, "Skipping service");
                summary.skipped += 1;
            }
        }
    }

    summary
}

fn report(view: &ServiceView) {
    let envelope = view.envelope();
    tracing::debug!(
        service = %envelope.name,
        kind = %envelope.kind,
        status = envelope.status,
        collected_at = %envelope.collected_at,
        view = %serde_json::to_string(view).unwrap_or_default(),
        "Service"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_counts_projected_and_skipped() {
        let document = monit_core::parse(
            br#"<monit><services>
                <service type="3" name="sshd"><pid>1</pid></service>
                <service type="4" name="remote-host"/>
                <service type="5" name="web01"/>
            </services></monit>"#,
        )
        .unwrap();

        let summary = consume(&document);
        assert_eq!(
            summary,
            ConsumedDocument {
                projected: 2,
                skipped: 1
            }
        );
    }

    #[tokio::test]
    async fn test_run_stops_when_queue_closes() {
        let (tx, rx) = mpsc::channel(1);
        let consumer = tokio::spawn(run(rx));

        tx.send(monit_core::parse(b"<monit/>").unwrap()).await.unwrap();
        drop(tx);

        consumer.await.unwrap();
    }
}
