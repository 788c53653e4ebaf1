//! The consumer's `MessageHandler`. Ported from
//! `internal/infrastructure/kafka/outbox_handler.go`: decode the envelope,
//! dispatch by `event_type`, record an idempotent delivery row, hand the
//! text to the `Notifier`. Any failure short of an unknown event type goes
//! to the DLQ; the handler itself always reports success so `BusConsumer`
//! commits the offset regardless (§4.10).

use std::sync::Arc;

use async_trait::async_trait;
use rdkafka::message::{BorrowedMessage, Message};

use tb_bus::{MessageHandler, Producer};
use tb_db::TxManager;
use tb_schemas::OutboxEnvelope;

use crate::dlq;
use crate::notifier::Notifier;
use crate::text;

pub struct NotificationRouter {
    tx: TxManager,
    notifier: Arc<dyn Notifier>,
    dlq_producer: Producer,
    dlq_topic: String,
}

impl NotificationRouter {
    pub fn new(tx: TxManager, notifier: Arc<dyn Notifier>, dlq_producer: Producer, dlq_topic: impl Into<String>) -> Self {
        Self {
            tx,
            notifier,
            dlq_producer,
            dlq_topic: dlq_topic.into(),
        }
    }

    async fn to_dlq(&self, msg: &BorrowedMessage<'_>, source_topic: &str, error: String) {
        tracing::warn!(%source_topic, %error, "routing message to dead-letter topic");
        let envelope = dlq::build_envelope(msg, source_topic, error);
        dlq::publish(&self.dlq_producer, &self.dlq_topic, &envelope).await;
    }
}

#[async_trait]
impl MessageHandler for NotificationRouter {
    async fn handle(&self, msg: &BorrowedMessage<'_>) -> anyhow::Result<()> {
        let source_topic = msg.topic().to_string();

        let raw = match msg.payload() {
            Some(bytes) => bytes,
            None => {
                self.to_dlq(msg, &source_topic, "message has no payload".to_string()).await;
                return Ok(());
            }
        };

        let envelope: OutboxEnvelope = match serde_json::from_slice(raw) {
            Ok(e) => e,
            Err(err) => {
                self.to_dlq(msg, &source_topic, format!("envelope decode failed: {err}")).await;
                return Ok(());
            }
        };

        let text = match text::render(&envelope.event_type, &envelope.payload) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(event_type = %envelope.event_type, "dropping unrecognized event type");
                return Ok(());
            }
            Err(err) => {
                self.to_dlq(
                    msg,
                    &source_topic,
                    format!("payload decode failed for {}: {err}", envelope.event_type),
                )
                .await;
                return Ok(());
            }
        };

        let ctx = self.tx.root_ctx();
        let aggregate_type = match envelope.aggregate_type {
            tb_schemas::AggregateType::Board => "board",
            tb_schemas::AggregateType::Column => "column",
            tb_schemas::AggregateType::Task => "task",
        };
        let inserted = match tb_db::notifications::record(
            &ctx,
            envelope.id,
            &envelope.event_type,
            aggregate_type,
            envelope.aggregate_id,
            envelope.payload.clone(),
        )
        .await
        {
            Ok(inserted) => inserted,
            Err(err) => {
                self.to_dlq(msg, &source_topic, format!("failed to record notification: {err}")).await;
                return Ok(());
            }
        };

        if inserted {
            self.notifier.notify(&text);
        } else {
            tracing::debug!(outbox_id = %envelope.id, "duplicate delivery, notification already recorded");
        }

        Ok(())
    }
}
