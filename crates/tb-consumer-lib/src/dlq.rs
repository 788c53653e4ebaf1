//! Dead-letter publishing. Grounded on
//! `internal/infrastructure/kafka/dlq.go`: the original message's key,
//! payload, and headers are carried through base64-encoded so an operator
//! can replay or inspect the record without needing a schema, alongside the
//! error that sent it here.

use chrono::Utc;
use rdkafka::message::{BorrowedMessage, Headers, Message};

use tb_bus::Producer;
use tb_schemas::{encode_header_value, DlqEnvelope};

/// Build the DLQ envelope for `msg`, which failed with `error`.
pub fn build_envelope(msg: &BorrowedMessage<'_>, source_topic: &str, error: String) -> DlqEnvelope {
    let key_base64 = msg
        .key()
        .filter(|k| !k.is_empty())
        .map(|k| base64::Engine::encode(&base64::engine::general_purpose::STANDARD, k));
    let value_base64 = msg
        .payload()
        .filter(|v| !v.is_empty())
        .map(|v| base64::Engine::encode(&base64::engine::general_purpose::STANDARD, v));

    let mut headers = std::collections::BTreeMap::new();
    if let Some(h) = msg.headers() {
        for i in 0..h.count() {
            let header = h.get(i);
            headers.insert(header.key.to_string(), encode_header_value(header.value.unwrap_or(&[])));
        }
    }

    DlqEnvelope {
        error,
        source_topic: source_topic.to_string(),
        source_partition: msg.partition(),
        source_offset: msg.offset(),
        timestamp: Utc::now(),
        key_base64,
        value_base64,
        headers,
    }
}

/// Publish `envelope` to `dlq_topic`. Errors are logged, not propagated —
/// the caller (the router) always reports success to `BusConsumer` so the
/// original offset still commits (§4.10's at-least-once contract).
pub async fn publish(producer: &Producer, dlq_topic: &str, envelope: &DlqEnvelope) {
    if let Err(err) = producer.publish_raw(dlq_topic, &envelope.source_offset.to_string(), envelope).await {
        tracing::error!(%dlq_topic, %err, "failed to publish to dead-letter topic");
    }
}
