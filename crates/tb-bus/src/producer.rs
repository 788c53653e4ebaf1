//! Outbox-event producer. Partition key is the event's `aggregate_id`
//! (DESIGN.md's resolution of the §6-vs-§4.5 partition-key discrepancy),
//! which keeps every event for one board/column/task in order on a single
//! partition.

use std::time::Duration;

use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};

use tb_schemas::OutboxEnvelope;

pub struct Producer {
    inner: FutureProducer,
}

impl Producer {
    pub fn new(brokers: &str, acks: &str) -> anyhow::Result<Self> {
        let inner = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("acks", acks)
            .set("enable.idempotence", "true")
            .create()?;
        Ok(Self { inner })
    }

    pub async fn publish(&self, topic: &str, envelope: &OutboxEnvelope) -> anyhow::Result<()> {
        let key = envelope.aggregate_id.to_string();
        let payload = serde_json::to_vec(envelope)?;
        let record = FutureRecord::to(topic).key(&key).payload(&payload);
        self.inner
            .send(record, Duration::from_secs(5))
            .await
            .map_err(|(err, _)| anyhow::anyhow!("kafka send failed: {err}"))?;
        Ok(())
    }

    /// Publish any serialisable value keyed by `key`. Used by the
    /// dead-letter path, which has no `OutboxEnvelope` to key on.
    pub async fn publish_raw<T: serde::Serialize>(&self, topic: &str, key: &str, value: &T) -> anyhow::Result<()> {
        let payload = serde_json::to_vec(value)?;
        let record = FutureRecord::to(topic).key(key).payload(&payload);
        self.inner
            .send(record, Duration::from_secs(5))
            .await
            .map_err(|(err, _)| anyhow::anyhow!("kafka send failed: {err}"))?;
        Ok(())
    }
}
