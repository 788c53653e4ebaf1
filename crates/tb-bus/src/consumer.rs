//! Bus consumer. Ported from
//! `original_source/notification-service/internal/infrastructure/kafka/consumer.go`:
//! one reader task per topic, fetch-then-handle-then-commit, and the commit
//! happens regardless of whether the handler succeeded — at-least-once
//! delivery pushes failure recovery into the handler (the DLQ), not into
//! redelivery of the same offset forever.

use std::sync::Arc;

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Message};

#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, msg: &BorrowedMessage<'_>) -> anyhow::Result<()>;
}

pub struct BusConsumer {
    brokers: String,
    group_id: String,
}

impl BusConsumer {
    pub fn new(brokers: impl Into<String>, group_id: impl Into<String>) -> Self {
        Self {
            brokers: brokers.into(),
            group_id: group_id.into(),
        }
    }

    /// Spawn one task per topic in `topics`, each owning its own consumer
    /// instance. Returns immediately; tasks run until the process exits or
    /// `shutdown` resolves.
    pub fn spawn_all(
        &self,
        topics: Vec<String>,
        handler: Arc<dyn MessageHandler>,
        mut shutdown: tokio::sync::watch::Receiver<bool>,
    ) -> Vec<tokio::task::JoinHandle<()>> {
        topics
            .into_iter()
            .map(|topic| {
                let brokers = self.brokers.clone();
                let group_id = self.group_id.clone();
                let handler = handler.clone();
                let mut shutdown = shutdown.clone();
                tokio::spawn(async move {
                    let consumer: StreamConsumer = match ClientConfig::new()
                        .set("bootstrap.servers", &brokers)
                        .set("group.id", &group_id)
                        .set("enable.auto.commit", "false")
                        .create()
                    {
                        Ok(c) => c,
                        Err(err) => {
                            tracing::error!(%topic, %err, "failed to create kafka consumer");
                            return;
                        }
                    };
                    if let Err(err) = Consumer::subscribe(&consumer, &[topic.as_str()]) {
                        tracing::error!(%topic, %err, "failed to subscribe");
                        return;
                    }

                    loop {
                        tokio::select! {
                            _ = shutdown.changed() => {
                                if *shutdown.borrow() {
                                    return;
                                }
                            }
                            recv = consumer.recv() => {
                                match recv {
                                    Ok(msg) => {
                                        if let Err(err) = handler.handle(&msg).await {
                                            tracing::error!(%topic, %err, "handler returned error");
                                        }
                                        if let Err(err) = consumer.commit_message(&msg, CommitMode::Async) {
                                            tracing::error!(%topic, %err, "failed to commit offset");
                                        }
                                    }
                                    Err(err) => {
                                        tracing::error!(%topic, %err, "failed to fetch message");
                                    }
                                }
                            }
                        }
                    }
                })
            })
            .collect()
    }
}
