//! Outbox publisher (C5). One task, ticking on a configurable interval,
//! mirroring `mqk-daemon/src/state.rs`'s `spawn_heartbeat` but doing real
//! work per tick: fetch a batch of unpublished rows, publish each, mark it
//! published — all inside one transaction, matching `outbox_worker.go`'s
//! `txm.InTx` wrapping of the whole iteration. If any row fails to publish,
//! the transaction rolls back and every row in the batch (including ones
//! already marked published earlier in the loop) reverts to unpublished, so
//! the next tick re-fetches and re-publishes the whole batch. Consumers
//! dedupe on envelope id, so that re-delivery is safe.

use std::sync::Arc;
use std::time::Duration;

use tb_bus::Producer;
use tb_db::TxManager;
use tb_domain::DomainError;
use tb_schemas::{AggregateType, OutboxEnvelope};

fn aggregate_type_of(raw: &str) -> AggregateType {
    match raw {
        "board" => AggregateType::Board,
        "column" => AggregateType::Column,
        _ => AggregateType::Task,
    }
}

/// Fetch and publish one batch inside a single transaction. Returns the
/// number of rows processed, or an error if any row failed to publish (in
/// which case the transaction has already been rolled back by `in_tx`).
async fn process_once(tx: &TxManager, producer: &Producer, topic: &str, batch_size: i64) -> anyhow::Result<usize> {
    let root = tx.root_ctx();
    let n = tx
        .in_tx(&root, |ctx| async move {
            let rows = tb_db::outbox::fetch_unpublished_for_update(&ctx, batch_size).await?;
            let n = rows.len();

            for row in rows {
                let envelope = OutboxEnvelope {
                    id: row.id,
                    event_type: row.event_type,
                    aggregate_type: aggregate_type_of(&row.aggregate_type),
                    aggregate_id: row.aggregate_id,
                    created_at: row.created_at,
                    payload: row.payload,
                    version: 1,
                };
                producer
                    .publish(topic, &envelope)
                    .await
                    .map_err(|err| DomainError::Transient(format!("outbox id {}: {err}", row.id)))?;
                tb_db::outbox::mark_published(&ctx, row.id).await?;
            }

            Ok(n)
        })
        .await?;

    Ok(n)
}

/// Spawn the publisher loop. Runs until the process exits.
pub fn spawn(tx: TxManager, producer: Arc<Producer>, topic: String, poll_interval: Duration, batch_size: i64) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(poll_interval);
        loop {
            ticker.tick().await;
            match process_once(&tx, &producer, &topic, batch_size).await {
                Ok(0) => {}
                Ok(n) => tracing::info!(count = n, "published outbox batch"),
                Err(err) => tracing::error!(%err, "outbox publish iteration failed, batch rolled back"),
            }
        }
    });
}
