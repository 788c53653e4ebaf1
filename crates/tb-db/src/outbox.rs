//! Outbox store (C4/C5). Events are written in the same transaction as the
//! aggregate they describe, then published by the daemon's background
//! worker. `fetch_unpublished_for_update` and `mark_published` are meant to
//! run inside the same `TxManager::in_tx` block as each other: the row lock
//! from `for update skip locked` only holds for the lifetime of that
//! transaction, so a crash between the two calls rolls the whole batch back
//! and the rows stay unpublished, ready for the next tick. There is no
//! separate claimed/in-flight status to reconcile after a crash, matching
//! `outbox_worker.go`'s single `txm.InTx` wrapping of the whole iteration.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::Row;
use uuid::Uuid;

use tb_domain::events::AggregateKind;
use tb_domain::{DomainError, DomainEvent};

use crate::tx::RequestCtx;

#[derive(Debug, Clone)]
pub struct OutboxRow {
    pub id: Uuid,
    pub event_type: String,
    pub aggregate_type: String,
    pub aggregate_id: Uuid,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

fn aggregate_type_str(kind: AggregateKind) -> &'static str {
    match kind {
        AggregateKind::Board => "board",
        AggregateKind::Column => "column",
        AggregateKind::Task => "task",
    }
}

fn row_to_outbox(row: PgRow) -> Result<OutboxRow, DomainError> {
    Ok(OutboxRow {
        id: row.try_get("outbox_id").map_err(crate::error::map_sqlx_err)?,
        event_type: row.try_get("event_type").map_err(crate::error::map_sqlx_err)?,
        aggregate_type: row.try_get("aggregate_type").map_err(crate::error::map_sqlx_err)?,
        aggregate_id: row.try_get("aggregate_id").map_err(crate::error::map_sqlx_err)?,
        payload: row.try_get("payload").map_err(crate::error::map_sqlx_err)?,
        created_at: row.try_get("created_at_utc").map_err(crate::error::map_sqlx_err)?,
    })
}

/// Append one row per event, in the caller's transaction. Call this from
/// inside the same `in_tx` block that persists the aggregate so both writes
/// commit or roll back together.
pub async fn enqueue(ctx: &RequestCtx, events: &[DomainEvent]) -> Result<(), DomainError> {
    for event in events {
        let query = sqlx::query(
            r#"
            insert into outbox_events
                (outbox_id, event_type, aggregate_type, aggregate_id, payload, created_at_utc)
            values ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(event.name())
        .bind(aggregate_type_str(event.aggregate_kind()))
        .bind(event.aggregate_id())
        .bind(event.payload_json())
        .bind(event.at());
        ctx.execute(query).await?;
    }
    Ok(())
}

/// Select up to `limit` unpublished rows, oldest first, holding their row
/// locks for the rest of the caller's transaction. `ctx` must come from
/// `TxManager::in_tx` — the lock (and the at-least-once guarantee it buys)
/// only holds for as long as that transaction stays open. `skip locked` lets
/// a second publisher process run concurrently without blocking on rows the
/// first one already has open.
pub async fn fetch_unpublished_for_update(ctx: &RequestCtx, limit: i64) -> Result<Vec<OutboxRow>, DomainError> {
    let query = sqlx::query(
        r#"
        select outbox_id, event_type, aggregate_type, aggregate_id, payload, created_at_utc
        from outbox_events
        where published_at_utc is null
        order by created_at_utc asc, outbox_id asc
        limit $1
        for update skip locked
        "#,
    )
    .bind(limit);

    let rows = ctx.fetch_all_raw(query).await?;
    rows.into_iter().map(row_to_outbox).collect()
}

/// Mark `id` published. Must run in the same transaction as the
/// `fetch_unpublished_for_update` call that selected it, so the row lock is
/// still held and nothing else can observe it as unpublished in between.
pub async fn mark_published(ctx: &RequestCtx, id: Uuid) -> Result<(), DomainError> {
    let query = sqlx::query("update outbox_events set published_at_utc = now() where outbox_id = $1").bind(id);
    ctx.execute(query).await?;
    Ok(())
}
