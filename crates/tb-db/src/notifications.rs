//! Consumer-side delivery record (C10). The unique index on `outbox_id` is
//! the idempotency guard described in §4.10/§8 invariant 3: a redelivered
//! envelope is an `ON CONFLICT DO NOTHING` no-op, not a duplicate row.

use serde_json::Value;
use uuid::Uuid;

use tb_domain::DomainError;

use crate::tx::RequestCtx;

/// Insert a history row for `outbox_id`. Returns `true` if this call
/// actually inserted the row (first delivery) and `false` if a row for this
/// `outbox_id` already existed (a redelivery).
#[allow(clippy::too_many_arguments)]
pub async fn record(
    ctx: &RequestCtx,
    outbox_id: Uuid,
    event_type: &str,
    aggregate_type: &str,
    aggregate_id: Uuid,
    payload: Value,
) -> Result<bool, DomainError> {
    let query = sqlx::query(
        r#"
        insert into notifications (id, outbox_id, event_type, aggregate_type, aggregate_id, payload)
        values ($1, $2, $3, $4, $5, $6)
        on conflict (outbox_id) do nothing
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(outbox_id)
    .bind(event_type)
    .bind(aggregate_type)
    .bind(aggregate_id)
    .bind(payload);
    let affected = ctx.execute(query).await?;
    Ok(affected > 0)
}
