//! Column repository, including the dense-position maintenance that keeps
//! `{0..N-1}` gap-free per board after an insert, move, or delete.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use tb_domain::ordering::{calc_shift, clamp};
use tb_domain::value_objects::Position;
use tb_domain::{Column, DomainError};

use crate::tx::RequestCtx;

#[derive(sqlx::FromRow)]
struct ColumnRecord {
    id: Uuid,
    board_id: Uuid,
    position: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ColumnRecord {
    fn into_domain(self) -> Result<Column, DomainError> {
        Ok(Column::rehydrate(
            self.id,
            self.board_id,
            Position::new(self.position)?,
            self.created_at,
            self.updated_at,
        ))
    }
}

pub async fn save(ctx: &RequestCtx, column: &Column) -> Result<(), DomainError> {
    let query = sqlx::query(
        r#"
        insert into columns (id, board_id, position, created_at, updated_at)
        values ($1, $2, $3, $4, $5)
        on conflict (id) do update set
            position = excluded.position,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(column.id())
    .bind(column.board_id())
    .bind(column.position().get())
    .bind(column.created_at())
    .bind(column.updated_at());
    ctx.execute(query).await?;
    Ok(())
}

pub async fn get(ctx: &RequestCtx, id: Uuid) -> Result<Option<Column>, DomainError> {
    let query =
        sqlx::query_as::<_, ColumnRecord>("select id, board_id, position, created_at, updated_at from columns where id = $1")
            .bind(id);
    match ctx.fetch_optional(query).await? {
        Some(record) => Ok(Some(record.into_domain()?)),
        None => Ok(None),
    }
}

pub async fn list_for_board(ctx: &RequestCtx, board_id: Uuid) -> Result<Vec<Column>, DomainError> {
    let query = sqlx::query_as::<_, ColumnRecord>(
        "select id, board_id, position, created_at, updated_at from columns where board_id = $1 order by position asc",
    )
    .bind(board_id);
    ctx.fetch_all(query)
        .await?
        .into_iter()
        .map(ColumnRecord::into_domain)
        .collect()
}

/// Bulk variant of [`list_for_board`] for assembling several boards' worth
/// of columns in one round trip (`GetBoardFull`'s board is a single id, but
/// `ListBoards` needs every missed board's columns at once).
pub async fn list_for_boards(ctx: &RequestCtx, board_ids: &[Uuid]) -> Result<Vec<Column>, DomainError> {
    if board_ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = sqlx::query_as::<_, ColumnRecord>(
        "select id, board_id, position, created_at, updated_at from columns where board_id = any($1) order by board_id, position asc",
    )
    .bind(board_ids);
    ctx.fetch_all(query)
        .await?
        .into_iter()
        .map(ColumnRecord::into_domain)
        .collect()
}

/// Row-locking read used before a move/delete so concurrent reorderings of
/// the same board serialize on the row locks rather than racing on position
/// arithmetic. Postgres disallows `FOR UPDATE` on an aggregate query, so the
/// rows are locked individually and counted in memory.
pub async fn count_for_board(ctx: &RequestCtx, board_id: Uuid) -> Result<i64, DomainError> {
    let query =
        sqlx::query_as::<_, (Uuid,)>("select id from columns where board_id = $1 order by id for update").bind(board_id);
    Ok(ctx.fetch_all(query).await?.len() as i64)
}

/// Fetch `board_id` for a column without materialising the full aggregate —
/// used by use-cases that only need it to resolve which board's cache entry
/// to invalidate after a task/column mutation.
pub async fn board_id_of(ctx: &RequestCtx, id: Uuid) -> Result<Option<Uuid>, DomainError> {
    let query = sqlx::query_as::<_, (Uuid,)>("select board_id from columns where id = $1").bind(id);
    Ok(ctx.fetch_optional(query).await?.map(|(board_id,)| board_id))
}

pub async fn delete(ctx: &RequestCtx, id: Uuid) -> Result<(), DomainError> {
    let query = sqlx::query("delete from columns where id = $1").bind(id);
    let affected = ctx.execute(query).await?;
    if affected == 0 {
        return Err(DomainError::NotFound(format!("column {id}")));
    }
    Ok(())
}

/// Shift every sibling whose position falls in `[from_incl, to_incl]` by
/// `delta`, within `board_id`, excluding `moving_id` itself.
async fn shift_siblings(
    ctx: &RequestCtx,
    board_id: Uuid,
    moving_id: Uuid,
    from_incl: i64,
    to_incl: i64,
    delta: i64,
) -> Result<(), DomainError> {
    let query = sqlx::query(
        r#"
        update columns
        set position = position + $1, updated_at = now()
        where board_id = $2 and id <> $3 and position between $4 and $5
        "#,
    )
    .bind(delta)
    .bind(board_id)
    .bind(moving_id)
    .bind(from_incl)
    .bind(to_incl);
    ctx.execute(query).await?;
    Ok(())
}

/// Insert a new column at `requested`, clamped into `[0, n]`, shifting any
/// column already at or after that position up by one.
pub async fn make_room_for_insert(ctx: &RequestCtx, board_id: Uuid, requested: i64) -> Result<Position, DomainError> {
    let n = count_for_board(ctx, board_id).await?;
    let target = clamp(requested, 0, n);
    if target < n {
        let query = sqlx::query(
            "update columns set position = position + 1, updated_at = now() where board_id = $1 and position >= $2",
        )
        .bind(board_id)
        .bind(target);
        ctx.execute(query).await?;
    }
    Position::new(target)
}

/// Move `column` to `requested`, updating the aggregate and compacting its
/// siblings in the same statement set. Returns the clamped target position.
pub async fn reposition(ctx: &RequestCtx, column: &Column, requested: i64) -> Result<Position, DomainError> {
    let n = count_for_board(ctx, column.board_id()).await?;
    // last valid index is n-1 when moving an existing column (the column
    // itself is already counted in n).
    let max_index = (n - 1).max(0);
    let target = clamp(requested, 0, max_index);
    let plan = calc_shift(column.position().get(), target);
    if plan.need {
        shift_siblings(ctx, column.board_id(), column.id(), plan.from_incl, plan.to_incl, plan.delta).await?;
    }
    Position::new(target)
}

/// Close the gap left by a deleted column at `removed_position`.
pub async fn compact_after_delete(ctx: &RequestCtx, board_id: Uuid, removed_position: i64) -> Result<(), DomainError> {
    let query = sqlx::query(
        "update columns set position = position - 1, updated_at = now() where board_id = $1 and position > $2",
    )
    .bind(board_id)
    .bind(removed_position);
    ctx.execute(query).await?;
    Ok(())
}
