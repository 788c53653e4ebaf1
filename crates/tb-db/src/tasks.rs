//! Task repository. Positions are dense within a column (not a board), and
//! a move can re-parent a task into a different column, so the shift
//! bookkeeping runs against whichever column(s) are affected.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use tb_domain::ordering::{calc_shift, clamp};
use tb_domain::value_objects::{Description, Position, Title};
use tb_domain::{DomainError, Task};

use crate::tx::RequestCtx;

#[derive(sqlx::FromRow)]
struct TaskRecord {
    id: Uuid,
    column_id: Uuid,
    position: i64,
    title: String,
    description: String,
    assignee_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TaskRecord {
    fn into_domain(self) -> Result<Task, DomainError> {
        Ok(Task::rehydrate(
            self.id,
            self.column_id,
            Position::new(self.position)?,
            Title::new(self.title)?,
            Description::new(self.description)?,
            self.assignee_id,
            self.created_at,
            self.updated_at,
        ))
    }
}

pub async fn save(ctx: &RequestCtx, task: &Task) -> Result<(), DomainError> {
    let query = sqlx::query(
        r#"
        insert into tasks (id, column_id, position, title, description, assignee_id, created_at, updated_at)
        values ($1, $2, $3, $4, $5, $6, $7, $8)
        on conflict (id) do update set
            column_id = excluded.column_id,
            position = excluded.position,
            title = excluded.title,
            description = excluded.description,
            assignee_id = excluded.assignee_id,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(task.id())
    .bind(task.column_id())
    .bind(task.position().get())
    .bind(task.title().as_str())
    .bind(task.description().as_str())
    .bind(task.assignee_id())
    .bind(task.created_at())
    .bind(task.updated_at());
    ctx.execute(query).await?;
    Ok(())
}

pub async fn get(ctx: &RequestCtx, id: Uuid) -> Result<Option<Task>, DomainError> {
    let query = sqlx::query_as::<_, TaskRecord>(
        "select id, column_id, position, title, description, assignee_id, created_at, updated_at from tasks where id = $1",
    )
    .bind(id);
    match ctx.fetch_optional(query).await? {
        Some(record) => Ok(Some(record.into_domain()?)),
        None => Ok(None),
    }
}

pub async fn list_for_column(ctx: &RequestCtx, column_id: Uuid) -> Result<Vec<Task>, DomainError> {
    let query = sqlx::query_as::<_, TaskRecord>(
        "select id, column_id, position, title, description, assignee_id, created_at, updated_at from tasks where column_id = $1 order by position asc",
    )
    .bind(column_id);
    ctx.fetch_all(query)
        .await?
        .into_iter()
        .map(TaskRecord::into_domain)
        .collect()
}

/// Bulk variant of [`list_for_column`], used by `GetBoardFull`/`ListBoards`
/// to fetch every task across a board's columns in one round trip rather
/// than one query per column.
pub async fn list_for_columns(ctx: &RequestCtx, column_ids: &[Uuid]) -> Result<Vec<Task>, DomainError> {
    if column_ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = sqlx::query_as::<_, TaskRecord>(
        "select id, column_id, position, title, description, assignee_id, created_at, updated_at from tasks where column_id = any($1) order by column_id, position asc",
    )
    .bind(column_ids);
    ctx.fetch_all(query)
        .await?
        .into_iter()
        .map(TaskRecord::into_domain)
        .collect()
}

pub async fn delete(ctx: &RequestCtx, id: Uuid) -> Result<(), DomainError> {
    let query = sqlx::query("delete from tasks where id = $1").bind(id);
    let affected = ctx.execute(query).await?;
    if affected == 0 {
        return Err(DomainError::NotFound(format!("task {id}")));
    }
    Ok(())
}

/// Lock and count the tasks currently in `column_id`. Same rationale as
/// `columns::count_for_board`: Postgres won't `FOR UPDATE` an aggregate.
pub async fn count_for_column(ctx: &RequestCtx, column_id: Uuid) -> Result<i64, DomainError> {
    let query =
        sqlx::query_as::<_, (Uuid,)>("select id from tasks where column_id = $1 order by id for update").bind(column_id);
    Ok(ctx.fetch_all(query).await?.len() as i64)
}

async fn shift_siblings(
    ctx: &RequestCtx,
    column_id: Uuid,
    excluding: Uuid,
    from_incl: i64,
    to_incl: i64,
    delta: i64,
) -> Result<(), DomainError> {
    let query = sqlx::query(
        r#"
        update tasks
        set position = position + $1, updated_at = now()
        where column_id = $2 and id <> $3 and position between $4 and $5
        "#,
    )
    .bind(delta)
    .bind(column_id)
    .bind(excluding)
    .bind(from_incl)
    .bind(to_incl);
    ctx.execute(query).await?;
    Ok(())
}

/// Insert a new task into `column_id` at `requested`, clamped into `[0, n]`.
pub async fn make_room_for_insert(ctx: &RequestCtx, column_id: Uuid, requested: i64) -> Result<Position, DomainError> {
    let n = count_for_column(ctx, column_id).await?;
    let target = clamp(requested, 0, n);
    if target < n {
        let query =
            sqlx::query("update tasks set position = position + 1, updated_at = now() where column_id = $1 and position >= $2")
                .bind(column_id)
                .bind(target);
        ctx.execute(query).await?;
    }
    Position::new(target)
}

/// Close the gap left behind in `column_id` after removing a task that was
/// at `removed_position`.
pub async fn compact_after_remove(ctx: &RequestCtx, column_id: Uuid, removed_position: i64) -> Result<(), DomainError> {
    let query =
        sqlx::query("update tasks set position = position - 1, updated_at = now() where column_id = $1 and position > $2")
            .bind(column_id)
            .bind(removed_position);
    ctx.execute(query).await?;
    Ok(())
}

/// Reposition `task` within its current column.
pub async fn reposition_within_column(ctx: &RequestCtx, task: &Task, requested: i64) -> Result<Position, DomainError> {
    let n = count_for_column(ctx, task.column_id()).await?;
    let max_index = (n - 1).max(0);
    let target = clamp(requested, 0, max_index);
    let plan = calc_shift(task.position().get(), target);
    if plan.need {
        shift_siblings(ctx, task.column_id(), task.id(), plan.from_incl, plan.to_incl, plan.delta).await?;
    }
    Position::new(target)
}

/// Move `task` out of its current column and into `to_column` at
/// `requested`: compact the gap in the source column, then make room in the
/// destination. Both columns must already be lock-counted by the caller's
/// transaction (via `count_for_column`) to avoid racing with a concurrent
/// move into the same destination.
pub async fn reposition_cross_column(
    ctx: &RequestCtx,
    task: &Task,
    to_column: Uuid,
    requested: i64,
) -> Result<Position, DomainError> {
    compact_after_remove(ctx, task.column_id(), task.position().get()).await?;
    make_room_for_insert(ctx, to_column, requested).await
}
