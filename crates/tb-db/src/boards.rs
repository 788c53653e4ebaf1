//! Board repository.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use tb_domain::value_objects::{Description, Title};
use tb_domain::{Board, DomainError};

use crate::tx::RequestCtx;

#[derive(sqlx::FromRow)]
struct BoardRecord {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BoardRecord {
    fn into_domain(self) -> Result<Board, DomainError> {
        Ok(Board::rehydrate(
            self.id,
            self.owner_id,
            Title::new(self.title)?,
            Description::new(self.description)?,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// Insert or update the row for `board`. Boards are append-then-patch, so
/// this is a plain upsert on the primary key.
pub async fn save(ctx: &RequestCtx, board: &Board) -> Result<(), DomainError> {
    let query = sqlx::query(
        r#"
        insert into boards (id, owner_id, title, description, created_at, updated_at)
        values ($1, $2, $3, $4, $5, $6)
        on conflict (id) do update set
            title = excluded.title,
            description = excluded.description,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(board.id())
    .bind(board.owner_id())
    .bind(board.title().as_str())
    .bind(board.description().as_str())
    .bind(board.created_at())
    .bind(board.updated_at());
    ctx.execute(query).await?;
    Ok(())
}

pub async fn get(ctx: &RequestCtx, id: Uuid) -> Result<Option<Board>, DomainError> {
    let query = sqlx::query_as::<_, BoardRecord>(
        "select id, owner_id, title, description, created_at, updated_at from boards where id = $1",
    )
    .bind(id);
    match ctx.fetch_optional(query).await? {
        Some(record) => Ok(Some(record.into_domain()?)),
        None => Ok(None),
    }
}

pub async fn list_owned_by(ctx: &RequestCtx, owner_id: Uuid) -> Result<Vec<Board>, DomainError> {
    let query = sqlx::query_as::<_, BoardRecord>(
        "select id, owner_id, title, description, created_at, updated_at from boards where owner_id = $1 order by created_at asc",
    )
    .bind(owner_id);
    ctx.fetch_all(query)
        .await?
        .into_iter()
        .map(BoardRecord::into_domain)
        .collect()
}

/// Just the ids owned by `owner_id`, for the cache-first `ListBoards` path:
/// check the cache per id before deciding which boards need a bulk fetch.
pub async fn ids_owned_by(ctx: &RequestCtx, owner_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
    let query = sqlx::query_as::<_, (Uuid,)>(
        "select id from boards where owner_id = $1 order by created_at asc",
    )
    .bind(owner_id);
    Ok(ctx.fetch_all(query).await?.into_iter().map(|(id,)| id).collect())
}

/// Bulk fetch, used to back-fill everything the cache missed in one round
/// trip rather than one query per board.
pub async fn list_by_boards(ctx: &RequestCtx, ids: &[Uuid]) -> Result<Vec<Board>, DomainError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = sqlx::query_as::<_, BoardRecord>(
        "select id, owner_id, title, description, created_at, updated_at from boards where id = any($1)",
    )
    .bind(ids);
    ctx.fetch_all(query)
        .await?
        .into_iter()
        .map(BoardRecord::into_domain)
        .collect()
}

/// Row-level delete. Column/task rows cascade via `ON DELETE CASCADE`
/// (Open Question 2 resolution — enforced in storage, not here).
pub async fn delete(ctx: &RequestCtx, id: Uuid) -> Result<(), DomainError> {
    let query = sqlx::query("delete from boards where id = $1").bind(id);
    let affected = ctx.execute(query).await?;
    if affected == 0 {
        return Err(DomainError::NotFound(format!("board {id}")));
    }
    Ok(())
}

/// Fetch `owner_id` for an ownership check without materialising the full
/// aggregate — used by use-cases that only need the owner-mismatch gate.
pub async fn owner_id_of(ctx: &RequestCtx, id: Uuid) -> Result<Option<Uuid>, DomainError> {
    let query = sqlx::query_as::<_, (Uuid,)>("select owner_id from boards where id = $1").bind(id);
    Ok(ctx.fetch_optional(query).await?.map(|(owner_id,)| owner_id))
}
