//! Redis read-through cache for a board's full snapshot (board + columns +
//! tasks), C6. Ported from
//! `original_source/core-service/internal/infrastructure/cache/redis_board_cache.go`:
//! a corrupted or unparseable entry is treated as a cache miss (and evicted)
//! rather than surfaced as an error, and only `Board`/`Column`/`Task`'s own
//! validated constructors are used to rebuild a snapshot from the wire
//! representation — a cache entry that fails validation is no more trusted
//! than a coincidental bit flip.
//!
//! The Go original makes the cache itself nilable so a misconfigured
//! deployment silently runs cache-less; the idiomatic Rust equivalent is an
//! `Option<BoardCache>` at the call site rather than null checks inside
//! every method here.

use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tb_domain::value_objects::{Description, Position, Title};
use tb_domain::{Board, Column, DomainError, Task};

const BOARD_KEY_PREFIX: &str = "board:";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BoardEntry {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ColumnEntry {
    id: Uuid,
    board_id: Uuid,
    position: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskEntry {
    id: Uuid,
    column_id: Uuid,
    position: i64,
    title: String,
    description: String,
    assignee_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotEntry {
    board: BoardEntry,
    columns: Vec<ColumnEntry>,
    tasks: Vec<TaskEntry>,
}

/// A board together with its columns and tasks, as handed to and rebuilt
/// from the cache.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub board: Board,
    pub columns: Vec<Column>,
    pub tasks: Vec<Task>,
}

impl SnapshotEntry {
    fn from_snapshot(snapshot: &BoardSnapshot) -> Self {
        Self {
            board: BoardEntry {
                id: snapshot.board.id(),
                owner_id: snapshot.board.owner_id(),
                title: snapshot.board.title().as_str().to_string(),
                description: snapshot.board.description().as_str().to_string(),
                created_at: snapshot.board.created_at(),
                updated_at: snapshot.board.updated_at(),
            },
            columns: snapshot
                .columns
                .iter()
                .map(|c| ColumnEntry {
                    id: c.id(),
                    board_id: c.board_id(),
                    position: c.position().get(),
                    created_at: c.created_at(),
                    updated_at: c.updated_at(),
                })
                .collect(),
            tasks: snapshot
                .tasks
                .iter()
                .map(|t| TaskEntry {
                    id: t.id(),
                    column_id: t.column_id(),
                    position: t.position().get(),
                    title: t.title().as_str().to_string(),
                    description: t.description().as_str().to_string(),
                    assignee_id: t.assignee_id(),
                    created_at: t.created_at(),
                    updated_at: t.updated_at(),
                })
                .collect(),
        }
    }

    fn try_into_snapshot(self) -> Result<BoardSnapshot, DomainError> {
        let board = Board::rehydrate(
            self.board.id,
            self.board.owner_id,
            Title::new(self.board.title)?,
            Description::new(self.board.description)?,
            self.board.created_at,
            self.board.updated_at,
        );
        let columns = self
            .columns
            .into_iter()
            .map(|c| {
                Ok(Column::rehydrate(
                    c.id,
                    c.board_id,
                    Position::new(c.position)?,
                    c.created_at,
                    c.updated_at,
                ))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        let tasks = self
            .tasks
            .into_iter()
            .map(|t| {
                Ok(Task::rehydrate(
                    t.id,
                    t.column_id,
                    Position::new(t.position)?,
                    Title::new(t.title)?,
                    Description::new(t.description)?,
                    t.assignee_id,
                    t.created_at,
                    t.updated_at,
                ))
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(BoardSnapshot { board, columns, tasks })
    }
}

#[derive(Clone)]
pub struct BoardCache {
    conn: ConnectionManager,
}

impl BoardCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn key(id: Uuid) -> String {
        format!("{BOARD_KEY_PREFIX}{id}")
    }

    /// Returns `Ok(None)` both for a genuine cache miss and for a corrupted
    /// entry (which is evicted before returning).
    pub async fn get_board(&self, id: Uuid) -> Result<Option<BoardSnapshot>, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn
            .get(Self::key(id))
            .await
            .map_err(|e| DomainError::Transient(e.to_string()))?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let parsed = serde_json::from_str::<SnapshotEntry>(&raw)
            .map_err(|_| ())
            .and_then(|entry| entry.try_into_snapshot().map_err(|_| ()));

        match parsed {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(()) => {
                tracing::warn!(board_id = %id, "evicting unparseable board cache entry");
                let _: Result<(), _> = conn.del(Self::key(id)).await;
                Ok(None)
            }
        }
    }

    pub async fn set_board(&self, id: Uuid, snapshot: &BoardSnapshot, ttl_secs: u64) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let raw = serde_json::to_string(&SnapshotEntry::from_snapshot(snapshot))
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if ttl_secs == 0 {
            let _: () = conn
                .set(Self::key(id), raw)
                .await
                .map_err(|e| DomainError::Transient(e.to_string()))?;
        } else {
            let _: () = conn
                .set_ex(Self::key(id), raw, ttl_secs)
                .await
                .map_err(|e| DomainError::Transient(e.to_string()))?;
        }
        Ok(())
    }

    pub async fn invalidate_board(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(Self::key(id))
            .await
            .map_err(|e| DomainError::Transient(e.to_string()))?;
        Ok(())
    }
}
