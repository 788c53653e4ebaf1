//! Board use-cases. Ported from
//! `original_source/core-service/internal/usecase/board/*.go`.

use uuid::Uuid;

use tb_cache::{BoardCache, BoardSnapshot};
use tb_db::{outbox, TxManager};
use tb_domain::value_objects::{Description, Title};
use tb_domain::{Board, Column, DomainError, DomainResult, Task};

use crate::inputs::{CreateBoardInput, UpdateBoardInput};

fn assemble_snapshot(board: Board, columns: Vec<Column>, tasks: Vec<Task>) -> BoardSnapshot {
    BoardSnapshot { board, columns, tasks }
}

pub struct BoardUseCases {
    tx: TxManager,
    cache: Option<BoardCache>,
}

impl BoardUseCases {
    pub fn new(tx: TxManager, cache: Option<BoardCache>) -> Self {
        Self { tx, cache }
    }

    /// Best-effort cache invalidation — a cache error never fails the
    /// request (§4.6).
    async fn invalidate(&self, board_id: Uuid) {
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.invalidate_board(board_id).await {
                tracing::warn!(%board_id, %err, "board cache invalidation failed");
            }
        }
    }

    pub async fn create(&self, input: CreateBoardInput) -> DomainResult<Board> {
        let title = Title::new(input.title)?;
        let description = Description::new(input.description)?;
        let mut board = Board::new(input.owner_id, title, description)?;

        let root = self.tx.root_ctx();
        let saved = self
            .tx
            .in_tx(&root, move |ctx| async move {
                let events = board.pull_events();
                tb_db::boards::save(&ctx, &board).await?;
                outbox::enqueue(&ctx, &events).await?;
                Ok(board)
            })
            .await?;
        Ok(saved)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Board> {
        let ctx = self.tx.root_ctx();
        tb_db::boards::get(&ctx, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("board {id}")))
    }

    pub async fn list_owned_by(&self, owner_id: Uuid) -> DomainResult<Vec<Board>> {
        let ctx = self.tx.root_ctx();
        tb_db::boards::list_owned_by(&ctx, owner_id).await
    }

    /// Patch update (§4.7, DESIGN.md Open Question 3); enforces owner match,
    /// the only authorization check this core performs (§1 Non-goals).
    pub async fn update(&self, id: Uuid, requester_id: Uuid, input: UpdateBoardInput) -> DomainResult<Board> {
        let title = input.title.map(Title::new).transpose()?;
        let description = input.description.map(Description::new).transpose()?;

        let root = self.tx.root_ctx();
        let board = self
            .tx
            .in_tx(&root, move |ctx| async move {
                let mut board = tb_db::boards::get(&ctx, id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound(format!("board {id}")))?;
                if board.owner_id() != requester_id {
                    return Err(DomainError::OwnerMismatch);
                }
                board.update(title, description);
                let events = board.pull_events();
                tb_db::boards::save(&ctx, &board).await?;
                outbox::enqueue(&ctx, &events).await?;
                Ok(board)
            })
            .await?;

        self.invalidate(id).await;
        Ok(board)
    }

    /// Id-only delete (§4.7): the aggregate is never loaded, so the
    /// `BoardDeleted` event is synthesized directly. Column/task rows
    /// cascade in storage (DESIGN.md Open Question 2).
    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let root = self.tx.root_ctx();
        self.tx
            .in_tx(&root, move |ctx| async move {
                tb_db::boards::delete(&ctx, id).await?;
                outbox::enqueue(&ctx, &[Board::deleted_event(id)]).await?;
                Ok(())
            })
            .await?;

        self.invalidate(id).await;
        Ok(())
    }

    /// Read-through: cache hit returns immediately; a miss back-fills the
    /// cache with the configured TTL (§4.6). Cache errors degrade to a miss.
    pub async fn get_full(&self, id: Uuid, cache_ttl_secs: u64) -> DomainResult<BoardSnapshot> {
        if let Some(cache) = &self.cache {
            match cache.get_board(id).await {
                Ok(Some(snapshot)) => return Ok(snapshot),
                Ok(None) => {}
                Err(err) => tracing::warn!(board_id = %id, %err, "board cache read failed"),
            }
        }

        let ctx = self.tx.root_ctx();
        let board = tb_db::boards::get(&ctx, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("board {id}")))?;
        let columns = tb_db::columns::list_for_board(&ctx, id).await?;
        let column_ids: Vec<Uuid> = columns.iter().map(|c| c.id()).collect();
        let tasks = tb_db::tasks::list_for_columns(&ctx, &column_ids).await?;

        let snapshot = assemble_snapshot(board, columns, tasks);

        if let Some(cache) = &self.cache {
            if let Err(err) = cache.set_board(id, &snapshot, cache_ttl_secs).await {
                tracing::warn!(board_id = %id, %err, "board cache write failed");
            }
        }

        Ok(snapshot)
    }

    /// Cache-first bulk listing (§4.7): per-id cache lookups, then one
    /// round trip for every miss, back-filling the cache for each.
    pub async fn list_full_owned_by(&self, owner_id: Uuid, cache_ttl_secs: u64) -> DomainResult<Vec<BoardSnapshot>> {
        let ctx = self.tx.root_ctx();
        let ids = tb_db::boards::ids_owned_by(&ctx, owner_id).await?;

        let mut snapshots: Vec<Option<BoardSnapshot>> = vec![None; ids.len()];
        let mut missed_idx = Vec::new();

        if let Some(cache) = &self.cache {
            for (i, id) in ids.iter().enumerate() {
                match cache.get_board(*id).await {
                    Ok(Some(snapshot)) => snapshots[i] = Some(snapshot),
                    Ok(None) => missed_idx.push(i),
                    Err(err) => {
                        tracing::warn!(board_id = %id, %err, "board cache read failed");
                        missed_idx.push(i);
                    }
                }
            }
        } else {
            missed_idx = (0..ids.len()).collect();
        }

        if !missed_idx.is_empty() {
            let missed_ids: Vec<Uuid> = missed_idx.iter().map(|&i| ids[i]).collect();
            let boards = tb_db::boards::list_by_boards(&ctx, &missed_ids).await?;
            let columns = tb_db::columns::list_for_boards(&ctx, &missed_ids).await?;
            let column_ids: Vec<Uuid> = columns.iter().map(|c| c.id()).collect();
            let tasks = tb_db::tasks::list_for_columns(&ctx, &column_ids).await?;

            for board in boards {
                let board_id = board.id();
                let board_columns: Vec<_> = columns.iter().filter(|c| c.board_id() == board_id).cloned().collect();
                let board_column_ids: std::collections::HashSet<Uuid> =
                    board_columns.iter().map(|c| c.id()).collect();
                let board_tasks: Vec<_> = tasks
                    .iter()
                    .filter(|t| board_column_ids.contains(&t.column_id()))
                    .cloned()
                    .collect();
                let snapshot = assemble_snapshot(board, board_columns, board_tasks);

                if let Some(cache) = &self.cache {
                    if let Err(err) = cache.set_board(board_id, &snapshot, cache_ttl_secs).await {
                        tracing::warn!(%board_id, %err, "board cache write failed");
                    }
                }

                if let Some(pos) = ids.iter().position(|id| *id == board_id) {
                    snapshots[pos] = Some(snapshot);
                }
            }
        }

        Ok(snapshots.into_iter().flatten().collect())
    }
}
