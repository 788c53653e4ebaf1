//! Column use-cases. Ported from
//! `original_source/core-service/internal/usecase/column/*.go`. The RPC
//! surface for columns (spec §6) is `Create, Get (full), Move, Delete` —
//! there is no `Update`, so `update_column.go` is not ported.

use uuid::Uuid;

use tb_cache::BoardCache;
use tb_db::{columns, outbox, tasks, TxManager};
use tb_domain::{Column, DomainError, DomainResult, Task};

use crate::inputs::CreateColumnInput;

pub struct ColumnFull {
    pub column: Column,
    pub tasks: Vec<Task>,
}

pub struct ColumnUseCases {
    tx: TxManager,
    cache: Option<BoardCache>,
}

impl ColumnUseCases {
    pub fn new(tx: TxManager, cache: Option<BoardCache>) -> Self {
        Self { tx, cache }
    }

    async fn invalidate(&self, board_id: Uuid) {
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.invalidate_board(board_id).await {
                tracing::warn!(%board_id, %err, "board cache invalidation failed");
            }
        }
    }

    /// Unlike the original source (which stores the caller's raw position
    /// unshifted), the position is clamped and siblings are shifted at
    /// create time too, to keep density strict from the first insert
    /// onward rather than only on delete.
    pub async fn create(&self, input: CreateColumnInput) -> DomainResult<Column> {
        let root = self.tx.root_ctx();
        let board_id = input.board_id;
        let column = self
            .tx
            .in_tx(&root, move |ctx| async move {
                let position = columns::make_room_for_insert(&ctx, board_id, input.position).await?;
                let mut column = Column::new(board_id, position)?;
                let events = column.pull_events();
                columns::save(&ctx, &column).await?;
                outbox::enqueue(&ctx, &events).await?;
                Ok(column)
            })
            .await?;

        self.invalidate(board_id).await;
        Ok(column)
    }

    pub async fn get_full(&self, id: Uuid) -> DomainResult<ColumnFull> {
        let ctx = self.tx.root_ctx();
        let column = columns::get(&ctx, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("column {id}")))?;
        let tasks = tasks::list_for_column(&ctx, id).await?;
        Ok(ColumnFull { column, tasks })
    }

    /// Reposition within the owning board. An invariant violation (rather
    /// than a silent no-op) if the board somehow has zero columns.
    pub async fn r#move(&self, id: Uuid, requested_position: i64) -> DomainResult<Column> {
        let root = self.tx.root_ctx();
        let column = self
            .tx
            .in_tx(&root, move |ctx| async move {
                let mut column = columns::get(&ctx, id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound(format!("column {id}")))?;
                let count = columns::count_for_board(&ctx, column.board_id()).await?;
                if count == 0 {
                    return Err(DomainError::InvariantViolation(
                        "board has no columns to move within".into(),
                    ));
                }
                let target = columns::reposition(&ctx, &column, requested_position).await?;
                column.r#move(target);
                let events = column.pull_events();
                columns::save(&ctx, &column).await?;
                outbox::enqueue(&ctx, &events).await?;
                Ok(column)
            })
            .await?;

        self.invalidate(column.board_id()).await;
        Ok(column)
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let root = self.tx.root_ctx();
        let board_id = self
            .tx
            .in_tx(&root, move |ctx| async move {
                let column = columns::get(&ctx, id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound(format!("column {id}")))?;
                columns::delete(&ctx, id).await?;
                columns::compact_after_delete(&ctx, column.board_id(), column.position().get()).await?;
                outbox::enqueue(&ctx, &[Column::deleted_event(id)]).await?;
                Ok(column.board_id())
            })
            .await?;

        self.invalidate(board_id).await;
        Ok(())
    }
}
