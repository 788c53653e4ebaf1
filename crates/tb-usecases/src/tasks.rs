//! Task use-cases. Ported from
//! `original_source/core-service/internal/usecase/task/*.go`.

use uuid::Uuid;

use tb_cache::BoardCache;
use tb_db::{columns, outbox, tasks, TxManager};
use tb_domain::value_objects::{Description, Title};
use tb_domain::{DomainError, DomainResult, Task};

use crate::inputs::{CreateTaskInput, UpdateTaskInput};

pub struct TaskUseCases {
    tx: TxManager,
    cache: Option<BoardCache>,
}

impl TaskUseCases {
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

    /// As with column creation, the original source stores the caller's raw
    /// position unshifted; this port clamps and shifts at create time to
    /// keep per-column density strict from the start.
    pub async fn create(&self, input: CreateTaskInput) -> DomainResult<Task> {
        let title = Title::new(input.title)?;
        let description = Description::new(input.description)?;
        let column_id = input.column_id;

        let root = self.tx.root_ctx();
        let (task, board_id) = self
            .tx
            .in_tx(&root, move |ctx| async move {
                let position = tasks::make_room_for_insert(&ctx, column_id, input.position).await?;
                let mut task = Task::new(column_id, position, title, description, input.assignee_id)?;
                let events = task.pull_events();
                tasks::save(&ctx, &task).await?;
                outbox::enqueue(&ctx, &events).await?;
                let board_id = columns::board_id_of(&ctx, column_id).await?;
                Ok((task, board_id))
            })
            .await?;

        if let Some(board_id) = board_id {
            self.invalidate(board_id).await;
        }
        Ok(task)
    }

    pub async fn get(&self, id: Uuid) -> DomainResult<Task> {
        let ctx = self.tx.root_ctx();
        tasks::get(&ctx, id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("task {id}")))
    }

    pub async fn update(&self, id: Uuid, input: UpdateTaskInput) -> DomainResult<Task> {
        let title = input.title.map(Title::new).transpose()?;
        let description = input.description.map(Description::new).transpose()?;

        let root = self.tx.root_ctx();
        let (task, board_id) = self
            .tx
            .in_tx(&root, move |ctx| async move {
                let mut task = tasks::get(&ctx, id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound(format!("task {id}")))?;
                task.update(title, description, input.assignee_id);
                let events = task.pull_events();
                tasks::save(&ctx, &task).await?;
                outbox::enqueue(&ctx, &events).await?;
                let board_id = columns::board_id_of(&ctx, task.column_id()).await?;
                Ok((task, board_id))
            })
            .await?;

        if let Some(board_id) = board_id {
            self.invalidate(board_id).await;
        }
        Ok(task)
    }

    /// Intra-column moves reposition in place; cross-column moves lock both
    /// columns (ascending id order, to avoid deadlocking against a
    /// concurrent move the other way) before compacting the source and
    /// making room in the destination.
    pub async fn r#move(&self, id: Uuid, to_column: Uuid, requested_position: i64) -> DomainResult<Task> {
        let root = self.tx.root_ctx();
        let (task, from_board, to_board) = self
            .tx
            .in_tx(&root, move |ctx| async move {
                let mut task = tasks::get(&ctx, id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound(format!("task {id}")))?;
                let from_column = task.column_id();

                let target = if to_column == from_column {
                    tasks::reposition_within_column(&ctx, &task, requested_position).await?
                } else {
                    let (first, second) = if from_column < to_column {
                        (from_column, to_column)
                    } else {
                        (to_column, from_column)
                    };
                    columns::get(&ctx, first)
                        .await?
                        .ok_or_else(|| DomainError::NotFound(format!("column {first}")))?;
                    columns::get(&ctx, second)
                        .await?
                        .ok_or_else(|| DomainError::NotFound(format!("column {second}")))?;
                    tasks::count_for_column(&ctx, first).await?;
                    tasks::count_for_column(&ctx, second).await?;
                    tasks::reposition_cross_column(&ctx, &task, to_column, requested_position).await?
                };

                task.r#move(to_column, target);
                let events = task.pull_events();
                tasks::save(&ctx, &task).await?;
                outbox::enqueue(&ctx, &events).await?;

                let from_board = columns::board_id_of(&ctx, from_column).await?;
                let to_board = if to_column != from_column {
                    columns::board_id_of(&ctx, to_column).await?
                } else {
                    None
                };
                Ok((task, from_board, to_board))
            })
            .await?;

        if let Some(board_id) = from_board {
            self.invalidate(board_id).await;
        }
        if let Some(board_id) = to_board {
            self.invalidate(board_id).await;
        }
        Ok(task)
    }

    pub async fn delete(&self, id: Uuid) -> DomainResult<()> {
        let root = self.tx.root_ctx();
        let board_id = self
            .tx
            .in_tx(&root, move |ctx| async move {
                let task = tasks::get(&ctx, id)
                    .await?
                    .ok_or_else(|| DomainError::NotFound(format!("task {id}")))?;
                tasks::delete(&ctx, id).await?;
                tasks::compact_after_remove(&ctx, task.column_id(), task.position().get()).await?;
                outbox::enqueue(&ctx, &[Task::deleted_event(id)]).await?;
                columns::board_id_of(&ctx, task.column_id()).await
            })
            .await?;

        if let Some(board_id) = board_id {
            self.invalidate(board_id).await;
        }
        Ok(())
    }
}
