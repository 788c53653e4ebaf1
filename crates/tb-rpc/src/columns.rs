//! Columns RPC surface (§6): `Create`, `Get (full, with tasks)`, `Move`,
//! `Delete`. No `Update` — the distilled RPC surface omits it even though
//! the original source has one.

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use tb_schemas::{ColumnDto, TaskDto};
use tb_usecases::columns::ColumnUseCases;
use tb_usecases::inputs::CreateColumnInput;

use crate::dto::{column_dto, task_dto};
use crate::status::WireResult;

#[derive(Debug, Clone, Serialize)]
pub struct ColumnFullDto {
    pub column: ColumnDto,
    pub tasks: Vec<TaskDto>,
}

#[async_trait]
pub trait Columns: Send + Sync {
    async fn create(&self, board_id: Uuid, position: i64) -> WireResult<ColumnDto>;
    async fn get_full(&self, id: Uuid) -> WireResult<ColumnFullDto>;
    async fn r#move(&self, id: Uuid, to_position: i64) -> WireResult<ColumnDto>;
    async fn delete(&self, id: Uuid) -> WireResult<()>;
}

pub struct ColumnsService {
    use_cases: ColumnUseCases,
}

impl ColumnsService {
    pub fn new(use_cases: ColumnUseCases) -> Self {
        Self { use_cases }
    }
}

#[async_trait]
impl Columns for ColumnsService {
    async fn create(&self, board_id: Uuid, position: i64) -> WireResult<ColumnDto> {
        let column = self.use_cases.create(CreateColumnInput { board_id, position }).await?;
        Ok(column_dto(&column))
    }

    async fn get_full(&self, id: Uuid) -> WireResult<ColumnFullDto> {
        let full = self.use_cases.get_full(id).await?;
        Ok(ColumnFullDto {
            column: column_dto(&full.column),
            tasks: full.tasks.iter().map(task_dto).collect(),
        })
    }

    async fn r#move(&self, id: Uuid, to_position: i64) -> WireResult<ColumnDto> {
        let column = self.use_cases.r#move(id, to_position).await?;
        Ok(column_dto(&column))
    }

    async fn delete(&self, id: Uuid) -> WireResult<()> {
        self.use_cases.delete(id).await?;
        Ok(())
    }
}
