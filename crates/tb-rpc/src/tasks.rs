//! Tasks RPC surface (§6): `Create`, `Get`, `Update`, `Move`, `Delete`.

use async_trait::async_trait;
use uuid::Uuid;

use tb_schemas::TaskDto;
use tb_usecases::inputs::{CreateTaskInput, UpdateTaskInput};
use tb_usecases::tasks::TaskUseCases;

use crate::dto::task_dto;
use crate::status::WireResult;

#[async_trait]
pub trait Tasks: Send + Sync {
    async fn create(
        &self,
        column_id: Uuid,
        position: i64,
        title: String,
        description: String,
        assignee_id: Option<Uuid>,
    ) -> WireResult<TaskDto>;
    async fn get(&self, id: Uuid) -> WireResult<TaskDto>;
    async fn update(
        &self,
        id: Uuid,
        title: Option<String>,
        description: Option<String>,
        assignee_id: Option<Option<Uuid>>,
    ) -> WireResult<TaskDto>;
    async fn r#move(&self, id: Uuid, to_column: Uuid, to_position: i64) -> WireResult<TaskDto>;
    async fn delete(&self, id: Uuid) -> WireResult<()>;
}

pub struct TasksService {
    use_cases: TaskUseCases,
}

impl TasksService {
    pub fn new(use_cases: TaskUseCases) -> Self {
        Self { use_cases }
    }
}

#[async_trait]
impl Tasks for TasksService {
    async fn create(
        &self,
        column_id: Uuid,
        position: i64,
        title: String,
        description: String,
        assignee_id: Option<Uuid>,
    ) -> WireResult<TaskDto> {
        let task = self
            .use_cases
            .create(CreateTaskInput {
                column_id,
                position,
                title,
                description,
                assignee_id,
            })
            .await?;
        Ok(task_dto(&task))
    }

    async fn get(&self, id: Uuid) -> WireResult<TaskDto> {
        let task = self.use_cases.get(id).await?;
        Ok(task_dto(&task))
    }

    async fn update(
        &self,
        id: Uuid,
        title: Option<String>,
        description: Option<String>,
        assignee_id: Option<Option<Uuid>>,
    ) -> WireResult<TaskDto> {
        let task = self
            .use_cases
            .update(
                id,
                UpdateTaskInput {
                    title,
                    description,
                    assignee_id,
                },
            )
            .await?;
        Ok(task_dto(&task))
    }

    async fn r#move(&self, id: Uuid, to_column: Uuid, to_position: i64) -> WireResult<TaskDto> {
        let task = self.use_cases.r#move(id, to_column, to_position).await?;
        Ok(task_dto(&task))
    }

    async fn delete(&self, id: Uuid) -> WireResult<()> {
        self.use_cases.delete(id).await?;
        Ok(())
    }
}
