//! Boards RPC surface (§6): `Create`, `Get`, `List`, `Update`, `Delete`.
//! `Get`/`List` return the full snapshot shape — the same value the board
//! cache stores — matching §4.7's "Get board (full)" / "List boards".

use async_trait::async_trait;
use uuid::Uuid;

use tb_schemas::{BoardDto, BoardSnapshotDto};
use tb_usecases::boards::BoardUseCases;
use tb_usecases::inputs::{CreateBoardInput, UpdateBoardInput};

use crate::dto::{board_dto, snapshot_dto};
use crate::status::WireResult;

#[async_trait]
pub trait Boards: Send + Sync {
    async fn create(&self, requester_id: Uuid, title: String, description: String) -> WireResult<BoardDto>;
    async fn get(&self, id: Uuid) -> WireResult<BoardSnapshotDto>;
    async fn list(&self, requester_id: Uuid) -> WireResult<Vec<BoardSnapshotDto>>;
    async fn update(
        &self,
        id: Uuid,
        requester_id: Uuid,
        title: Option<String>,
        description: Option<String>,
    ) -> WireResult<BoardDto>;
    async fn delete(&self, id: Uuid) -> WireResult<()>;
}

pub struct BoardsService {
    use_cases: BoardUseCases,
    cache_ttl_secs: u64,
}

impl BoardsService {
    pub fn new(use_cases: BoardUseCases, cache_ttl_secs: u64) -> Self {
        Self {
            use_cases,
            cache_ttl_secs,
        }
    }
}

#[async_trait]
impl Boards for BoardsService {
    async fn create(&self, requester_id: Uuid, title: String, description: String) -> WireResult<BoardDto> {
        let board = self
            .use_cases
            .create(CreateBoardInput {
                owner_id: requester_id,
                title,
                description,
            })
            .await?;
        Ok(board_dto(&board))
    }

    async fn get(&self, id: Uuid) -> WireResult<BoardSnapshotDto> {
        let snapshot = self.use_cases.get_full(id, self.cache_ttl_secs).await?;
        Ok(snapshot_dto(&snapshot))
    }

    async fn list(&self, requester_id: Uuid) -> WireResult<Vec<BoardSnapshotDto>> {
        let snapshots = self
            .use_cases
            .list_full_owned_by(requester_id, self.cache_ttl_secs)
            .await?;
        Ok(snapshots.iter().map(snapshot_dto).collect())
    }

    async fn update(
        &self,
        id: Uuid,
        requester_id: Uuid,
        title: Option<String>,
        description: Option<String>,
    ) -> WireResult<BoardDto> {
        let board = self
            .use_cases
            .update(id, requester_id, UpdateBoardInput { title, description })
            .await?;
        Ok(board_dto(&board))
    }

    async fn delete(&self, id: Uuid) -> WireResult<()> {
        self.use_cases.delete(id).await?;
        Ok(())
    }
}
