//! Domain aggregate → wire DTO mapping. One direction only: DTOs are never
//! parsed back into aggregates here — raw request fields go through
//! `tb_usecases::inputs` and the value-object constructors instead.

use tb_cache::BoardSnapshot;
use tb_domain::{Board, Column, Task, User};
use tb_schemas::{BoardDto, BoardSnapshotDto, ColumnDto, TaskDto, UserDto};

pub fn board_dto(board: &Board) -> BoardDto {
    BoardDto {
        id: board.id(),
        owner_id: board.owner_id(),
        title: board.title().as_str().to_string(),
        description: board.description().as_str().to_string(),
        created_at: board.created_at(),
        updated_at: board.updated_at(),
    }
}

pub fn column_dto(column: &Column) -> ColumnDto {
    ColumnDto {
        id: column.id(),
        board_id: column.board_id(),
        position: column.position().get(),
        created_at: column.created_at(),
        updated_at: column.updated_at(),
    }
}

pub fn task_dto(task: &Task) -> TaskDto {
    TaskDto {
        id: task.id(),
        column_id: task.column_id(),
        position: task.position().get(),
        title: task.title().as_str().to_string(),
        description: task.description().as_str().to_string(),
        assignee_id: task.assignee_id(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

pub fn user_dto(user: &User) -> UserDto {
    UserDto {
        id: user.id(),
        email: user.email().as_str().to_string(),
        username: user.username().as_str().to_string(),
        created_at: user.created_at(),
    }
}

pub fn snapshot_dto(snapshot: &BoardSnapshot) -> BoardSnapshotDto {
    BoardSnapshotDto {
        board: board_dto(&snapshot.board),
        columns: snapshot.columns.iter().map(column_dto).collect(),
        tasks: snapshot.tasks.iter().map(task_dto).collect(),
    }
}
