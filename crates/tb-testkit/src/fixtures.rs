//! In-process aggregate builders for tests that don't need a database —
//! thin wrappers over each aggregate's own validated constructors so a test
//! never has to hand-assemble a struct the domain crate wouldn't otherwise
//! let it build.

use uuid::Uuid;

use tb_domain::value_objects::{Description, Position, Title};
use tb_domain::{Board, Column, Task};

pub fn board(owner_id: Uuid, title: &str) -> Board {
    Board::new(owner_id, Title::new(title).unwrap(), Description::new("").unwrap()).unwrap()
}

pub fn column(board_id: Uuid, position: i64) -> Column {
    Column::new(board_id, Position::new(position).unwrap()).unwrap()
}

pub fn task(column_id: Uuid, position: i64, title: &str) -> Task {
    Task::new(
        column_id,
        Position::new(position).unwrap(),
        Title::new(title).unwrap(),
        Description::new("").unwrap(),
        None,
    )
    .unwrap()
}
