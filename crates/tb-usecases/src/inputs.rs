//! Raw (unvalidated) inputs crossing the use-case boundary. Every field is
//! still a primitive here; construction of the matching value object and
//! the `InvalidArgument` it can produce both happen inside the use-case,
//! per §4.7 step 1 ("Parse inputs at the boundary into value objects").

use uuid::Uuid;

pub struct CreateBoardInput {
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
}

/// Patch shape (DESIGN.md Open Question 3): fields left `None` are
/// untouched by `Board::update`.
#[derive(Default)]
pub struct UpdateBoardInput {
    pub title: Option<String>,
    pub description: Option<String>,
}

pub struct CreateColumnInput {
    pub board_id: Uuid,
    pub position: i64,
}

pub struct CreateTaskInput {
    pub column_id: Uuid,
    pub position: i64,
    pub title: String,
    pub description: String,
    pub assignee_id: Option<Uuid>,
}

#[derive(Default)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `None` — leave as-is. `Some(None)` — clear the assignee.
    /// `Some(Some(id))` — set it.
    pub assignee_id: Option<Option<Uuid>>,
}
