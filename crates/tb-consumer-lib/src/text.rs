//! Per-event-type notification text. Templates are verbatim ports of
//! `internal/handler/handler.go`'s `fmt.Sprintf` strings — wording and field
//! order match exactly, since downstream consumers (alerting, audit trails)
//! may already depend on the original's shape.

use serde_json::Value;

use tb_domain::events::{
    BoardCreated, BoardDeleted, BoardUpdated, ColumnCreated, ColumnDeleted, ColumnMoved, TaskCreated, TaskDeleted,
    TaskMoved, TaskUpdated,
};

/// Render `assignee_id` the way the Go source's plain (non-pointer) `string`
/// field would read on the wire: the UUID when assigned, empty otherwise.
fn assignee_text(id: Option<uuid::Uuid>) -> String {
    id.map(|u| u.to_string()).unwrap_or_default()
}

/// Build the notification text for `event_type`/`payload`.
///
/// `Ok(None)` means `event_type` is not one this consumer recognizes — drop
/// at debug level, no DLQ (forward compatibility with event types added by
/// a newer producer). `Err` means the type was recognized but `payload`
/// didn't decode as that type's shape — a DLQ-worthy failure.
pub fn render(event_type: &str, payload: &Value) -> Result<Option<String>, serde_json::Error> {
    let text = match event_type {
        "BoardCreated" => {
            let e: BoardCreated = serde_json::from_value(payload.clone())?;
            format!(
                "Board created: '{}' (board_id={}, owner_id={})",
                e.title, e.id, e.owner_id
            )
        }
        "BoardUpdated" => {
            let e: BoardUpdated = serde_json::from_value(payload.clone())?;
            format!("Board updated: '{}' (board_id={})", e.title, e.id)
        }
        "BoardDeleted" => {
            let e: BoardDeleted = serde_json::from_value(payload.clone())?;
            format!("Board deleted: (board_id={})", e.id)
        }
        "ColumnCreated" => {
            let e: ColumnCreated = serde_json::from_value(payload.clone())?;
            format!("Column created: (column_id={}, board_id={})", e.id, e.board_id)
        }
        "ColumnMoved" => {
            let e: ColumnMoved = serde_json::from_value(payload.clone())?;
            format!(
                "Column moved: (column_id={}, from_position={}, to_position={})",
                e.id, e.from_position, e.to_position
            )
        }
        "ColumnDeleted" => {
            let e: ColumnDeleted = serde_json::from_value(payload.clone())?;
            format!("Column deleted: (column_id={})", e.id)
        }
        "TaskCreated" => {
            let e: TaskCreated = serde_json::from_value(payload.clone())?;
            format!(
                "Task created: '{}' (task_id={}, column_id={}, assignee_id={})",
                e.title,
                e.id,
                e.column_id,
                assignee_text(e.assignee_id)
            )
        }
        "TaskUpdated" => {
            let e: TaskUpdated = serde_json::from_value(payload.clone())?;
            format!(
                "Task updated: '{}' (task_id={}, assignee_id={})",
                e.title,
                e.id,
                assignee_text(e.assignee_id)
            )
        }
        "TaskMoved" => {
            let e: TaskMoved = serde_json::from_value(payload.clone())?;
            format!(
                "Task moved: (task_id={}, from_column_id={}, to_column_id={}, from_position={}, to_position={})",
                e.id, e.from_column_id, e.to_column_id, e.from_position, e.to_position
            )
        }
        "TaskDeleted" => {
            let e: TaskDeleted = serde_json::from_value(payload.clone())?;
            format!("Task deleted: (task_id={})", e.id)
        }
        _ => return Ok(None),
    };
    Ok(Some(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn board_created_text_matches_template() {
        let id = Uuid::nil();
        let owner_id = Uuid::nil();
        let payload = serde_json::json!({
            "id": id, "owner_id": owner_id, "title": "Sprint", "description": "",
            "at": "2026-01-01T00:00:00Z",
        });
        let text = render("BoardCreated", &payload).unwrap().unwrap();
        assert_eq!(
            text,
            format!("Board created: 'Sprint' (board_id={id}, owner_id={owner_id})")
        );
    }

    #[test]
    fn task_created_without_assignee_renders_empty_field() {
        let id = Uuid::nil();
        let column_id = Uuid::nil();
        let payload = serde_json::json!({
            "id": id, "column_id": column_id, "position": 0, "title": "t", "description": "",
            "at": "2026-01-01T00:00:00Z",
        });
        let text = render("TaskCreated", &payload).unwrap().unwrap();
        assert_eq!(
            text,
            format!("Task created: 't' (task_id={id}, column_id={column_id}, assignee_id=)")
        );
    }

    #[test]
    fn unknown_event_type_is_dropped_without_error() {
        assert!(render("SomethingElse", &serde_json::json!({})).unwrap().is_none());
    }

    #[test]
    fn malformed_payload_for_known_type_errors() {
        assert!(render("BoardCreated", &serde_json::json!({"nope": true})).is_err());
    }
}
