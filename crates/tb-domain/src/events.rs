//! The ten domain event types (§4.2), dispatched downstream by a `name()`
//! discriminator. Implemented as a sealed enum rather than a `Name()`-method
//! interface (Go's polymorphism substitute) — Rust enums are the idiomatic
//! tagged sum for a closed, forward-compatible event set.
//!
//! Every event carries an `at` timestamp. Ids are UUIDs, serialised as
//! strings; timestamps are RFC 3339 UTC — both via `chrono`/`uuid`'s `serde`
//! support, matching the wire contract in `tb-schemas`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardCreated {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardUpdated {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardDeleted {
    pub id: Uuid,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnCreated {
    pub id: Uuid,
    pub board_id: Uuid,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnMoved {
    pub id: Uuid,
    pub from_position: i64,
    pub to_position: i64,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDeleted {
    pub id: Uuid,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreated {
    pub id: Uuid,
    pub column_id: Uuid,
    pub position: i64,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Uuid>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskUpdated {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<Uuid>,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskMoved {
    pub id: Uuid,
    pub from_column_id: Uuid,
    pub to_column_id: Uuid,
    pub from_position: i64,
    pub to_position: i64,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDeleted {
    pub id: Uuid,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub enum DomainEvent {
    BoardCreated(BoardCreated),
    BoardUpdated(BoardUpdated),
    BoardDeleted(BoardDeleted),
    ColumnCreated(ColumnCreated),
    ColumnMoved(ColumnMoved),
    ColumnDeleted(ColumnDeleted),
    TaskCreated(TaskCreated),
    TaskUpdated(TaskUpdated),
    TaskMoved(TaskMoved),
    TaskDeleted(TaskDeleted),
}

/// Which aggregate table the event's row belongs to — mirrors
/// `tb_schemas::AggregateType`, kept separate so `tb-domain` has no
/// dependency on the wire crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Board,
    Column,
    Task,
}

impl DomainEvent {
    /// Stable discriminator used as `event_type` on the wire and as the
    /// dispatch key at consumers.
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::BoardCreated(_) => "BoardCreated",
            DomainEvent::BoardUpdated(_) => "BoardUpdated",
            DomainEvent::BoardDeleted(_) => "BoardDeleted",
            DomainEvent::ColumnCreated(_) => "ColumnCreated",
            DomainEvent::ColumnMoved(_) => "ColumnMoved",
            DomainEvent::ColumnDeleted(_) => "ColumnDeleted",
            DomainEvent::TaskCreated(_) => "TaskCreated",
            DomainEvent::TaskUpdated(_) => "TaskUpdated",
            DomainEvent::TaskMoved(_) => "TaskMoved",
            DomainEvent::TaskDeleted(_) => "TaskDeleted",
        }
    }

    pub fn aggregate_kind(&self) -> AggregateKind {
        match self {
            DomainEvent::BoardCreated(_) | DomainEvent::BoardUpdated(_) | DomainEvent::BoardDeleted(_) => {
                AggregateKind::Board
            }
            DomainEvent::ColumnCreated(_) | DomainEvent::ColumnMoved(_) | DomainEvent::ColumnDeleted(_) => {
                AggregateKind::Column
            }
            DomainEvent::TaskCreated(_) | DomainEvent::TaskUpdated(_) | DomainEvent::TaskMoved(_) | DomainEvent::TaskDeleted(_) => {
                AggregateKind::Task
            }
        }
    }

    pub fn aggregate_id(&self) -> Uuid {
        match self {
            DomainEvent::BoardCreated(e) => e.id,
            DomainEvent::BoardUpdated(e) => e.id,
            DomainEvent::BoardDeleted(e) => e.id,
            DomainEvent::ColumnCreated(e) => e.id,
            DomainEvent::ColumnMoved(e) => e.id,
            DomainEvent::ColumnDeleted(e) => e.id,
            DomainEvent::TaskCreated(e) => e.id,
            DomainEvent::TaskUpdated(e) => e.id,
            DomainEvent::TaskMoved(e) => e.id,
            DomainEvent::TaskDeleted(e) => e.id,
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::BoardCreated(e) => e.at,
            DomainEvent::BoardUpdated(e) => e.at,
            DomainEvent::BoardDeleted(e) => e.at,
            DomainEvent::ColumnCreated(e) => e.at,
            DomainEvent::ColumnMoved(e) => e.at,
            DomainEvent::ColumnDeleted(e) => e.at,
            DomainEvent::TaskCreated(e) => e.at,
            DomainEvent::TaskUpdated(e) => e.at,
            DomainEvent::TaskMoved(e) => e.at,
            DomainEvent::TaskDeleted(e) => e.at,
        }
    }

    /// Serialise just the event-specific fields — this becomes the outbox
    /// row's / envelope's `payload`.
    pub fn payload_json(&self) -> serde_json::Value {
        match self {
            DomainEvent::BoardCreated(e) => serde_json::to_value(e),
            DomainEvent::BoardUpdated(e) => serde_json::to_value(e),
            DomainEvent::BoardDeleted(e) => serde_json::to_value(e),
            DomainEvent::ColumnCreated(e) => serde_json::to_value(e),
            DomainEvent::ColumnMoved(e) => serde_json::to_value(e),
            DomainEvent::ColumnDeleted(e) => serde_json::to_value(e),
            DomainEvent::TaskCreated(e) => serde_json::to_value(e),
            DomainEvent::TaskUpdated(e) => serde_json::to_value(e),
            DomainEvent::TaskMoved(e) => serde_json::to_value(e),
            DomainEvent::TaskDeleted(e) => serde_json::to_value(e),
        }
        .expect("event payloads are always representable as JSON")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_created_name_and_payload_match() {
        let ev = DomainEvent::BoardCreated(BoardCreated {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Sprint".into(),
            description: String::new(),
            at: Utc::now(),
        });
        assert_eq!(ev.name(), "BoardCreated");
        assert_eq!(ev.aggregate_kind(), AggregateKind::Board);
        let payload = ev.payload_json();
        assert_eq!(payload["title"], "Sprint");
    }

    #[test]
    fn task_moved_carries_both_columns() {
        let ev = DomainEvent::TaskMoved(TaskMoved {
            id: Uuid::new_v4(),
            from_column_id: Uuid::new_v4(),
            to_column_id: Uuid::new_v4(),
            from_position: 0,
            to_position: 1,
            at: Utc::now(),
        });
        assert_eq!(ev.name(), "TaskMoved");
        assert_eq!(ev.aggregate_kind(), AggregateKind::Task);
    }
}
