//! Column aggregate — ported from
//! `original_source/core-service/internal/domain/column/aggregates.go`.
//! Note (kept faithful to source): `Created` does not carry the initial
//! position — position assignment is the repository/use-case's concern at
//! insert time, not part of the aggregate's own invariants at construction.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::events::{ColumnCreated, ColumnDeleted, ColumnMoved, DomainEvent};
use crate::value_objects::Position;

#[derive(Debug, Clone)]
pub struct Column {
    id: Uuid,
    board_id: Uuid,
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl Column {
    pub fn new(board_id: Uuid, position: Position) -> DomainResult<Self> {
        if board_id.is_nil() {
            return Err(DomainError::InvalidArgument("board id is required".into()));
        }
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut column = Self {
            id,
            board_id,
            position,
            created_at: now,
            updated_at: now,
            events: Vec::new(),
        };
        column.events.push(DomainEvent::ColumnCreated(ColumnCreated {
            id,
            board_id,
            at: now,
        }));
        Ok(column)
    }

    pub fn rehydrate(
        id: Uuid,
        board_id: Uuid,
        position: Position,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            board_id,
            position,
            created_at,
            updated_at,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn board_id(&self) -> Uuid {
        self.board_id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn r#move(&mut self, to: Position) {
        let from = self.position;
        self.position = to;
        self.updated_at = Utc::now();
        self.events.push(DomainEvent::ColumnMoved(ColumnMoved {
            id: self.id,
            from_position: from.get(),
            to_position: to.get(),
            at: self.updated_at,
        }));
    }

    pub fn deleted_event(id: Uuid) -> DomainEvent {
        DomainEvent::ColumnDeleted(ColumnDeleted { id, at: Utc::now() })
    }

    pub fn pull_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_column_buffers_created_without_position_field() {
        let mut col = Column::new(Uuid::new_v4(), Position::zero()).unwrap();
        let events = col.pull_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "ColumnCreated");
    }

    #[test]
    fn move_emits_from_and_to_position() {
        let mut col = Column::new(Uuid::new_v4(), Position::new(0).unwrap()).unwrap();
        col.pull_events();
        col.r#move(Position::new(2).unwrap());
        let events = col.pull_events();
        assert_eq!(events.len(), 1);
        match &events[0] {
            DomainEvent::ColumnMoved(e) => {
                assert_eq!(e.from_position, 0);
                assert_eq!(e.to_position, 2);
            }
            _ => panic!("expected ColumnMoved"),
        }
    }

    #[test]
    fn move_to_same_position_is_idempotent_on_position() {
        let mut col = Column::new(Uuid::new_v4(), Position::new(1).unwrap()).unwrap();
        col.pull_events();
        col.r#move(Position::new(1).unwrap());
        assert_eq!(col.position().get(), 1);
    }
}
