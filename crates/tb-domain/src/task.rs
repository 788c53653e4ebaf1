//! Task aggregate — ported from
//! `original_source/core-service/internal/domain/task/aggregates.go`.
//! Unlike Column, `Created` here DOES carry the initial position and the
//! assignee — kept faithful to source, which differs between the two
//! sibling aggregates in exactly this respect.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::events::{DomainEvent, TaskCreated, TaskDeleted, TaskMoved, TaskUpdated};
use crate::value_objects::{Description, Position, Title};

#[derive(Debug, Clone)]
pub struct Task {
    id: Uuid,
    column_id: Uuid,
    position: Position,
    title: Title,
    description: Description,
    assignee_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl Task {
    pub fn new(
        column_id: Uuid,
        position: Position,
        title: Title,
        description: Description,
        assignee_id: Option<Uuid>,
    ) -> DomainResult<Self> {
        if column_id.is_nil() {
            return Err(DomainError::InvalidArgument("column id is required".into()));
        }
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut task = Self {
            id,
            column_id,
            position,
            title,
            description,
            assignee_id,
            created_at: now,
            updated_at: now,
            events: Vec::new(),
        };
        task.events.push(DomainEvent::TaskCreated(TaskCreated {
            id,
            column_id,
            position: position.get(),
            title: task.title.as_str().to_string(),
            description: task.description.as_str().to_string(),
            assignee_id,
            at: now,
        }));
        Ok(task)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: Uuid,
        column_id: Uuid,
        position: Position,
        title: Title,
        description: Description,
        assignee_id: Option<Uuid>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            column_id,
            position,
            title,
            description,
            assignee_id,
            created_at,
            updated_at,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn column_id(&self) -> Uuid {
        self.column_id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn assignee_id(&self) -> Option<Uuid> {
        self.assignee_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Patch update, same shape as Board's (Open Question 3 resolution
    /// applied consistently across both patchable aggregates).
    pub fn update(
        &mut self,
        title: Option<Title>,
        description: Option<Description>,
        assignee_id: Option<Option<Uuid>>,
    ) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(assignee_id) = assignee_id {
            self.assignee_id = assignee_id;
        }
        self.updated_at = Utc::now();
        self.events.push(DomainEvent::TaskUpdated(TaskUpdated {
            id: self.id,
            title: self.title.as_str().to_string(),
            description: self.description.as_str().to_string(),
            assignee_id: self.assignee_id,
            at: self.updated_at,
        }));
    }

    /// Move within or across columns. `to_column` may equal the current
    /// column (intra-column move) or differ (cross-column move); the event
    /// shape is identical either way.
    pub fn r#move(&mut self, to_column: Uuid, to_position: Position) {
        let from_column = self.column_id;
        let from_position = self.position;
        self.column_id = to_column;
        self.position = to_position;
        self.updated_at = Utc::now();
        self.events.push(DomainEvent::TaskMoved(TaskMoved {
            id: self.id,
            from_column_id: from_column,
            to_column_id: to_column,
            from_position: from_position.get(),
            to_position: to_position.get(),
            at: self.updated_at,
        }));
    }

    pub fn deleted_event(id: Uuid) -> DomainEvent {
        DomainEvent::TaskDeleted(TaskDeleted { id, at: Utc::now() })
    }

    pub fn pull_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(s: &str) -> Title {
        Title::new(s).unwrap()
    }

    fn desc(s: &str) -> Description {
        Description::new(s).unwrap()
    }

    #[test]
    fn new_task_created_event_carries_position_and_assignee() {
        let mut task = Task::new(
            Uuid::new_v4(),
            Position::new(0).unwrap(),
            title("Fix bug"),
            desc(""),
            None,
        )
        .unwrap();
        let events = task.pull_events();
        match &events[0] {
            DomainEvent::TaskCreated(e) => {
                assert_eq!(e.position, 0);
                assert_eq!(e.assignee_id, None);
            }
            _ => panic!("expected TaskCreated"),
        }
    }

    #[test]
    fn cross_column_move_records_both_columns() {
        let col1 = Uuid::new_v4();
        let col2 = Uuid::new_v4();
        let mut task = Task::new(col1, Position::new(0).unwrap(), title("t1"), desc(""), None).unwrap();
        task.pull_events();
        task.r#move(col2, Position::new(1).unwrap());
        assert_eq!(task.column_id(), col2);
        assert_eq!(task.position().get(), 1);
        let events = task.pull_events();
        match &events[0] {
            DomainEvent::TaskMoved(e) => {
                assert_eq!(e.from_column_id, col1);
                assert_eq!(e.to_column_id, col2);
                assert_eq!(e.from_position, 0);
                assert_eq!(e.to_position, 1);
            }
            _ => panic!("expected TaskMoved"),
        }
    }

    #[test]
    fn update_can_clear_assignee() {
        let assignee = Uuid::new_v4();
        let mut task = Task::new(Uuid::new_v4(), Position::zero(), title("t"), desc(""), Some(assignee)).unwrap();
        task.pull_events();
        task.update(None, None, Some(None));
        assert_eq!(task.assignee_id(), None);
    }
}
