//! Board aggregate — ported from
//! `original_source/core-service/internal/domain/board/aggregates.go`.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::events::{BoardCreated, BoardDeleted, BoardUpdated, DomainEvent};
use crate::value_objects::{Description, Title};

#[derive(Debug, Clone)]
pub struct Board {
    id: Uuid,
    owner_id: Uuid,
    title: Title,
    description: Description,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    events: Vec<DomainEvent>,
}

impl Board {
    pub fn new(owner_id: Uuid, title: Title, description: Description) -> DomainResult<Self> {
        if owner_id.is_nil() {
            return Err(DomainError::InvalidArgument("owner id is required".into()));
        }
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut board = Self {
            id,
            owner_id,
            title,
            description,
            created_at: now,
            updated_at: now,
            events: Vec::new(),
        };
        board.events.push(DomainEvent::BoardCreated(BoardCreated {
            id,
            owner_id,
            title: board.title.as_str().to_string(),
            description: board.description.as_str().to_string(),
            at: now,
        }));
        Ok(board)
    }

    /// Reconstruct from storage. No events are emitted.
    #[allow(clippy::too_many_arguments)]
    pub fn rehydrate(
        id: Uuid,
        owner_id: Uuid,
        title: Title,
        description: Description,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            title,
            description,
            created_at,
            updated_at,
            events: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner_id(&self) -> Uuid {
        self.owner_id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn description(&self) -> &Description {
        &self.description
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Patch update (Open Question 3 resolution — §DESIGN.md): only the
    /// fields the caller supplied are changed.
    pub fn update(&mut self, title: Option<Title>, description: Option<Description>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.updated_at = Utc::now();
        self.events.push(DomainEvent::BoardUpdated(BoardUpdated {
            id: self.id,
            title: self.title.as_str().to_string(),
            description: self.description.as_str().to_string(),
            at: self.updated_at,
        }));
    }

    /// Synthetic delete event — used by the delete use-case, which does not
    /// load the aggregate (id-only delete per §4.7).
    pub fn deleted_event(id: Uuid) -> DomainEvent {
        DomainEvent::BoardDeleted(BoardDeleted { id, at: Utc::now() })
    }

    /// Drain the pending-event buffer. Called exactly once per persist.
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
    fn new_board_buffers_created_event() {
        let mut board = Board::new(Uuid::new_v4(), title("Sprint"), desc("")).unwrap();
        let events = board.pull_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "BoardCreated");
        assert!(board.pull_events().is_empty());
    }

    #[test]
    fn new_board_rejects_nil_owner() {
        assert!(Board::new(Uuid::nil(), title("Sprint"), desc("")).is_err());
    }

    #[test]
    fn update_is_a_patch_leaving_unspecified_fields_alone() {
        let mut board = Board::new(Uuid::new_v4(), title("Sprint"), desc("v1")).unwrap();
        board.pull_events();
        board.update(Some(title("Sprint 2")), None);
        assert_eq!(board.title().as_str(), "Sprint 2");
        assert_eq!(board.description().as_str(), "v1");
        let events = board.pull_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name(), "BoardUpdated");
    }
}
