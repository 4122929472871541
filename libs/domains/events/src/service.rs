//! Event service layer

use crate::error::{EventError, Result};
use crate::models::{CreateEvent, Event, EventFilter};
use crate::query::EventQuery;
use crate::repository::EventRepository;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

/// Business logic for events, shared across request handlers.
pub struct EventService<R: EventRepository> {
    repository: Arc<R>,
}

impl<R: EventRepository> Clone for EventService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Events matching `filter`, oldest `date` first
    #[instrument(skip(self))]
    pub async fn list_events(&self, filter: &EventFilter) -> Result<Vec<Event>> {
        let query = EventQuery::from(filter);
        self.repository.list(&query).await
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, id: Uuid) -> Result<Event> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| EventError::NotFound { id: id.to_string() })
    }

    /// Validate and store a new event with a fresh id and timestamps
    #[instrument(skip(self, create), fields(title = ?create.title))]
    pub async fn create_event(&self, create: CreateEvent) -> Result<Event> {
        let create = create.normalized();
        create.validate()?;

        let event = create.into_event().ok_or_else(|| {
            EventError::Internal("validated event is missing a required field".to_string())
        })?;

        let event = self.repository.create(event).await?;
        info!(event_id = %event.id, "Event created");
        Ok(event)
    }

    /// Whether the backing store answers
    pub async fn ping(&self) -> Result<()> {
        self.repository.ping().await
    }
}
