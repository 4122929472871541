//! Event repository trait and in-memory implementation

use crate::error::Result;
use crate::models::Event;
use crate::query::EventQuery;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

/// Repository trait for event storage operations
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Events matching `query`, oldest `date` first
    async fn list(&self, query: &EventQuery) -> Result<Vec<Event>>;

    /// Get event by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>>;

    /// Store an already validated event
    async fn create(&self, event: Event) -> Result<Event>;

    /// Whether the backing store is reachable
    async fn ping(&self) -> Result<()>;
}

/// In-memory implementation of EventRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    events: Arc<RwLock<HashMap<Uuid, Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    #[instrument(skip(self))]
    async fn list(&self, query: &EventQuery) -> Result<Vec<Event>> {
        let matcher = query.matcher();
        let events = self.events.read().await;

        let mut result: Vec<Event> = events
            .values()
            .filter(|e| matcher.matches(e))
            .cloned()
            .collect();

        // Ties on date fall back to insertion time, then id, so repeated
        // listings come back in the same order.
        result.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>> {
        let events = self.events.read().await;
        Ok(events.get(&id).cloned())
    }

    #[instrument(skip(self, event), fields(event_id = %event.id))]
    async fn create(&self, event: Event) -> Result<Event> {
        let mut events = self.events.write().await;
        events.insert(event.id, event.clone());

        tracing::info!(event_id = %event.id, "Created event");
        Ok(event)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use mockall::mock;

    mock! {
        pub EventRepository {}

        #[async_trait]
        impl EventRepository for EventRepository {
            async fn list(&self, query: &EventQuery) -> Result<Vec<Event>>;
            async fn get_by_id(&self, id: Uuid) -> Result<Option<Event>>;
            async fn create(&self, event: Event) -> Result<Event>;
            async fn ping(&self) -> Result<()>;
        }
    }
}
