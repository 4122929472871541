//! Application state management.
//!
//! The state carries the configuration and the storage handles created once
//! at startup and cloned into every router that needs them.

use domain_events::{EventError, EventService, InMemoryEventRepository, MongoEventRepository};
use mongodb::Client;

/// Connected storage backend with its event service
#[derive(Clone)]
pub enum Storage {
    /// MongoDB client (cloneable, shares underlying connection pool)
    Mongo {
        client: Client,
        events: EventService<MongoEventRepository>,
    },
    Memory {
        events: EventService<InMemoryEventRepository>,
    },
}

impl Storage {
    /// Empty process-local store
    pub fn memory() -> Self {
        Self::Memory {
            events: EventService::new(InMemoryEventRepository::new()),
        }
    }

    /// Name reported by `/ready`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mongo { .. } => "mongodb",
            Self::Memory { .. } => "memory",
        }
    }

    pub async fn ping(&self) -> Result<(), EventError> {
        match self {
            Self::Mongo { events, .. } => events.ping().await,
            Self::Memory { events } => events.ping().await,
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    pub storage: Storage,
}
