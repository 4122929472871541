//! Events API routes
//!
//! Wires the events domain to the configured storage backend.

use crate::state::{AppState, Storage};
use axum::Router;
use domain_events::MongoEventRepository;
use tracing::info;

/// Create the events router for the connected storage
pub fn router(state: &AppState) -> Router {
    match &state.storage {
        Storage::Mongo { events, .. } => domain_events::events_router(events.clone()),
        Storage::Memory { events } => domain_events::events_router(events.clone()),
    }
}

/// Initialize event indexes in MongoDB
pub async fn init_indexes(repository: &MongoEventRepository) -> eyre::Result<()> {
    repository
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create event indexes: {}", e))?;
    info!("Event collection indexes created");
    Ok(())
}
