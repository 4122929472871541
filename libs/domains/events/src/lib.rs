//! Events Domain
//!
//! Conferences and meetups: list with `type`/`search` filtering, fetch by
//! id and create, backed by MongoDB (or memory for local runs and tests).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ handlers   GET / ─ GET /{id} ─ POST /                    │
//! │    │         (UuidPath, ValidatedJson<CreateEvent>)      │
//! │    ▼                                                     │
//! │ EventService ── EventFilter ──► EventQuery               │
//! │    │                                                     │
//! │    ▼                                                     │
//! │ EventRepository ─┬─► MongoEventRepository (`events`)     │
//! │                  └─► InMemoryEventRepository             │
//! └──────────────────────────────────────────────────────────┘
//! ```

use utoipa::OpenApi;

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod query;
pub mod repository;
pub mod service;

pub use error::{EventError, NOT_FOUND_MESSAGE, Result};
pub use handlers::events_router;
pub use models::{CreateEvent, Event, EventFilter, EventType, Session, Speaker, Venue};
pub use mongodb::MongoEventRepository;
pub use query::EventQuery;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::EventService;

/// OpenAPI documentation for Events API
#[derive(OpenApi)]
#[openapi(
    paths(handlers::list_events, handlers::get_event, handlers::create_event),
    components(schemas(Event, CreateEvent, EventType, Session, Speaker, Venue)),
    tags(
        (name = "events", description = "Conference and meetup listings")
    )
)]
pub struct ApiDoc;
