//! HTTP handlers for events API

use crate::error::EventError;
use crate::models::{CreateEvent, Event, EventFilter};
use crate::repository::EventRepository;
use crate::service::EventService;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_helpers::errors::responses::{
    BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
    NotFoundResponse,
};
use axum_helpers::{QueryParams, UuidPath, ValidatedJson};
use std::sync::Arc;
use tracing::instrument;

/// Events router state
pub type EventsState<R> = Arc<EventService<R>>;

/// Router for `/`, `/{id}`; mount it under `/events`.
pub fn events_router<R: EventRepository + 'static>(service: EventService<R>) -> Router {
    Router::new()
        .route("/", get(list_events::<R>).post(create_event::<R>))
        .route("/{id}", get(get_event::<R>))
        .with_state(Arc::new(service))
}

/// List events, oldest first
#[utoipa::path(
    get,
    path = "",
    params(EventFilter),
    responses(
        (status = 200, description = "Matching events sorted by date", body = Vec<Event>),
        (status = 400, description = "Malformed query string", body = axum_helpers::ErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn list_events<R: EventRepository>(
    State(state): State<EventsState<R>>,
    QueryParams(filter): QueryParams<EventFilter>,
) -> Result<Json<Vec<Event>>, EventError> {
    let events = state.list_events(&filter).await?;
    Ok(Json(events))
}

/// Get event by ID
#[utoipa::path(
    get,
    path = "/{id}",
    params(
        ("id" = uuid::Uuid, Path, description = "Event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state))]
pub async fn get_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    UuidPath(id): UuidPath,
) -> Result<Json<Event>, EventError> {
    let event = state.get_event(id).await?;
    Ok(Json(event))
}

/// Create a new event
#[utoipa::path(
    post,
    path = "",
    request_body = CreateEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip(state, create), fields(title = ?create.title))]
pub async fn create_event<R: EventRepository>(
    State(state): State<EventsState<R>>,
    ValidatedJson(create): ValidatedJson<CreateEvent>,
) -> Result<impl IntoResponse, EventError> {
    let event = state.create_event(create).await?;
    Ok((StatusCode::CREATED, Json(event)))
}
