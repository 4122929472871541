//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        version = "0.1.0",
        description = "REST API for listing, searching and creating conference and meetup events",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/events", api = domain_events::ApiDoc)
    ),
    tags(
        (name = "events", description = "Conference and meetup listings")
    )
)]
pub struct ApiDoc;
