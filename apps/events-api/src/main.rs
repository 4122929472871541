use axum::Router;
use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use domain_events::{EventService, MongoEventRepository};
use tracing::{info, warn};

mod api;
mod config;
mod openapi;
mod state;

use config::{Config, StorageBackend};
use state::{AppState, Storage};

/// Graceful shutdown budget for in-flight requests and cleanup
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// Full application router: `/api/events`, docs, `/health` and `/ready`.
fn build_app(state: &AppState) -> eyre::Result<Router> {
    let router = create_router::<openapi::ApiDoc>(api::routes(state), &state.config.server)?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(api::health::router(state.clone())))
}

async fn connect_storage(config: &Config) -> eyre::Result<Storage> {
    let mongodb = match (config.storage, &config.mongodb) {
        (StorageBackend::Memory, _) => {
            warn!("Events are kept in memory and will be lost on restart");
            return Ok(Storage::memory());
        }
        (StorageBackend::Mongodb, Some(mongodb)) => mongodb,
        (StorageBackend::Mongodb, None) => eyre::bail!("MongoDB storage selected without settings"),
    };

    info!("Connecting to MongoDB at {}", mongodb.redacted_url());

    let client = database::mongodb::connect_from_config_with_retry(mongodb, None).await?;
    let db = client.database(mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        mongodb.database()
    );

    let repository = MongoEventRepository::new(&db);
    api::events::init_indexes(&repository).await?;

    Ok(Storage::Mongo {
        client,
        events: EventService::new(repository),
    })
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // A missing .env is fine; the process environment still applies
    let dotenv = dotenvy::dotenv();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let storage = connect_storage(&config).await?;
    info!(storage = %config.storage, "Event storage ready");

    let state = AppState { config, storage };
    let app = build_app(&state)?;

    info!("Starting Events API with graceful shutdown ({:?} timeout)", SHUTDOWN_TIMEOUT);

    let storage = state.storage.clone();
    create_production_app(app, &state.config.server, SHUTDOWN_TIMEOUT, async move {
        if let Storage::Mongo { client, .. } = storage {
            info!("Shutting down: closing MongoDB connections");
            client.shutdown().await;
            info!("MongoDB connection closed successfully");
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Events API shutdown complete");
    Ok(())
}
