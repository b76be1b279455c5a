//! Catalog API - product catalog REST server

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres;
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!("Connecting to PostgreSQL");
    let db = postgres::connect_from_config_with_retry(config.postgres.clone(), None).await?;

    postgres::run_migrations::<Migrator>(&db, config.app.name).await?;

    // Initialize the application state
    let state = AppState {
        config: config.clone(),
        db,
    };

    // Build the REST router
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} on port {}",
        state.config.app.name, state.config.server.port
    );

    // Run the server with graceful shutdown
    let db_for_cleanup = state.db.clone();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing PostgreSQL connections");
            db_for_cleanup.close().await.ok();
            info!("PostgreSQL connection closed");
        },
    )
    .await?;

    info!("Catalog API shutdown complete");
    Ok(())
}
