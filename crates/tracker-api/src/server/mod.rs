//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracker_common::{AppConfig, AppError, DiscordOAuthClient, JwtService};
use tracker_db::{connect, MongoTrackedUserRepository};
use tracker_service::ServiceContextBuilder;

use crate::middleware::{apply_middleware, apply_middleware_with_config};
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
///
/// Health probes get the base stack only, so they stay reachable while the
/// rate limiter is rejecting traffic.
pub fn create_app(state: AppState) -> Result<Router, AppError> {
    let config = state.config();

    let router = apply_middleware_with_config(
        create_router(),
        &config.rate_limit,
        &config.cors,
        config.app.env.is_production(),
    )?;

    let router = router.merge(apply_middleware(health_routes()));

    Ok(router.with_state(state))
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!(database = %config.mongo.database, "Connecting to MongoDB...");
    let database = connect(&config.mongo, &config.app.name).await?;
    info!("MongoDB client ready");

    let user_repo = Arc::new(MongoTrackedUserRepository::new(
        database,
        &config.mongo.collection,
    ));

    if config.discord.bot_token.is_none() {
        warn!("DISCORD_BOT_TOKEN not set, live lookup of untracked users is disabled");
    }
    let identity_provider = Arc::new(DiscordOAuthClient::new(&config.discord)?);

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expiry,
    ));

    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .identity_provider(identity_provider)
        .jwt_service(jwt_service)
        .admin_user_ids(config.access.admin_user_ids.iter().copied())
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address: {e}")))?;

    let state = create_app_state(config).await?;
    let app = create_app(state)?;

    run_server(app, addr).await
}
