//! Route definitions
//!
//! Browser-facing login routes at the root, JSON routes under /api.

use axum::{routing::get, Router};

use crate::handlers::{auth, health, root, tracked_users, users};
use crate::state::AppState;

/// Create the main router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root::root))
        .merge(auth_routes())
        .nest("/api", api_routes())
        .fallback(root::not_found)
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Discord OAuth2 login routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/discord", get(auth::discord_login))
        .route("/auth/discord/callback", get(auth::discord_callback))
        .route("/auth/logout", get(auth::logout))
}

/// Authenticated JSON routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(users::get_current_user))
        // Tracked users; both paths serve the same record
        .route("/avatars/:user_id", get(tracked_users::get_tracked_user))
        .route("/users/:user_id", get(tracked_users::get_tracked_user))
        // Admin
        .route(
            "/admin/users/:user_id/raw",
            get(tracked_users::get_raw_tracked_user),
        )
}
