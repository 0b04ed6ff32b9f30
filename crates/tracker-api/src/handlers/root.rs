//! Service banner and unmatched routes

use axum::{extract::State, http::Uri, Json};
use tracker_service::RootResponse;

use crate::response::ApiError;
use crate::state::AppState;

/// Service banner
///
/// GET /
pub async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    Json(RootResponse::online(&state.config().app.name))
}

/// Fallback for every path no route matches
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}
