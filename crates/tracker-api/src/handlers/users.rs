//! User handlers
//!
//! The logged-in user's own profile, read straight from the token.

use axum::{extract::State, Json};
use tracker_service::{AuthService, MeResponse};

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get current user
///
/// GET /api/me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MeResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.current_user(&auth.claims)?;
    Ok(Json(response))
}
