//! Tracked user handlers
//!
//! Read access to the records the tracking bot keeps per Discord user.

use axum::{extract::State, Json};
use serde_json::Value;
use tracker_service::TrackedUserService;

use crate::extractors::{AdminUser, AuthUser, TrackedUserIdPath};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get a tracked user's record in canonical form
///
/// GET /api/avatars/{user_id}
/// GET /api/users/{user_id}
pub async fn get_tracked_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    TrackedUserIdPath(user_id): TrackedUserIdPath,
) -> ApiResult<Json<Value>> {
    let service = TrackedUserService::new(state.service_context());
    let record = service.get_normalized(user_id).await?;
    Ok(Json(record))
}

/// Get a tracked user's record exactly as stored (admin only)
///
/// GET /api/admin/users/{user_id}/raw
pub async fn get_raw_tracked_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    TrackedUserIdPath(user_id): TrackedUserIdPath,
) -> ApiResult<Json<Value>> {
    tracing::info!(admin_id = %admin.user_id, %user_id, "Raw record requested");

    let service = TrackedUserService::new(state.service_context());
    let record = service.get_raw(user_id).await?;
    Ok(Json(record))
}
