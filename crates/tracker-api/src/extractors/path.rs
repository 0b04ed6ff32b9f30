//! Path parameter extractors
//!
//! Type-safe extraction of Discord user IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use serde::Deserialize;
use tracker_core::{DomainError, Snowflake};

use crate::response::ApiError;

#[derive(Debug, Deserialize)]
struct UserIdParams {
    user_id: String,
}

/// A `:user_id` segment holding a 17 to 20 digit Discord ID
#[derive(Debug, Clone, Copy)]
pub struct TrackedUserIdPath(pub Snowflake);

#[async_trait]
impl<S> FromRequestParts<S> for TrackedUserIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<UserIdParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.to_string()))?;

        let user_id = Snowflake::parse_discord_id(params.user_id.trim())
            .map_err(|e| ApiError::Domain(DomainError::from(e)))?;

        Ok(TrackedUserIdPath(user_id))
    }
}
