//! Tracked user service
//!
//! Looks up tracking records and canonicalizes them for the dashboard. Users
//! the bot has never seen can still be shown from a live Discord lookup; that
//! profile is returned in the record shape but never stored.

use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use tracker_core::normalize::normalize_document;
use tracker_core::{DiscordIdentity, DomainError, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Tracked user service
pub struct TrackedUserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TrackedUserService<'a> {
    /// Create a new TrackedUserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get a tracked user's record in canonical JSON form, falling back to a
    /// live Discord lookup when the user is not tracked
    #[instrument(skip(self))]
    pub async fn get_normalized(&self, user_id: Snowflake) -> ServiceResult<Value> {
        let raw = self.ctx.user_repo().find_by_user_id(user_id).await?;

        if let Some(record) = normalize_document(raw.as_ref()) {
            debug!("tracked user record normalized");
            return Ok(record);
        }

        info!("user not tracked, looking up on Discord");
        let identity = self
            .ctx
            .identity_provider()
            .fetch_user(user_id)
            .await?
            .ok_or(DomainError::DiscordUserNotFound(user_id))?;

        Ok(live_record(&identity))
    }

    /// Get a tracked user's record exactly as stored
    #[instrument(skip(self))]
    pub async fn get_raw(&self, user_id: Snowflake) -> ServiceResult<Value> {
        let raw = self
            .ctx
            .user_repo()
            .find_by_user_id(user_id)
            .await?
            .ok_or(DomainError::TrackedUserNotFound(user_id))?;

        Ok(raw)
    }
}

/// A Discord profile in the tracked record shape, with nothing observed yet
fn live_record(identity: &DiscordIdentity) -> Value {
    json!({
        "user_id": identity.id.to_string(),
        "username_global": identity.tracked_username(),
        "avatar_urls": identity.avatar_url().into_iter().collect::<Vec<_>>(),
        "banner_urls": identity.banner_url().into_iter().collect::<Vec<_>>(),
        "nicknames": [],
        "servers": [],
        "history": [],
    })
}
