//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Tracked user records are owned by the bot that
//! writes them, so the repository is read-only and hands records back in their
//! stored (relaxed extended JSON) shape; canonicalizing them is the caller's
//! job, see [`crate::normalize`].

use async_trait::async_trait;
use serde_json::Value;

use crate::entities::DiscordIdentity;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Tracked User Repository
// ============================================================================

#[async_trait]
pub trait TrackedUserRepository: Send + Sync {
    /// Find the tracking record for a Discord user, regardless of whether the
    /// id was stored as a string or an integer
    async fn find_by_user_id(&self, user_id: Snowflake) -> RepoResult<Option<Value>>;

    /// Check that the store is reachable
    async fn ping(&self) -> RepoResult<()>;
}

// ============================================================================
// Identity Provider
// ============================================================================

/// OAuth2 identity provider: turns an authorization code into a profile, and
/// optionally looks up arbitrary users with a bot credential
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to, carrying the opaque `state` value
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange an authorization code for the authenticated user's profile
    async fn exchange_code(&self, code: &str) -> RepoResult<DiscordIdentity>;

    /// Look up any user's public profile. `Ok(None)` means Discord has no
    /// such user.
    ///
    /// Providers without a bot credential fail with
    /// [`DomainError::LiveLookupDisabled`].
    async fn fetch_user(&self, user_id: Snowflake) -> RepoResult<Option<DiscordIdentity>> {
        Err(DomainError::LiveLookupDisabled(user_id))
    }
}
