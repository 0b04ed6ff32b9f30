//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{Snowflake, SnowflakeParseError};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Tracked user not found: {0}")]
    TrackedUserNotFound(Snowflake),

    #[error("User not tracked and live Discord lookup is disabled: {0}")]
    LiveLookupDisabled(Snowflake),

    #[error("User not found in the store nor on Discord: {0}")]
    DiscordUserNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid Discord user id: {0}")]
    InvalidSnowflake(#[from] SnowflakeParseError),

    // =========================================================================
    // External Collaborators (wrapped)
    // =========================================================================
    #[error("Identity provider error: {0}")]
    IdentityProvider(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::TrackedUserNotFound(_) => "USER_NOT_TRACKED",
            Self::LiveLookupDisabled(_) => "LIVE_LOOKUP_DISABLED",
            Self::DiscordUserNotFound(_) => "USER_NOT_FOUND",
            Self::InvalidSnowflake(_) => "INVALID_USER_ID",
            Self::IdentityProvider(_) => "IDENTITY_PROVIDER_ERROR",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TrackedUserNotFound(_) | Self::LiveLookupDisabled(_) | Self::DiscordUserNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidSnowflake(_))
    }

    /// Check if the failure came from an external collaborator
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::IdentityProvider(_) | Self::DatabaseError(_))
    }
}
