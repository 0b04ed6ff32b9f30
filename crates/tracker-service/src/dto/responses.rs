//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use serde::Serialize;

use tracker_common::auth::AccessToken;
use tracker_core::Role;

// ============================================================================
// Auth Responses
// ============================================================================

/// Authentication result with the issued token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: MeResponse,
}

impl AuthResponse {
    pub fn new(token: AccessToken, user: MeResponse) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            user,
        }
    }
}

/// Logged-in user's own profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub username: String,
    pub global_name: Option<String>,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub avatar_url: Option<String>,
    pub display_name: String,
    pub role: Role,
}

/// Logout acknowledgement; the client discards its token and follows `redirectTo`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutResponse {
    pub message: String,
    pub redirect_to: String,
}

impl LogoutResponse {
    pub fn new(redirect_to: impl Into<String>) -> Self {
        Self {
            message: "Logged out".to_string(),
            redirect_to: redirect_to.into(),
        }
    }
}

// ============================================================================
// Service Info
// ============================================================================

/// Response for `GET /`
#[derive(Debug, Clone, Serialize)]
pub struct RootResponse {
    pub message: String,
    pub version: &'static str,
}

impl RootResponse {
    pub fn online(app_name: &str) -> Self {
        Self {
            message: format!("{app_name} is online"),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
