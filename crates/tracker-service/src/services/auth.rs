//! Authentication service
//!
//! Drives the Discord OAuth2 login: issue a signed state, send the browser to
//! the provider, then verify the state on the way back, exchange the code,
//! and mint an access token carrying the user's role.

use tracing::{info, instrument, warn};

use tracker_common::auth::Claims;

use crate::dto::{AuthResponse, MeResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Build the provider URL that starts a login
    #[instrument(skip(self))]
    pub fn login_url(&self) -> ServiceResult<String> {
        let state = self.ctx.jwt_service().issue_oauth_state()?;
        Ok(self.ctx.identity_provider().authorize_url(&state))
    }

    /// Finish a login from the provider's callback parameters
    #[instrument(skip(self, code, state))]
    pub async fn complete_login(&self, code: &str, state: &str) -> ServiceResult<AuthResponse> {
        self.ctx.jwt_service().validate_oauth_state(state).map_err(|e| {
            warn!("Login rejected: bad OAuth state");
            ServiceError::from(e)
        })?;

        if code.trim().is_empty() {
            return Err(ServiceError::validation("authorization code is required"));
        }

        let identity = self.ctx.identity_provider().exchange_code(code).await?;
        let role = self.ctx.role_for(identity.id);

        let token = self
            .ctx
            .jwt_service()
            .issue_access_token(&identity, role)?;

        info!(user_id = %identity.id, %role, "User logged in");

        Ok(AuthResponse::new(token, MeResponse::new(&identity, role)))
    }

    /// Profile of the bearer of an access token
    pub fn current_user(&self, claims: &Claims) -> ServiceResult<MeResponse> {
        let identity = claims.identity()?;
        Ok(MeResponse::new(&identity, claims.role))
    }
}
