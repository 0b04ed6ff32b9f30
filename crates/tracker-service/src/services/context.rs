//! Service context - dependency container for services
//!
//! Holds the store repository, the identity provider, and the token service.
//! Everything is built once at startup and shared behind `Arc`s.

use std::collections::HashSet;
use std::sync::Arc;

use tracker_common::auth::JwtService;
use tracker_core::traits::{IdentityProvider, TrackedUserRepository};
use tracker_core::{Role, Snowflake};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
#[derive(Clone)]
pub struct ServiceContext {
    // Repositories
    user_repo: Arc<dyn TrackedUserRepository>,

    // External collaborators
    identity_provider: Arc<dyn IdentityProvider>,

    // Services
    jwt_service: Arc<JwtService>,

    // Role assignment
    admin_user_ids: Arc<HashSet<Snowflake>>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        user_repo: Arc<dyn TrackedUserRepository>,
        identity_provider: Arc<dyn IdentityProvider>,
        jwt_service: Arc<JwtService>,
        admin_user_ids: HashSet<Snowflake>,
    ) -> Self {
        Self {
            user_repo,
            identity_provider,
            jwt_service,
            admin_user_ids: Arc::new(admin_user_ids),
        }
    }

    // === Repositories ===

    /// Get the tracked user repository
    pub fn user_repo(&self) -> &dyn TrackedUserRepository {
        self.user_repo.as_ref()
    }

    // === External Collaborators ===

    /// Get the OAuth2 identity provider
    pub fn identity_provider(&self) -> &dyn IdentityProvider {
        self.identity_provider.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Role granted to a Discord user at login
    pub fn role_for(&self, user_id: Snowflake) -> Role {
        if self.admin_user_ids.contains(&user_id) {
            Role::Admin
        } else {
            Role::User
        }
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("user_repo", &"dyn TrackedUserRepository")
            .field("identity_provider", &"dyn IdentityProvider")
            .field("jwt_service", &self.jwt_service)
            .field("admin_user_ids", &self.admin_user_ids.len())
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn TrackedUserRepository>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
    jwt_service: Option<Arc<JwtService>>,
    admin_user_ids: HashSet<Snowflake>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn TrackedUserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn admin_user_ids(mut self, ids: impl IntoIterator<Item = Snowflake>) -> Self {
        self.admin_user_ids.extend(ids);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.identity_provider
                .ok_or_else(|| ServiceError::validation("identity_provider is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.admin_user_ids,
        ))
    }
}
