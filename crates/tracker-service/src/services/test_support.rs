//! In-memory doubles for service tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use tracker_common::auth::JwtService;
use tracker_core::{DiscordIdentity, DomainError, IdentityProvider, RepoResult, Snowflake, TrackedUserRepository};

use super::context::{ServiceContext, ServiceContextBuilder};

pub const ADMIN_ID: u64 = 900000000000000001;

#[derive(Default)]
pub struct InMemoryRepo {
    pub records: HashMap<Snowflake, Value>,
    pub down: AtomicBool,
}

impl InMemoryRepo {
    pub fn with_record(mut self, id: u64, record: Value) -> Self {
        self.records.insert(Snowflake::new(id), record);
        self
    }

    pub fn unavailable(self) -> Self {
        self.down.store(true, Ordering::SeqCst);
        self
    }

    fn check(&self) -> RepoResult<()> {
        if self.down.load(Ordering::SeqCst) {
            Err(DomainError::DatabaseError("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl TrackedUserRepository for InMemoryRepo {
    async fn find_by_user_id(&self, user_id: Snowflake) -> RepoResult<Option<Value>> {
        self.check()?;
        Ok(self.records.get(&user_id).cloned())
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check()
    }
}

/// Accepts the code `"good"` and returns the configured identity. Live
/// lookups are disabled unless a live user or `with_live_lookup` is set.
#[derive(Default)]
pub struct StubProvider {
    pub identity: Option<DiscordIdentity>,
    pub live_users: HashMap<Snowflake, DiscordIdentity>,
    pub live_lookup: bool,
    pub lookups_fail: bool,
}

impl StubProvider {
    pub fn returning(identity: DiscordIdentity) -> Self {
        Self {
            identity: Some(identity),
            ..Self::default()
        }
    }

    pub fn with_live_lookup(mut self) -> Self {
        self.live_lookup = true;
        self
    }

    pub fn with_live_user(mut self, identity: DiscordIdentity) -> Self {
        self.live_users.insert(identity.id, identity);
        self.with_live_lookup()
    }

    pub fn failing_lookups(mut self) -> Self {
        self.lookups_fail = true;
        self
    }
}

#[async_trait]
impl IdentityProvider for StubProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://discord.test/oauth2/authorize?state={state}")
    }

    async fn exchange_code(&self, code: &str) -> RepoResult<DiscordIdentity> {
        match (&self.identity, code) {
            (Some(identity), "good") => Ok(identity.clone()),
            _ => Err(DomainError::IdentityProvider("invalid_grant".to_string())),
        }
    }

    async fn fetch_user(&self, user_id: Snowflake) -> RepoResult<Option<DiscordIdentity>> {
        if !self.live_lookup {
            return Err(DomainError::LiveLookupDisabled(user_id));
        }
        if self.lookups_fail {
            return Err(DomainError::IdentityProvider("user lookup failed with status 500".to_string()));
        }
        Ok(self.live_users.get(&user_id).cloned())
    }
}

pub fn test_context(repo: InMemoryRepo, provider: StubProvider) -> ServiceContext {
    ServiceContextBuilder::new()
        .user_repo(Arc::new(repo))
        .identity_provider(Arc::new(provider))
        .jwt_service(Arc::new(JwtService::new("service-test-secret-key", 3600)))
        .admin_user_ids([Snowflake::new(ADMIN_ID)])
        .build()
        .expect("test context")
}
