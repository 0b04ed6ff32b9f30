//! In-memory stand-ins for the store and the identity provider

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;
use tracker_core::{
    DiscordIdentity, DomainError, IdentityProvider, RepoResult, Snowflake, TrackedUserRepository,
};

/// Authorization code the stub provider accepts
pub const GOOD_CODE: &str = "good-code";

/// Tracked user store backed by a map
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<Snowflake, Value>>,
    down: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under a Discord id, as the tracking bot would
    pub fn insert(&self, user_id: u64, record: Value) {
        if let Ok(mut records) = self.records.write() {
            records.insert(Snowflake::new(user_id), record);
        }
    }

    /// Make every call fail as if the database were unreachable
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> RepoResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError(
                "server selection timeout".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TrackedUserRepository for MemoryStore {
    async fn find_by_user_id(&self, user_id: Snowflake) -> RepoResult<Option<Value>> {
        self.check()?;
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::DatabaseError("store lock poisoned".to_string()))?;
        Ok(records.get(&user_id).cloned())
    }

    async fn ping(&self) -> RepoResult<()> {
        self.check()
    }
}

/// Discord stand-in: every login with [`GOOD_CODE`] yields the same identity.
/// Live user lookups stay disabled until [`StubDiscord::enable_live_lookup`].
#[derive(Debug)]
pub struct StubDiscord {
    identity: DiscordIdentity,
    live_users: RwLock<HashMap<Snowflake, DiscordIdentity>>,
    live_lookup: AtomicBool,
    lookups_fail: AtomicBool,
}

impl StubDiscord {
    pub fn new(identity: DiscordIdentity) -> Self {
        Self {
            identity,
            live_users: RwLock::default(),
            live_lookup: AtomicBool::new(false),
            lookups_fail: AtomicBool::new(false),
        }
    }

    /// Behave as if a bot token were configured
    pub fn enable_live_lookup(&self) {
        self.live_lookup.store(true, Ordering::SeqCst);
    }

    /// Make a user known to Discord without being tracked
    pub fn add_live_user(&self, identity: DiscordIdentity) {
        if let Ok(mut users) = self.live_users.write() {
            users.insert(identity.id, identity);
        }
    }

    /// Make every live lookup fail as if Discord were erroring
    pub fn fail_lookups(&self) {
        self.lookups_fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl IdentityProvider for StubDiscord {
    fn authorize_url(&self, state: &str) -> String {
        format!(
            "https://discord.test/oauth2/authorize?response_type=code&scope=identify&state={state}"
        )
    }

    async fn exchange_code(&self, code: &str) -> RepoResult<DiscordIdentity> {
        if code == GOOD_CODE {
            Ok(self.identity.clone())
        } else {
            Err(DomainError::IdentityProvider(
                "token exchange failed: invalid_grant".to_string(),
            ))
        }
    }

    async fn fetch_user(&self, user_id: Snowflake) -> RepoResult<Option<DiscordIdentity>> {
        if !self.live_lookup.load(Ordering::SeqCst) {
            return Err(DomainError::LiveLookupDisabled(user_id));
        }
        if self.lookups_fail.load(Ordering::SeqCst) {
            return Err(DomainError::IdentityProvider(
                "user lookup failed with status 503".to_string(),
            ));
        }
        let users = self
            .live_users
            .read()
            .map_err(|_| DomainError::IdentityProvider("lookup lock poisoned".to_string()))?;
        Ok(users.get(&user_id).cloned())
    }
}
