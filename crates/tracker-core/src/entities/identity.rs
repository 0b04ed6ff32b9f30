//! Discord identity - the profile returned by the OAuth2 identity provider

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Discord CDN base URL
pub const DISCORD_CDN: &str = "https://cdn.discordapp.com";

/// A Discord account as reported by `GET /users/@me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscordIdentity {
    pub id: Snowflake,
    pub username: String,
    #[serde(default)]
    pub global_name: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub banner: Option<String>,
}

impl DiscordIdentity {
    /// Create an identity with only the required fields
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            global_name: None,
            avatar: None,
            discriminator: None,
            banner: None,
        }
    }

    /// Get the legacy tag (`username#1234`), if the account still has a discriminator
    pub fn tag(&self) -> Option<String> {
        self.discriminator
            .as_deref()
            .filter(|d| !d.is_empty() && *d != "0")
            .map(|d| format!("{}#{}", self.username, d))
    }

    /// Name shown in the dashboard: global name, else legacy tag, else username
    pub fn display_name(&self) -> String {
        self.global_name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(|| self.tag())
            .unwrap_or_else(|| self.username.clone())
    }

    /// Name the tracking bot records: legacy tag when present, else the display name
    pub fn tracked_username(&self) -> String {
        self.tag().unwrap_or_else(|| self.display_name())
    }

    /// Full avatar URL; animated hashes (`a_` prefix) are served as GIF
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar.as_deref().map(|hash| self.cdn_url("avatars", hash))
    }

    /// Full profile banner URL
    pub fn banner_url(&self) -> Option<String> {
        self.banner.as_deref().map(|hash| self.cdn_url("banners", hash))
    }

    fn cdn_url(&self, kind: &str, hash: &str) -> String {
        let ext = if hash.starts_with("a_") { "gif" } else { "png" };
        format!("{DISCORD_CDN}/{kind}/{}/{hash}.{ext}?size=1024", self.id)
    }
}
