//! Test fixtures and data generators
//!
//! Tracked user records shaped the way the tracking bot stores them, and the
//! identities used to log in.

use serde::Deserialize;
use serde_json::{json, Value};
use tracker_core::{DiscordIdentity, Snowflake};

/// A user with a stored tracking record
pub const TRACKED_ID: u64 = 826_678_506_925_801_482;

/// A user nobody has tracked
pub const UNTRACKED_ID: u64 = 826_678_506_925_801_999;

/// The single configured admin
pub const ADMIN_ID: u64 = 900_000_000_000_000_001;

/// A regular dashboard user
pub const VIEWER_ID: u64 = 700_000_000_000_000_007;

/// Discord identity as returned by `/users/@me`
pub fn identity(id: u64, username: &str) -> DiscordIdentity {
    DiscordIdentity {
        id: Snowflake::new(id),
        username: username.to_string(),
        global_name: Some(format!("{username} (global)")),
        avatar: Some("a_1f2e3d".to_string()),
        discriminator: Some("0".to_string()),
        banner: None,
    }
}

/// Stored record in relaxed extended JSON, mixing the encodings the bot has
/// written over time
pub fn stored_record() -> Value {
    json!({
        "_id": { "$oid": "64500f1b2c3d4e5f60718293" },
        "user_id": { "$numberLong": "826678506925801482" },
        "username_global": "celeste",
        "avatar_urls": ["https://cdn.discordapp.com/avatars/826678506925801482/a_1f2e3d.gif"],
        "servers": [
            {
                "guild_id": { "$numberLong": "111111111111111111" },
                "guild_name": "Alpha",
                "first_seen": { "$date": { "$numberLong": "1682942400000" } }
            },
            {
                "guild_id": "222222222222222222",
                "guild_name": "Beta",
                "first_seen": { "$date": "2023-05-01T12:00:00Z" }
            }
        ],
        "history": [
            {
                "changed_at": { "$date": { "$numberLong": "1000" } },
                "changes": {
                    "server_joined": {
                        "guild_id": { "$numberLong": "333333333333333333" },
                        "first_seen": { "$date": { "$numberLong": "2000" } }
                    }
                }
            }
        ],
        "recent_messages": [
            {
                "guild_id": { "$numberLong": "111111111111111111" },
                "channel_id": { "$numberLong": "444444444444444444" },
                "message_id": { "$numberLong": "555555555555555555" },
                "timestamp": { "$date": { "$numberLong": "4000" } },
                "content": "hello"
            }
        ],
        "first_seen_overall": { "$date": { "$numberLong": "1000" } },
        "last_seen_overall": { "$date": { "$numberLong": "0" } }
    })
}

/// `GET /api/me` body
#[derive(Debug, Deserialize)]
pub struct MeBody {
    pub id: String,
    pub username: String,
    pub global_name: Option<String>,
    pub avatar: Option<String>,
    pub avatar_url: Option<String>,
    pub display_name: String,
    pub role: String,
}

/// Error envelope returned by every failing endpoint
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}
