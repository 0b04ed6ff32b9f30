//! Field-role tables for tracked user records
//!
//! Each entity in a tracked user document is described by a [`Schema`]: the
//! fields whose values need canonicalizing and the role each one plays. Fields
//! that are not listed pass through untouched. The tables include the
//! alternate names the tracking bot has written across schema revisions, so
//! supporting a renamed or new list field is a table entry.

/// How a field's value is canonicalized
#[derive(Debug, Clone, Copy)]
pub enum FieldRole {
    /// The store's own record id (`_id`)
    RecordId,
    /// A Discord snowflake, rendered as a decimal string
    Snowflake,
    /// An instant, rendered as epoch milliseconds
    Timestamp,
    /// A sub-document (or list of sub-documents) described by another schema
    Nested(&'static Schema),
}

/// Field-role table for one entity
#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [(&'static str, FieldRole)],
}

impl Schema {
    /// Role of a field, if the field needs canonicalizing
    pub fn role_of(&self, field: &str) -> Option<FieldRole> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, role)| *role)
    }
}

/// Root document: one tracked Discord user
pub static TRACKED_USER: Schema = Schema {
    name: "tracked_user",
    fields: &[
        ("_id", FieldRole::RecordId),
        ("user_id", FieldRole::Snowflake),
        ("userId", FieldRole::Snowflake),
        ("id", FieldRole::Snowflake),
        ("servers", FieldRole::Nested(&SERVER_ENTRY)),
        ("history", FieldRole::Nested(&HISTORY_ENTRY)),
        ("changeHistory", FieldRole::Nested(&HISTORY_ENTRY)),
        ("recent_messages", FieldRole::Nested(&MESSAGE_ENTRY)),
        ("recentMessages", FieldRole::Nested(&MESSAGE_ENTRY)),
        ("message_image_history", FieldRole::Nested(&MESSAGE_ENTRY)),
        ("imageHistory", FieldRole::Nested(&MESSAGE_ENTRY)),
        ("first_seen_overall", FieldRole::Timestamp),
        ("firstSeenOverall", FieldRole::Timestamp),
        ("last_seen_overall", FieldRole::Timestamp),
        ("lastSeenOverall", FieldRole::Timestamp),
        ("created_at", FieldRole::Timestamp),
        ("createdAt", FieldRole::Timestamp),
        ("updated_at", FieldRole::Timestamp),
        ("updatedAt", FieldRole::Timestamp),
    ],
};

/// A guild the user was observed in
pub static SERVER_ENTRY: Schema = Schema {
    name: "server_entry",
    fields: &[
        ("guild_id", FieldRole::Snowflake),
        ("guildId", FieldRole::Snowflake),
        ("first_seen", FieldRole::Timestamp),
        ("firstSeen", FieldRole::Timestamp),
        ("last_message_at", FieldRole::Timestamp),
        ("lastMessageAt", FieldRole::Timestamp),
        ("joined_at", FieldRole::Timestamp),
        ("joinedAt", FieldRole::Timestamp),
    ],
};

/// One entry of the append-only change log
pub static HISTORY_ENTRY: Schema = Schema {
    name: "history_entry",
    fields: &[
        ("changed_at", FieldRole::Timestamp),
        ("changedAt", FieldRole::Timestamp),
        ("changes", FieldRole::Nested(&CHANGE_SET)),
        ("changeSet", FieldRole::Nested(&CHANGE_SET)),
    ],
};

/// The changes recorded by one history entry. Username, avatar, banner and
/// nickname changes are plain strings; only a joined server carries ids and
/// dates.
pub static CHANGE_SET: Schema = Schema {
    name: "change_set",
    fields: &[
        ("server_joined", FieldRole::Nested(&SERVER_ENTRY)),
        ("serverJoined", FieldRole::Nested(&SERVER_ENTRY)),
        ("server", FieldRole::Nested(&SERVER_ENTRY)),
        ("guild_id", FieldRole::Snowflake),
        ("guildId", FieldRole::Snowflake),
    ],
};

/// An entry in the recent-message or image history logs
pub static MESSAGE_ENTRY: Schema = Schema {
    name: "message_entry",
    fields: &[
        ("guild_id", FieldRole::Snowflake),
        ("guildId", FieldRole::Snowflake),
        ("channel_id", FieldRole::Snowflake),
        ("channelId", FieldRole::Snowflake),
        ("message_id", FieldRole::Snowflake),
        ("messageId", FieldRole::Snowflake),
        ("timestamp", FieldRole::Timestamp),
        ("created_at", FieldRole::Timestamp),
        ("createdAt", FieldRole::Timestamp),
    ],
};
