//! Document normalization
//!
//! Tracked user records are written by an external bot whose schema has
//! drifted over time: the same snowflake may be stored as a string, a number,
//! or a BSON `Long`, and the same instant as a native date or an extended-JSON
//! `$date` wrapper. This module rewrites a record into one canonical JSON form:
//!
//! - snowflakes become decimal strings (never numbers, which lose precision
//!   above 2^53),
//! - timestamps become integer epoch milliseconds,
//! - the store's `ObjectId` becomes its hex string,
//! - everything else is left as stored.
//!
//! Normalization is pure and idempotent, and unrecognized shapes pass through
//! rather than fail.

mod convert;
mod document;
mod schema;
mod wire;

pub use convert::{record_id_to_string, snowflake_to_string, timestamp_to_millis, MAX_SAFE_INTEGER};
pub use document::{normalize_document, normalize_with};
pub use schema::{
    FieldRole, Schema, CHANGE_SET, HISTORY_ENTRY, MESSAGE_ENTRY, SERVER_ENTRY, TRACKED_USER,
};
pub use wire::{classify, parse_iso8601, WireForm};
