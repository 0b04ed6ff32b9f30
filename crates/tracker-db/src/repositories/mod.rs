//! Repository implementations
//!
//! MongoDB implementations of the repository traits defined in tracker-core.
//! The collection is owned by the tracking bot; nothing here writes to it.

mod error;
mod tracked_user;

pub use error::map_db_error;
pub use tracked_user::{to_extended_json, user_id_filter, MongoTrackedUserRepository};
