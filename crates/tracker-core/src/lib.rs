//! # tracker-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! document normalizer for tracked Discord users.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod normalize;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{DiscordIdentity, Role};
pub use error::DomainError;
pub use normalize::normalize_document;
pub use traits::{IdentityProvider, RepoResult, TrackedUserRepository};
pub use value_objects::{Snowflake, SnowflakeParseError};
