//! Axum extractors for request handling
//!
//! Custom extractors for authentication and path parameters.

mod auth;
mod path;

pub use auth::{AdminUser, AuthUser};
pub use path::TrackedUserIdPath;
