//! Business logic services
//!
//! Services borrow the shared [`ServiceContext`] for the duration of a
//! request and orchestrate repositories and collaborators.

pub mod auth;
pub mod context;
pub mod error;
pub mod health;
pub mod tracked_user;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use tracked_user::TrackedUserService;
