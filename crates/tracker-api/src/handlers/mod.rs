//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod root;
pub mod tracked_users;
pub mod users;
