//! # tracker-db
//!
//! Database layer implementing repository traits with MongoDB.
//!
//! ## Overview
//!
//! - Client construction from [`tracker_common::MongoConfig`]
//! - A read-only [`MongoTrackedUserRepository`] that returns stored documents
//!   as relaxed extended JSON, ready for [`tracker_core::normalize_document`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tracker_db::{connect, MongoTrackedUserRepository};
//!
//! async fn example(config: &tracker_common::AppConfig) -> Result<(), tracker_core::DomainError> {
//!     let database = connect(&config.mongo, &config.app.name).await?;
//!     let repo = MongoTrackedUserRepository::new(database, &config.mongo.collection);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{connect, ping, Database};
pub use repositories::MongoTrackedUserRepository;
