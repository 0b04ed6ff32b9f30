//! Database client management

mod mongo;

pub use mongo::{connect, ping};

// Re-export the driver handle for convenience
pub use mongodb::Database;
