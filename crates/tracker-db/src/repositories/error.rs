//! Error handling utilities for repositories

use tracker_core::DomainError;

/// Convert a driver error to DomainError
pub fn map_db_error(e: mongodb::error::Error) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}
