//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::OAuthCallbackQuery;
pub use responses::{
    AuthResponse, HealthChecks, HealthResponse, LogoutResponse, MeResponse, ReadinessResponse,
    RootResponse,
};
