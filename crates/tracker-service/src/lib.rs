//! # tracker-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, HealthResponse, LogoutResponse, MeResponse, OAuthCallbackQuery,
    ReadinessResponse, RootResponse,
};
pub use services::{
    AuthService, HealthService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult, TrackedUserService,
};
