//! # tracker-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! the Discord OAuth2 client, and telemetry.

pub mod auth;
pub mod config;
pub mod discord;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{AccessToken, Claims, JwtService, StateClaims, TokenType, OAUTH_STATE_EXPIRY};
pub use config::{
    AccessConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DiscordOAuthConfig,
    Environment, FrontendConfig, JwtConfig, MongoConfig, RateLimitConfig, ServerConfig,
};
pub use discord::DiscordOAuthClient;
pub use error::{AppError, AppResult};
pub use telemetry::{try_init_tracing, try_init_tracing_with_config, TracingConfig, TracingError};
