//! Configuration structs

mod app_config;

pub use app_config::{
    AccessConfig, AppConfig, AppSettings, ConfigError, CorsConfig, DiscordOAuthConfig,
    Environment, FrontendConfig, JwtConfig, MongoConfig, RateLimitConfig, ServerConfig,
};
