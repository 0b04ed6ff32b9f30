//! Application configuration structs
//!
//! Loads configuration from environment variables (a `.env` file is honored).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

use tracker_core::Snowflake;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub mongo: MongoConfig,
    pub discord: DiscordOAuthConfig,
    pub frontend: FrontendConfig,
    pub jwt: JwtConfig,
    pub access: AccessConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" => Ok(Self::Development),
            _ => Err(ConfigError::InvalidValue("APP_ENV", s.to_string())),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    #[serde(default = "default_mongo_db_name")]
    pub database: String,
    #[serde(default = "default_mongo_collection")]
    pub collection: String,
    #[serde(default = "default_server_selection_timeout_secs")]
    pub server_selection_timeout_secs: u64,
}

/// Discord OAuth2 application credentials
#[derive(Debug, Clone, Deserialize)]
pub struct DiscordOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Registered redirect URI, `.../auth/discord/callback`
    pub callback_url: String,
    /// Bot token for looking up users that are not tracked; unset disables it
    #[serde(default)]
    pub bot_token: Option<String>,
}

/// Where the browser is sent after login and logout
#[derive(Debug, Clone, Deserialize)]
pub struct FrontendConfig {
    pub login_url: String,
    pub dashboard_url: String,
}

/// JWT configuration
#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry: i64,
}

/// Role assignment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessConfig {
    #[serde(default)]
    pub admin_user_ids: Vec<Snowflake>,
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u32,
    #[serde(default = "default_burst")]
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "discord-user-tracker".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_mongo_db_name() -> String {
    "tracker_db".to_string()
}

fn default_mongo_collection() -> String {
    "users".to_string()
}

fn default_server_selection_timeout_secs() -> u64 {
    5
}

fn default_access_token_expiry() -> i64 {
    604800 // 7 days
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required keys are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: vars
                    .get("APP_ENV")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port: vars.parsed("PORT")?.unwrap_or_else(default_port),
            },
            mongo: MongoConfig {
                uri: vars.required("MONGO_URI")?,
                database: vars.get("MONGO_DB_NAME").unwrap_or_else(default_mongo_db_name),
                collection: vars
                    .get("MONGO_COLLECTION")
                    .unwrap_or_else(default_mongo_collection),
                server_selection_timeout_secs: vars
                    .parsed("MONGO_SERVER_SELECTION_TIMEOUT_SECS")?
                    .unwrap_or_else(default_server_selection_timeout_secs),
            },
            discord: DiscordOAuthConfig {
                client_id: vars.required("DISCORD_CLIENT_ID")?,
                client_secret: vars.required("DISCORD_CLIENT_SECRET")?,
                callback_url: vars.required("CALLBACK_URL")?,
                bot_token: vars.get("DISCORD_BOT_TOKEN"),
            },
            frontend: FrontendConfig {
                login_url: vars.required("FRONTEND_LOGIN_URL")?,
                dashboard_url: vars.required("FRONTEND_DASHBOARD_URL")?,
            },
            jwt: JwtConfig {
                secret: vars.required("JWT_SECRET")?,
                access_token_expiry: vars
                    .parsed("JWT_ACCESS_TOKEN_EXPIRY")?
                    .unwrap_or_else(default_access_token_expiry),
            },
            access: AccessConfig {
                admin_user_ids: vars.list("ADMIN_USER_IDS", |id| {
                    Snowflake::parse_discord_id(id).map_err(|e| e.to_string())
                })?,
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parsed("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: vars.parsed("RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: vars.list("FRONTEND_CORS_ORIGIN", |s| {
                    Ok::<_, String>(s.to_string())
                })?,
            },
        })
    }

    /// Check if a Discord user is configured as an admin
    #[must_use]
    pub fn is_admin(&self, user_id: Snowflake) -> bool {
        self.access.admin_user_ids.contains(&user_id)
    }
}

/// Key lookup with typed accessors. Blank values count as unset.
struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.get(key).ok_or(ConfigError::MissingVar(key))
    }

    fn parsed<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.get(key)
            .map(|raw| {
                raw.parse()
                    .map_err(|_| ConfigError::InvalidValue(key, raw.clone()))
            })
            .transpose()
    }

    fn list<T, E, P>(&self, key: &'static str, parse: P) -> Result<Vec<T>, ConfigError>
    where
        P: Fn(&str) -> Result<T, E>,
        E: std::fmt::Display,
    {
        let Some(raw) = self.get(key) else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| {
                parse(item).map_err(|e| ConfigError::InvalidValue(key, format!("{item}: {e}")))
            })
            .collect()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
