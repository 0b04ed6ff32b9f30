//! Discord OAuth2 client
//!
//! Implements the authorization-code flow against Discord with the `identify`
//! scope: build the authorize URL, trade the returned code for an access
//! token, then read the user's profile. With a bot token configured it can
//! also look up any user by id.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use tracker_core::{DiscordIdentity, DomainError, IdentityProvider, RepoResult, Snowflake};

use crate::config::DiscordOAuthConfig;
use crate::error::AppError;

/// Browser-facing authorize endpoint
pub const AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";

/// REST API base
pub const API_BASE: &str = "https://discord.com/api/v10";

/// User agent sent on every API call
pub const USER_AGENT: &str = "DiscordUserTrackerAPI/1.0";

const SCOPE: &str = "identify";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    token_type: String,
}

/// Discord OAuth2 identity provider
#[derive(Debug, Clone)]
pub struct DiscordOAuthClient {
    http: Client,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    authorize_url: String,
    api_base: String,
    bot_token: Option<String>,
}

impl DiscordOAuthClient {
    /// Create a client for the configured Discord application
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: &DiscordOAuthConfig) -> Result<Self, AppError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(AppError::internal)?;

        Ok(Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.callback_url.clone(),
            authorize_url: AUTHORIZE_URL.to_string(),
            api_base: API_BASE.to_string(),
            bot_token: config.bot_token.clone(),
        })
    }

    /// Point the client at a different API host
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    async fn request_token(&self, code: &str) -> RepoResult<TokenResponse> {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let response = self
            .http
            .post(format!("{}/oauth2/token", self.api_base))
            .form(&params)
            .send()
            .await
            .map_err(upstream)?;

        check_status(response.status(), "token exchange")?;
        response.json().await.map_err(upstream)
    }

    async fn fetch_profile(&self, token: &TokenResponse) -> RepoResult<DiscordIdentity> {
        let response = self
            .http
            .get(format!("{}/users/@me", self.api_base))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("{} {}", token.token_type, token.access_token),
            )
            .send()
            .await
            .map_err(upstream)?;

        check_status(response.status(), "profile fetch")?;
        response.json().await.map_err(upstream)
    }
}

#[async_trait]
impl IdentityProvider for DiscordOAuthClient {
    fn authorize_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.client_id.as_str()),
            ("redirect_uri", self.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", SCOPE),
            ("state", state),
        ];

        match Url::parse_with_params(&self.authorize_url, &params) {
            Ok(url) => url.into(),
            Err(e) => {
                warn!(error = %e, "authorize URL rejected, falling back to base");
                self.authorize_url.clone()
            }
        }
    }

    #[instrument(skip(self, code))]
    async fn exchange_code(&self, code: &str) -> RepoResult<DiscordIdentity> {
        let token = self.request_token(code).await?;
        let identity = self.fetch_profile(&token).await?;
        debug!(user_id = %identity.id, "Discord profile fetched");
        Ok(identity)
    }

    #[instrument(skip(self))]
    async fn fetch_user(&self, user_id: Snowflake) -> RepoResult<Option<DiscordIdentity>> {
        let Some(bot_token) = self.bot_token.as_deref() else {
            return Err(DomainError::LiveLookupDisabled(user_id));
        };

        let response = self
            .http
            .get(format!("{}/users/{user_id}", self.api_base))
            .header(reqwest::header::AUTHORIZATION, format!("Bot {bot_token}"))
            .send()
            .await
            .map_err(upstream)?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Discord has no such user");
            return Ok(None);
        }

        check_status(response.status(), "user lookup")?;
        response.json().await.map(Some).map_err(upstream)
    }
}

fn check_status(status: StatusCode, step: &str) -> RepoResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(DomainError::IdentityProvider(format!(
            "{step} failed with status {status}"
        )))
    }
}

fn upstream(err: reqwest::Error) -> DomainError {
    DomainError::IdentityProvider(err.to_string())
}
