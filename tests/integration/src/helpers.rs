//! Test helpers for integration tests
//!
//! Provides a test server running the real router and middleware, plus
//! request and assertion helpers.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header::LOCATION, redirect::Policy, Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracker_api::{create_app, AppState};
use tracker_common::{AppConfig, JwtService};
use tracker_core::{DiscordIdentity, Role};
use tracker_service::ServiceContextBuilder;

use crate::doubles::{MemoryStore, StubDiscord, GOOD_CODE};
use crate::fixtures::{identity, ADMIN_ID, VIEWER_ID};

/// Signing secret shared by the server and [`TestServer::token_with_expiry`]
pub const TEST_JWT_SECRET: &str = "integration-test-secret-key";

/// Frontend page a failed login lands on
pub const LOGIN_URL: &str = "http://frontend.test/login";

/// Frontend page a successful login lands on
pub const DASHBOARD_URL: &str = "http://frontend.test/dashboard";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<MemoryStore>,
    pub discord: Arc<StubDiscord>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server whose Discord stand-in logs everyone in as a regular user
    pub async fn start() -> Result<Self> {
        Self::start_as(identity(VIEWER_ID, "viewer")).await
    }

    /// Start a server whose Discord stand-in returns `identity` for every login
    pub async fn start_as(identity: DiscordIdentity) -> Result<Self> {
        let config = test_config()?;
        let store = Arc::new(MemoryStore::new());
        let discord = Arc::new(StubDiscord::new(identity));

        let service_context = ServiceContextBuilder::new()
            .user_repo(store.clone())
            .identity_provider(discord.clone())
            .jwt_service(Arc::new(JwtService::new(
                &config.jwt.secret,
                config.jwt.access_token_expiry,
            )))
            .admin_user_ids(config.access.admin_user_ids.iter().copied())
            .build()?;

        let app = create_app(AppState::new(service_context, config))?;

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Redirects are assertions here, never followed
        let client = Client::builder()
            .redirect(Policy::none())
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            store,
            discord,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a GET request with auth token
    pub async fn get_auth(&self, path: &str, token: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).bearer_auth(token).send().await?)
    }

    /// Walk the whole OAuth flow and return the access token the dashboard receives
    pub async fn login(&self) -> Result<String> {
        let start = self.get("/auth/discord").await?;
        let authorize = location(&start)?;
        let state = authorize
            .query_pairs()
            .find(|(key, _)| key == "state")
            .map(|(_, value)| value.into_owned())
            .context("authorize URL has no state")?;

        let callback = self
            .client
            .get(format!("{}/auth/discord/callback", self.base_url()))
            .query(&[("code", GOOD_CODE), ("state", state.as_str())])
            .send()
            .await?;

        let dashboard = location(&callback)?;
        dashboard
            .fragment()
            .and_then(|fragment| fragment.strip_prefix("token="))
            .map(str::to_string)
            .with_context(|| format!("no token in redirect to {dashboard}"))
    }

    /// Sign a token directly, bypassing the login flow
    pub fn token_with_expiry(identity: &DiscordIdentity, role: Role, expiry_secs: i64) -> Result<String> {
        let token = JwtService::new(TEST_JWT_SECRET, expiry_secs).issue_access_token(identity, role)?;
        Ok(token.access_token)
    }
}

/// Configuration as it would come from the environment
pub fn test_config() -> Result<AppConfig> {
    let admin = ADMIN_ID.to_string();
    let vars: HashMap<&str, &str> = HashMap::from([
        ("APP_NAME", "tracker-api-test"),
        ("MONGO_URI", "mongodb://127.0.0.1:1"),
        ("DISCORD_CLIENT_ID", "test-client"),
        ("DISCORD_CLIENT_SECRET", "test-secret"),
        ("CALLBACK_URL", "http://127.0.0.1/auth/discord/callback"),
        ("JWT_SECRET", TEST_JWT_SECRET),
        ("FRONTEND_LOGIN_URL", LOGIN_URL),
        ("FRONTEND_DASHBOARD_URL", DASHBOARD_URL),
        ("FRONTEND_CORS_ORIGIN", "http://frontend.test"),
        ("ADMIN_USER_IDS", admin.as_str()),
        ("RATE_LIMIT_REQUESTS_PER_SECOND", "1000"),
        ("RATE_LIMIT_BURST", "1000"),
    ]);

    AppConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string()))
        .map_err(|e| anyhow::anyhow!("Config error: {e}"))
}

/// Parse the `Location` header of a redirect
pub fn location(response: &Response) -> Result<Url> {
    let status = response.status();
    anyhow::ensure!(status.is_redirection(), "expected a redirect, got {status}");

    let raw = response
        .headers()
        .get(LOCATION)
        .context("redirect without Location")?
        .to_str()?;
    Ok(Url::parse(raw)?)
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(
    response: Response,
    expected_status: StatusCode,
) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!("Expected status {expected_status}, got {status}. Body: {body}");
    }
    Ok(())
}
