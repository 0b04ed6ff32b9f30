//! API Integration Tests
//!
//! Each test spawns the full router on an ephemeral port. MongoDB and
//! Discord are replaced by in-memory doubles, so no services are needed.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, fixtures::*, location, TestServer, DASHBOARD_URL, LOGIN_URL,
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracker_core::Role;

async fn tracked_server() -> TestServer {
    let server = TestServer::start().await.expect("Failed to start server");
    server.store.insert(TRACKED_ID, stored_record());
    server
}

async fn error_code(response: reqwest::Response, expected: StatusCode) -> String {
    let body: ErrorEnvelope = assert_json(response, expected).await.unwrap();
    assert!(!body.error.message.is_empty());
    body.error.code
}

// ============================================================================
// Service Info & Health
// ============================================================================

#[tokio::test]
async fn test_root_banner() {
    let server = TestServer::start().await.unwrap();
    let body: Value = assert_json(server.get("/").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["message"], "tracker-api-test is online");
}

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    let server = TestServer::start().await.unwrap();
    let body: Value = assert_json(server.get("/health/ready").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
async fn test_health_not_ready_when_store_down() {
    let server = TestServer::start().await.unwrap();
    server.store.set_down(true);

    let body: Value = assert_json(
        server.get("/health/ready").await.unwrap(),
        StatusCode::SERVICE_UNAVAILABLE,
    )
    .await
    .unwrap();
    assert_eq!(body["checks"]["database"], "unhealthy");
}

#[tokio::test]
async fn test_unknown_route_is_json_404() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/nope").await.unwrap();
    assert_eq!(error_code(response, StatusCode::NOT_FOUND).await, "NOT_FOUND");
}

// ============================================================================
// OAuth Login
// ============================================================================

#[tokio::test]
async fn test_login_redirects_to_discord_with_state() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/auth/discord").await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let url = location(&response).unwrap();
    assert_eq!(url.host_str(), Some("discord.test"));
    assert!(url.query_pairs().any(|(k, v)| k == "state" && !v.is_empty()));
}

#[tokio::test]
async fn test_login_flow_issues_user_token() {
    let server = TestServer::start().await.unwrap();
    let token = server.login().await.unwrap();

    let me: MeBody = assert_json(server.get_auth("/api/me", &token).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(me.id, VIEWER_ID.to_string());
    assert_eq!(me.username, "viewer");
    assert_eq!(me.global_name.as_deref(), Some("viewer (global)"));
    assert_eq!(me.display_name, "viewer (global)");
    assert_eq!(me.avatar.as_deref(), Some("a_1f2e3d"));
    assert!(me.avatar_url.unwrap().ends_with("/a_1f2e3d.gif?size=1024"));
    assert_eq!(me.role, "user");
}

#[tokio::test]
async fn test_admin_login_gets_admin_role() {
    let server = TestServer::start_as(identity(ADMIN_ID, "boss")).await.unwrap();
    let token = server.login().await.unwrap();

    let me: MeBody = assert_json(server.get_auth("/api/me", &token).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(me.role, "admin");
}

#[tokio::test]
async fn test_callback_lands_on_dashboard() {
    let server = TestServer::start().await.unwrap();
    let token = server.login().await.unwrap();
    assert_eq!(token.split('.').count(), 3);

    // login() already checked the fragment; check the page itself
    let start = server.get("/auth/discord").await.unwrap();
    let state = location(&start)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    let callback = server
        .client
        .get(format!("{}/auth/discord/callback", server.base_url()))
        .query(&[("code", integration_tests::GOOD_CODE), ("state", state.as_str())])
        .send()
        .await
        .unwrap();

    let url = location(&callback).unwrap();
    assert!(url.as_str().starts_with(DASHBOARD_URL));
}

#[tokio::test]
async fn test_callback_failures_redirect_to_login() {
    let server = TestServer::start().await.unwrap();
    let expected = format!("{LOGIN_URL}?error=auth_failed");

    let cases = [
        "/auth/discord/callback",
        "/auth/discord/callback?code=good-code&state=forged",
        "/auth/discord/callback?error=access_denied&error_description=denied",
    ];

    for path in cases {
        let response = server.get(path).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response).unwrap().as_str(), expected, "{path}");
    }
}

#[tokio::test]
async fn test_callback_with_rejected_code_redirects_to_login() {
    let server = TestServer::start().await.unwrap();
    let start = server.get("/auth/discord").await.unwrap();
    let state = location(&start)
        .unwrap()
        .query_pairs()
        .find(|(k, _)| k == "state")
        .map(|(_, v)| v.into_owned())
        .unwrap();

    let response = server
        .client
        .get(format!("{}/auth/discord/callback", server.base_url()))
        .query(&[("code", "stale-code"), ("state", state.as_str())])
        .send()
        .await
        .unwrap();

    let url = location(&response).unwrap();
    assert!(url.as_str().starts_with(LOGIN_URL));
    assert!(url.query_pairs().any(|(k, v)| k == "error" && v == "auth_failed"));
}

#[tokio::test]
async fn test_logout() {
    let server = TestServer::start().await.unwrap();
    let body: Value = assert_json(server.get("/auth/logout").await.unwrap(), StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(body["redirectTo"], LOGIN_URL);
}

// ============================================================================
// Bearer Authentication
// ============================================================================

#[tokio::test]
async fn test_missing_token() {
    let server = TestServer::start().await.unwrap();
    let response = server.get("/api/me").await.unwrap();
    assert_eq!(
        error_code(response, StatusCode::UNAUTHORIZED).await,
        "MISSING_AUTH"
    );
}

#[tokio::test]
async fn test_invalid_token() {
    let server = TestServer::start().await.unwrap();
    let response = server.get_auth("/api/me", "not.a.jwt").await.unwrap();
    assert_eq!(error_code(response, StatusCode::UNAUTHORIZED).await, "INVALID_TOKEN");
}

#[tokio::test]
async fn test_expired_token() {
    let server = TestServer::start().await.unwrap();
    let token =
        TestServer::token_with_expiry(&identity(VIEWER_ID, "viewer"), Role::User, -3600).unwrap();

    let response = server.get_auth("/api/me", &token).await.unwrap();
    assert_eq!(error_code(response, StatusCode::UNAUTHORIZED).await, "TOKEN_EXPIRED");
}

// ============================================================================
// Tracked Users
// ============================================================================

#[tokio::test]
async fn test_tracked_user_is_normalized() {
    let server = tracked_server().await;
    let token = server.login().await.unwrap();

    let path = format!("/api/avatars/{TRACKED_ID}");
    let record: Value = assert_json(server.get_auth(&path, &token).await.unwrap(), StatusCode::OK)
        .await
        .unwrap();

    assert_eq!(record["_id"], "64500f1b2c3d4e5f60718293");
    assert_eq!(record["user_id"], "826678506925801482");
    assert_eq!(record["servers"][0]["guild_id"], "111111111111111111");
    assert_eq!(record["servers"][0]["first_seen"], json!(1_682_942_400_000_i64));
    assert_eq!(record["servers"][1]["guild_id"], "222222222222222222");
    assert_eq!(record["servers"][1]["first_seen"], json!(1_682_942_400_000_i64));
    assert_eq!(
        record["history"][0]["changes"]["server_joined"]["guild_id"],
        "333333333333333333"
    );
    assert_eq!(record["history"][0]["changed_at"], json!(1000));
    assert_eq!(record["recent_messages"][0]["message_id"], "555555555555555555");
    assert_eq!(record["recent_messages"][0]["timestamp"], json!(4000));
    assert_eq!(record["first_seen_overall"], json!(1000));
    assert_eq!(record["last_seen_overall"], json!(0));
    assert_eq!(record["username_global"], "celeste");
}

#[tokio::test]
async fn test_users_path_serves_same_record() {
    let server = tracked_server().await;
    let token = server.login().await.unwrap();

    let avatars: Value = assert_json(
        server
            .get_auth(&format!("/api/avatars/{TRACKED_ID}"), &token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    let users: Value = assert_json(
        server
            .get_auth(&format!("/api/users/{TRACKED_ID}"), &token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();

    assert_eq!(avatars, users);
}

#[tokio::test]
async fn test_tracked_user_requires_auth() {
    let server = tracked_server().await;
    let response = server.get(&format!("/api/avatars/{TRACKED_ID}")).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_invalid_user_id() {
    let server = tracked_server().await;
    let token = server.login().await.unwrap();

    for bad in ["123", "abc", "8266785069258014820000", "-826678506925801482"] {
        let response = server
            .get_auth(&format!("/api/avatars/{bad}"), &token)
            .await
            .unwrap();
        assert_eq!(
            error_code(response, StatusCode::BAD_REQUEST).await,
            "INVALID_USER_ID",
            "{bad}"
        );
    }
}

#[tokio::test]
async fn test_untracked_user_without_live_lookup() {
    let server = tracked_server().await;
    let token = server.login().await.unwrap();

    let response = server
        .get_auth(&format!("/api/avatars/{UNTRACKED_ID}"), &token)
        .await
        .unwrap();
    assert_eq!(
        error_code(response, StatusCode::NOT_FOUND).await,
        "LIVE_LOOKUP_DISABLED"
    );
}

#[tokio::test]
async fn test_untracked_user_served_from_discord() {
    let server = tracked_server().await;
    let token = server.login().await.unwrap();
    server.discord.enable_live_lookup();
    server.discord.add_live_user(identity(UNTRACKED_ID, "stranger"));

    let response = server
        .get_auth(&format!("/api/avatars/{UNTRACKED_ID}"), &token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["user_id"], json!(UNTRACKED_ID.to_string()));
    assert_eq!(body["username_global"], json!("stranger (global)"));
    assert_eq!(body["avatar_urls"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["servers"], json!([]));
    assert_eq!(body["history"], json!([]));

    // Nothing was stored, so the next request goes back to Discord
    server.discord.fail_lookups();
    let response = server
        .get_auth(&format!("/api/users/{UNTRACKED_ID}"), &token)
        .await
        .unwrap();
    assert_eq!(
        error_code(response, StatusCode::BAD_GATEWAY).await,
        "IDENTITY_PROVIDER_ERROR"
    );
}

#[tokio::test]
async fn test_user_unknown_to_store_and_discord() {
    let server = tracked_server().await;
    let token = server.login().await.unwrap();
    server.discord.enable_live_lookup();

    let response = server
        .get_auth(&format!("/api/avatars/{UNTRACKED_ID}"), &token)
        .await
        .unwrap();
    assert_eq!(error_code(response, StatusCode::NOT_FOUND).await, "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_store_down_is_server_error() {
    let server = tracked_server().await;
    let token = server.login().await.unwrap();
    server.store.set_down(true);

    let response = server
        .get_auth(&format!("/api/avatars/{TRACKED_ID}"), &token)
        .await
        .unwrap();
    assert_eq!(
        error_code(response, StatusCode::INTERNAL_SERVER_ERROR).await,
        "DATABASE_ERROR"
    );
}

// ============================================================================
// Admin
// ============================================================================

#[tokio::test]
async fn test_admin_reads_raw_record() {
    let server = TestServer::start_as(identity(ADMIN_ID, "boss")).await.unwrap();
    server.store.insert(TRACKED_ID, stored_record());
    let token = server.login().await.unwrap();

    let raw: Value = assert_json(
        server
            .get_auth(&format!("/api/admin/users/{TRACKED_ID}/raw"), &token)
            .await
            .unwrap(),
        StatusCode::OK,
    )
    .await
    .unwrap();
    assert_eq!(raw, stored_record());
}

#[tokio::test]
async fn test_raw_record_forbidden_for_users() {
    let server = tracked_server().await;
    let token = server.login().await.unwrap();

    let response = server
        .get_auth(&format!("/api/admin/users/{TRACKED_ID}/raw"), &token)
        .await
        .unwrap();
    assert_eq!(
        error_code(response, StatusCode::FORBIDDEN).await,
        "INSUFFICIENT_PERMISSIONS"
    );
}

#[tokio::test]
async fn test_raw_untracked_user_for_admin() {
    let server = TestServer::start_as(identity(ADMIN_ID, "boss")).await.unwrap();
    let token = server.login().await.unwrap();

    let response = server
        .get_auth(&format!("/api/admin/users/{UNTRACKED_ID}/raw"), &token)
        .await
        .unwrap();
    assert_eq!(error_code(response, StatusCode::NOT_FOUND).await, "USER_NOT_TRACKED");
}
