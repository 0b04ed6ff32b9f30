//! Authentication handlers
//!
//! Discord OAuth2 login. The browser is bounced to Discord and back; the
//! callback hands the issued token to the dashboard in the URL fragment.

use axum::{
    extract::{Query, State},
    response::Redirect,
    Json,
};
use tracing::warn;
use tracker_service::{AuthService, LogoutResponse, OAuthCallbackQuery};

use crate::response::ApiResult;
use crate::state::AppState;

/// Start a Discord login
///
/// GET /auth/discord
pub async fn discord_login(State(state): State<AppState>) -> ApiResult<Redirect> {
    let service = AuthService::new(state.service_context());
    let url = service.login_url()?;
    Ok(Redirect::to(&url))
}

/// Discord redirect target
///
/// GET /auth/discord/callback
///
/// Always answers with a redirect: the dashboard on success, the login page
/// with `error=auth_failed` otherwise.
pub async fn discord_callback(
    State(state): State<AppState>,
    Query(query): Query<OAuthCallbackQuery>,
) -> Redirect {
    let frontend = state.frontend();

    let Some((code, oauth_state)) = query.grant() else {
        warn!(
            error = query.error.as_deref().unwrap_or("missing code or state"),
            description = query.error_description.as_deref().unwrap_or_default(),
            "OAuth callback without a grant"
        );
        return Redirect::to(&login_failed_url(&frontend.login_url));
    };

    let service = AuthService::new(state.service_context());
    match service.complete_login(code, oauth_state).await {
        Ok(auth) => Redirect::to(&dashboard_url(&frontend.dashboard_url, &auth.access_token)),
        Err(e) => {
            warn!(error = %e, "OAuth login failed");
            Redirect::to(&login_failed_url(&frontend.login_url))
        }
    }
}

/// Log out
///
/// GET /auth/logout
///
/// Tokens are stateless, so this only tells the client where to go next.
pub async fn logout(State(state): State<AppState>) -> Json<LogoutResponse> {
    Json(LogoutResponse::new(state.frontend().login_url.clone()))
}

fn dashboard_url(base: &str, token: &str) -> String {
    let base = base.split('#').next().unwrap_or(base);
    format!("{base}#token={token}")
}

fn login_failed_url(base: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}error=auth_failed")
}
