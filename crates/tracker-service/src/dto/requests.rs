//! Request DTOs for API endpoints

use serde::Deserialize;

// ============================================================================
// Auth Requests
// ============================================================================

/// Query string of the OAuth2 redirect back from Discord
///
/// Every field is optional: a user who cancels on the consent screen comes
/// back with `error` set and no code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl OAuthCallbackQuery {
    /// Code and state, when the provider granted access
    pub fn grant(&self) -> Option<(&str, &str)> {
        if self.error.is_some() {
            return None;
        }
        Some((self.code.as_deref()?, self.state.as_deref()?))
    }
}
