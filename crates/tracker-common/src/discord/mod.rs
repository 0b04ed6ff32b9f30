//! Discord identity provider

mod oauth_client;

pub use oauth_client::{DiscordOAuthClient, API_BASE, AUTHORIZE_URL, USER_AGENT};
