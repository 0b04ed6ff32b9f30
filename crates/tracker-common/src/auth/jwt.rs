//! JWT utilities for authentication
//!
//! Provides token encoding, decoding, and validation using the `jsonwebtoken` crate.
//! Two kinds of token are issued: bearer access tokens carrying the Discord
//! profile and role, and short-lived OAuth state tokens that stand in for a
//! server-side session during the authorization-code round trip.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use tracker_core::{DiscordIdentity, Role, Snowflake};

use crate::error::{AppError, AppResult};

/// Lifetime of an OAuth state token, in seconds
pub const OAUTH_STATE_EXPIRY: i64 = 600;

const NONCE_LEN: usize = 32;

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    OauthState,
}

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (Discord user ID)
    pub sub: String,
    /// Display name at login time
    pub name: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    /// Avatar hash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub token_type: TokenType,
}

impl Claims {
    /// Get the user ID as a Snowflake
    ///
    /// # Errors
    /// Returns an error if the subject cannot be parsed as a Snowflake
    pub fn user_id(&self) -> AppResult<Snowflake> {
        Snowflake::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Check if the bearer has admin access
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Rebuild the identity the token was issued for
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid Snowflake
    pub fn identity(&self) -> AppResult<DiscordIdentity> {
        Ok(DiscordIdentity {
            id: self.user_id()?,
            username: self.username.clone(),
            global_name: self.global_name.clone(),
            avatar: self.avatar.clone(),
            discriminator: self.discriminator.clone(),
            banner: None,
        })
    }
}

/// OAuth state token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateClaims {
    /// Random nonce, so no two state values are alike
    pub nonce: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: TokenType,
}

/// An issued bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry: i64,
}

impl JwtService {
    /// Create a new JWT service with the given secret and access token lifetime
    #[must_use]
    pub fn new(secret: &str, access_token_expiry: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_expiry,
        }
    }

    /// Issue an access token for an authenticated Discord user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(
        &self,
        identity: &DiscordIdentity,
        role: Role,
    ) -> AppResult<AccessToken> {
        let now = Utc::now();
        let claims = Claims {
            sub: identity.id.to_string(),
            name: identity.display_name(),
            username: identity.username.clone(),
            global_name: identity.global_name.clone(),
            avatar: identity.avatar.clone(),
            discriminator: identity.discriminator.clone(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.access_token_expiry)).timestamp(),
            token_type: TokenType::Access,
        };

        Ok(AccessToken {
            access_token: self.encode_claims(&claims)?,
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_expiry,
        })
    }

    /// Issue a fresh OAuth state value
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_oauth_state(&self) -> AppResult<String> {
        let now = Utc::now();
        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LEN)
            .map(char::from)
            .collect();

        let claims = StateClaims {
            nonce,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(OAUTH_STATE_EXPIRY)).timestamp(),
            token_type: TokenType::OauthState,
        };

        self.encode_claims(&claims)
    }

    fn encode_claims<T: Serialize>(&self, claims: &T) -> AppResult<String> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }

    fn decode_claims<T: DeserializeOwned>(&self, token: &str) -> AppResult<T> {
        let validation = Validation::default();

        let token_data = decode::<T>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Validate an access token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or not an access token
    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        let claims: Claims = self.decode_claims(token)?;

        if claims.token_type != TokenType::Access {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }

    /// Validate an OAuth state value returned by the identity provider
    ///
    /// # Errors
    /// Returns `InvalidOAuthState` if the state is forged, expired, or not a state token
    pub fn validate_oauth_state(&self, state: &str) -> AppResult<StateClaims> {
        let claims: StateClaims = self
            .decode_claims(state)
            .map_err(|_| AppError::InvalidOAuthState)?;

        if claims.token_type != TokenType::OauthState {
            return Err(AppError::InvalidOAuthState);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_expiry", &self.access_token_expiry)
            .finish_non_exhaustive()
    }
}
