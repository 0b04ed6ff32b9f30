//! Authentication utilities

mod jwt;

pub use jwt::{AccessToken, Claims, JwtService, StateClaims, TokenType, OAUTH_STATE_EXPIRY};
