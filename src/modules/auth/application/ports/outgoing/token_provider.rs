use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is not yet valid")]
    TokenNotYetValid,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token issuer")]
    InvalidIssuer,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Token encoding error: {0}")]
    EncodingError(String),
}

/// Structure for JWT Claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // User ID, decimal
    pub email: String,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub
            .parse::<i64>()
            .map(UserId::from)
            .map_err(|_| TokenError::MalformedToken)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenProvider: Send + Sync {
    fn generate_access_token(&self, user_id: UserId, email: &str)
        -> Result<AccessToken, TokenError>;

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
