use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use email_address::EmailAddress;

use crate::auth::application::domain::entities::{normalize_email, UserId};
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider, UserQuery};

// ========================= Login Request =========================
/// Validated login request
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,    // Private - normalized and well-formed
    password: String, // Private - non-blank, kept verbatim
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginRequestError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, LoginRequestError> {
        let email = Self::validate_email(&email)?;

        if password.trim().is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    fn validate_email(email: &str) -> Result<String, LoginRequestError> {
        let email = normalize_email(email);

        if email.is_empty() {
            return Err(LoginRequestError::EmptyEmail);
        }

        if !EmailAddress::is_valid(&email) {
            return Err(LoginRequestError::InvalidEmailFormat);
        }

        Ok(email)
    }
}

/// Well-formed Argon2id hash of no known password, checked when the email is
/// unknown so both failure paths pay for one verification.
pub(crate) const DUMMY_PASSWORD_HASH: &str =
    "$argon2id$v=19$m=4096,t=3,p=1$c29tZXNhbHQ$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

// ====================== Login Error =============================
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoginError {
    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),
}

// ============================ Login Response =================================
#[derive(Debug, Clone, PartialEq)]
pub struct LoginUserResponse {
    pub user_id: UserId,
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

// ============================ Login User Use Case =============================
#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError>;
}

#[derive(Clone)]
pub struct LoginUserUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    query: Q,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    token_provider: Arc<dyn TokenProvider + Send + Sync>,
}

impl<Q> LoginUserUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    pub fn new(
        query: Q,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        token_provider: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Self {
        Self {
            query,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<Q> ILoginUserUseCase for LoginUserUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?;

        let Some(user) = user else {
            // Outcome ignored; the email is unknown either way
            let _ = self
                .password_hasher
                .verify_password(request.password(), DUMMY_PASSWORD_HASH)
                .await;
            return Err(LoginError::InvalidCredentials);
        };

        let is_valid = self
            .password_hasher
            .verify_password(request.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !is_valid {
            return Err(LoginError::InvalidCredentials);
        }

        let token = self
            .token_provider
            .generate_access_token(user.id, &user.email)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        Ok(LoginUserResponse {
            user_id: user.id,
            access_token: token.token,
            expires_at: token.expires_at,
        })
    }
}
