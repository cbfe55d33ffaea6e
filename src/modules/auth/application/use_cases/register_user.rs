use std::sync::Arc;

use async_trait::async_trait;
use email_address::EmailAddress;

use crate::auth::application::domain::entities::{normalize_email, UserId};
use crate::auth::application::ports::outgoing::{
    NewUser, PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_PASSWORD_LENGTH: usize = 128;

//
// ──────────────────────────────────────────────────────────
// Register Request
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterUserRequestError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name must be at most 100 characters")]
    NameTooLong,

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Password must be at most 128 characters")]
    PasswordTooLong,
}

impl RegisterUserRequest {
    pub fn new(
        name: String,
        email: String,
        password: String,
    ) -> Result<Self, RegisterUserRequestError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(RegisterUserRequestError::EmptyName);
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(RegisterUserRequestError::NameTooLong);
        }

        let email = normalize_email(&email);
        if email.is_empty() {
            return Err(RegisterUserRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(&email) {
            return Err(RegisterUserRequestError::InvalidEmailFormat);
        }

        if password.trim().is_empty() {
            return Err(RegisterUserRequestError::EmptyPassword);
        }
        if password.chars().count() > MAX_PASSWORD_LENGTH {
            return Err(RegisterUserRequestError::PasswordTooLong);
        }

        Ok(Self {
            name,
            email,
            password,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

//
// ──────────────────────────────────────────────────────────
// Use Case Error
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum RegisterUserError {
    #[error("Email is already registered")]
    EmailAlreadyRegistered,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

//
// ──────────────────────────────────────────────────────────
// Use Case
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait IRegisterUserUseCase: Send + Sync {
    async fn execute(&self, request: RegisterUserRequest) -> Result<UserId, RegisterUserError>;
}

#[derive(Clone)]
pub struct RegisterUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl<Q, R> RegisterUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<Q, R> IRegisterUserUseCase for RegisterUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, request: RegisterUserRequest) -> Result<UserId, RegisterUserError> {
        let existing = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| RegisterUserError::RepositoryError(e.to_string()))?;

        if existing.is_some() {
            return Err(RegisterUserError::EmailAlreadyRegistered);
        }

        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .await
            .map_err(|e| RegisterUserError::HashingFailed(e.to_string()))?;

        self.repository
            .create_user(NewUser {
                name: request.name().to_string(),
                email: request.email().to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                // Lost the race against a concurrent registration
                UserRepositoryError::UserAlreadyExists => RegisterUserError::EmailAlreadyRegistered,
                UserRepositoryError::DatabaseError(msg) => RegisterUserError::RepositoryError(msg),
            })
    }
}
