use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<UserId, UserRepositoryError>;
}
