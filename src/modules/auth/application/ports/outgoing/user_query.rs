// application/ports/outgoing/user_query.rs
use async_trait::async_trait;

use crate::auth::application::domain::entities::UserId;

/// Read model for user lookups. Carries the stored hash so the login flow
/// can verify a secret; it never leaves the application layer.
#[derive(Debug, Clone, PartialEq)]
pub struct UserQueryResult {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserQueryResult>, UserQueryError>;

    /// `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserQueryResult>, UserQueryError>;
}
