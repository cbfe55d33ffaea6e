use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed")]
    HashFailed,

    #[error("Password verification failed")]
    VerifyFailed,

    #[error("Unsupported password hash format")]
    UnsupportedFormat,

    #[error("Invalid hasher parameters: {0}")]
    InvalidParams(String),

    #[error("Background task failed")]
    TaskFailed,
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;

    /// `Ok(false)` means the secret does not match; `Err` means the stored
    /// hash could not be checked at all.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
