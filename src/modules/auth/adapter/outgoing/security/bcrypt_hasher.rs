use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};

use crate::auth::application::ports::outgoing::password_hasher::{HashError, PasswordHasher};

/// Verifies hashes written by the previous deployment (`$2a$`, `$2b$`,
/// `$2y$`). New accounts are hashed with Argon2id instead.
#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new() -> Self {
        Self { cost: DEFAULT_COST }
    }

    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn recognizes(hash: &str) -> bool {
        hash.starts_with("$2a$") || hash.starts_with("$2b$") || hash.starts_with("$2y$")
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordHasher for BcryptHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || hash(password, cost).map_err(|_| HashError::HashFailed))
            .await
            .map_err(|_| HashError::TaskFailed)?
    }

    async fn verify_password(&self, password: &str, hashed: &str) -> Result<bool, HashError> {
        let password = password.to_string();
        let hashed = hashed.to_string();

        tokio::task::spawn_blocking(move || {
            verify(password, &hashed).map_err(|_| HashError::VerifyFailed)
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }
}
