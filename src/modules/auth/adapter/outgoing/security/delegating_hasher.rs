use async_trait::async_trait;

use crate::auth::application::ports::outgoing::password_hasher::{HashError, PasswordHasher};

use super::{Argon2Hasher, BcryptHasher};

/// Hashes with Argon2id and verifies by looking at the stored hash's
/// prefix, so accounts migrated from the bcrypt era still log in.
#[derive(Clone)]
pub struct DelegatingPasswordHasher {
    argon2: Argon2Hasher,
    bcrypt: BcryptHasher,
}

impl DelegatingPasswordHasher {
    pub fn new(argon2: Argon2Hasher, bcrypt: BcryptHasher) -> Self {
        Self { argon2, bcrypt }
    }
}

#[async_trait]
impl PasswordHasher for DelegatingPasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        self.argon2.hash_password(password).await
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        if hash.starts_with("$argon2") {
            self.argon2.verify_password(password, hash).await
        } else if BcryptHasher::recognizes(hash) {
            self.bcrypt.verify_password(password, hash).await
        } else {
            tracing::error!("Stored password hash has an unrecognized format");
            Err(HashError::UnsupportedFormat)
        }
    }
}
