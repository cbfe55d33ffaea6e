use argon2::{
    password_hash::{
        Error as PasswordHashError, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use rand_core::OsRng;

use crate::auth::application::ports::outgoing::password_hasher::{
    HashError, PasswordHasher as HasherTrait,
};
use crate::shared::config::Argon2Config;

/// Argon2id hasher. Every hash is computed on the blocking pool.
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    #[cfg(test)]
    salt_override: Option<SaltString>,
}

impl Argon2Hasher {
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, HashError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| HashError::InvalidParams(e.to_string()))?;

        Ok(Self {
            params,
            #[cfg(test)]
            salt_override: None,
        })
    }

    pub fn from_config(config: &Argon2Config) -> Result<Self, HashError> {
        Self::with_params(config.memory_kib, config.iterations, config.parallelism)
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        // Cheapest parameters argon2 accepts
        Self::with_params(8, 1, 1).expect("valid params")
    }

    #[cfg(test)]
    pub fn with_fixed_salt(salt: &str) -> Self {
        Self {
            params: Params::new(8, 1, 1, None).expect("Invalid params"),
            salt_override: Some(SaltString::from_b64(salt).expect("Invalid salt")),
        }
    }
}

#[async_trait]
impl HasherTrait for Argon2Hasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        let password = password.to_string();
        let params = self.params.clone();

        #[cfg(test)]
        let salt_override = self.salt_override.clone();

        tokio::task::spawn_blocking(move || {
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

            #[cfg(test)]
            let salt = salt_override.unwrap_or_else(|| SaltString::generate(&mut OsRng));

            #[cfg(not(test))]
            let salt = SaltString::generate(&mut OsRng);

            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|_| HashError::HashFailed)
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        let password = password.to_string();
        let hash = hash.to_string();

        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&hash).map_err(|_| HashError::VerifyFailed)?;

            // Parameters come from the PHC string, not from `self`
            match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
                Ok(_) => Ok(true),
                Err(PasswordHashError::Password) => Ok(false),
                Err(_) => Err(HashError::VerifyFailed),
            }
        })
        .await
        .map_err(|_| HashError::TaskFailed)?
    }
}
