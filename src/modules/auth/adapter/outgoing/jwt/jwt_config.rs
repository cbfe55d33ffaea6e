use crate::shared::config::{parse_or, required, ConfigError, Lookup};

pub const MIN_SECRET_LENGTH: usize = 32;
pub const MAX_ACCESS_EXPIRY_SECONDS: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64, // Expiration in seconds
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: Lookup<'_>) -> Result<Self, ConfigError> {
        let secret_key = required(lookup, "JWT_SECRET")?;

        // HS256 requires at least 32 bytes of key material
        if secret_key.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::OutOfRange {
                key: "JWT_SECRET",
                reason: format!("must be at least {MIN_SECRET_LENGTH} characters long"),
            });
        }

        let access_token_expiry = parse_or(lookup, "JWT_ACCESS_EXPIRY", 7200i64)?;
        if access_token_expiry <= 0 || access_token_expiry > MAX_ACCESS_EXPIRY_SECONDS {
            return Err(ConfigError::OutOfRange {
                key: "JWT_ACCESS_EXPIRY",
                reason: "must be between 1 and 86400 seconds (24 hours)".to_string(),
            });
        }

        let issuer = lookup("JWT_ISSUER")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "course-forum".to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;
    use std::collections::HashMap;

    fn load(vars: HashMap<&'static str, &'static str>) -> Result<JwtConfig, ConfigError> {
        JwtConfig::from_lookup(&move |key| vars.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn secret_is_required() {
        assert_eq!(
            load(HashMap::new()).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = load(hashmap! { "JWT_SECRET" => "too-short" }).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { key: "JWT_SECRET", .. }));
    }

    #[test]
    fn expiry_must_stay_within_a_day() {
        let secret = "0123456789abcdef0123456789abcdef";

        for bad in ["0", "-5", "86401"] {
            let err = load(hashmap! {
                "JWT_SECRET" => secret,
                "JWT_ACCESS_EXPIRY" => bad,
            })
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::OutOfRange { key: "JWT_ACCESS_EXPIRY", .. }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn issuer_and_expiry_can_be_overridden() {
        let config = load(hashmap! {
            "JWT_SECRET" => "0123456789abcdef0123456789abcdef",
            "JWT_ISSUER" => "forum-staging",
            "JWT_ACCESS_EXPIRY" => "600",
        })
        .unwrap();

        assert_eq!(config.issuer, "forum-staging");
        assert_eq!(config.access_token_expiry, 600);
    }
}
