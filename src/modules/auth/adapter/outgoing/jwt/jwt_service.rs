use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use std::fmt;
use tracing;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::token_provider::{
    AccessToken, TokenClaims, TokenError, TokenProvider,
};

use super::jwt_config::JwtConfig;

const LEEWAY_SECONDS: u64 = 30;

#[derive(Clone)]
pub struct JwtTokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[cfg(not(tarpaulin_include))]
impl fmt::Debug for JwtTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenService")
            .field("issuer", &self.config.issuer)
            .finish()
    }
}

impl JwtTokenService {
    /// Initialize the service with config
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = LEEWAY_SECONDS;
        validation.validate_nbf = true;
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation
    }
}

impl TokenProvider for JwtTokenService {
    fn generate_access_token(
        &self,
        user_id: UserId,
        email: &str,
    ) -> Result<AccessToken, TokenError> {
        let now = Utc::now();
        let expires_at = now + Duration::seconds(self.config.access_token_expiry);

        let claims = TokenClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))?;

        Ok(AccessToken { token, expires_at })
    }

    /// Verify and decode a token
    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let decoded = decode::<TokenClaims>(token, &self.decoding_key, &self.validation())
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token verification failed: Token expired");
                        TokenError::TokenExpired
                    }
                    ErrorKind::ImmatureSignature => {
                        tracing::warn!("Token verification failed: Token not yet valid");
                        TokenError::TokenNotYetValid
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::error!("Security alert: Invalid token signature detected");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Token verification failed: Unexpected issuer");
                        TokenError::InvalidIssuer
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        tracing::error!("Security alert: Malformed or invalid algorithm token");
                        TokenError::MalformedToken
                    }
                    ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                        tracing::warn!("Token verification failed: Malformed token");
                        TokenError::MalformedToken
                    }
                    _ => {
                        tracing::warn!("Token verification failed: Unknown error");
                        TokenError::MalformedToken
                    }
                }
            })?;

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

    fn config_with(secret: &str, issuer: &str, expiry: i64) -> JwtConfig {
        JwtConfig {
            secret_key: secret.to_string(),
            issuer: issuer.to_string(),
            access_token_expiry: expiry,
        }
    }

    fn create_test_jwt_service() -> JwtTokenService {
        JwtTokenService::new(config_with(TEST_SECRET, "course-forum", 3600))
    }

    fn encode_raw(claims: &TokenClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let service = create_test_jwt_service();

        let token = service
            .generate_access_token(UserId::from(17), "ana@example.com")
            .expect("Token should be generated");

        let claims = service.verify_token(&token.token).expect("Token should be valid");
        assert_eq!(claims.user_id().unwrap(), UserId::from(17));
        assert_eq!(claims.email, "ana@example.com");
        assert_eq!(claims.iss, "course-forum");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.exp, token.expires_at.timestamp());
    }

    #[test]
    fn test_invalid_token_verification() {
        let service = create_test_jwt_service();

        let result = service.verify_token("invalid.jwt.token");

        assert!(matches!(result.unwrap_err(), TokenError::MalformedToken));
    }

    #[test]
    fn test_token_with_invalid_json() {
        use base64::{engine::general_purpose, Engine as _};
        let service = create_test_jwt_service();

        let header = general_purpose::URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = general_purpose::URL_SAFE_NO_PAD.encode("not valid json");
        let invalid_token = format!("{}.{}.fakesignature", header, payload);

        assert!(service.verify_token(&invalid_token).is_err());
    }

    #[test]
    fn test_expired_token() {
        // Already expired, beyond leeway
        let service = JwtTokenService::new(config_with(TEST_SECRET, "course-forum", -35));

        let token = service
            .generate_access_token(UserId::from(1), "ana@example.com")
            .unwrap();

        let result = service.verify_token(&token.token);
        assert!(matches!(result.unwrap_err(), TokenError::TokenExpired));
    }

    #[test]
    fn test_token_not_yet_valid() {
        let service = create_test_jwt_service();
        let now = Utc::now().timestamp();

        let claims = TokenClaims {
            sub: "1".to_string(),
            email: "ana@example.com".to_string(),
            iss: "course-forum".to_string(),
            iat: now,
            nbf: now + 300, // beyond the 30s leeway
            exp: now + 3600,
        };

        let result = service.verify_token(&encode_raw(&claims, TEST_SECRET));
        assert!(matches!(result.unwrap_err(), TokenError::TokenNotYetValid));
    }

    #[test]
    fn test_invalid_signature() {
        let service = create_test_jwt_service();
        let token = service
            .generate_access_token(UserId::from(1), "ana@example.com")
            .unwrap();

        let different_service = JwtTokenService::new(config_with(
            &format!("{}_DIFFERENT", TEST_SECRET),
            "course-forum",
            3600,
        ));

        let result = different_service.verify_token(&token.token);
        assert!(matches!(result.unwrap_err(), TokenError::InvalidSignature));
    }

    #[test]
    fn test_foreign_issuer_is_rejected() {
        let other = JwtTokenService::new(config_with(TEST_SECRET, "someone-else", 3600));
        let token = other
            .generate_access_token(UserId::from(1), "ana@example.com")
            .unwrap();

        let result = create_test_jwt_service().verify_token(&token.token);
        assert!(matches!(result.unwrap_err(), TokenError::InvalidIssuer));
    }

    #[test]
    fn test_non_numeric_subject_fails_user_id() {
        let service = create_test_jwt_service();
        let now = Utc::now().timestamp();

        let claims = TokenClaims {
            sub: "ana@example.com".to_string(),
            email: "ana@example.com".to_string(),
            iss: "course-forum".to_string(),
            iat: now,
            nbf: now,
            exp: now + 3600,
        };

        let decoded = service
            .verify_token(&encode_raw(&claims, TEST_SECRET))
            .unwrap();
        assert!(matches!(
            decoded.user_id(),
            Err(TokenError::MalformedToken)
        ));
    }

    #[test]
    fn debug_output_hides_secret() {
        let rendered = format!("{:?}", create_test_jwt_service());
        assert!(!rendered.contains(TEST_SECRET));
    }
}
