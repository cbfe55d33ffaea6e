use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::password_hasher::{HashError, PasswordHasher};
use crate::auth::application::ports::outgoing::token_provider::{
    AccessToken, TokenClaims, TokenError, TokenProvider,
};
use crate::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse,
};
use crate::auth::application::use_cases::register_user::{
    IRegisterUserUseCase, RegisterUserError, RegisterUserRequest,
};
use crate::shared::pagination::{PageRequest, PageResult};
use crate::topic::application::domain::entities::{TopicId, TopicStatus, TopicView};
use crate::topic::application::ports::incoming::use_cases::{
    CreateTopicError, CreateTopicUseCase, DeleteTopicError, DeleteTopicUseCase, GetTopicError,
    GetTopicUseCase, ListFirstTopicsUseCase, ListTopicsError, ListTopicsUseCase, TopicCommand,
    UpdateTopicError, UpdateTopicUseCase,
};
use crate::topic::application::ports::outgoing::{TopicListFilter, TopicSort};

// ============================================================
// Password hashing
// ============================================================

/// Reversible hasher: `hash_of("pw") == "plain$pw"`.
#[derive(Clone, Copy, Default)]
pub struct PrefixHasher;

impl PrefixHasher {
    const PREFIX: &'static str = "plain$";

    pub fn hash_of(password: &str) -> String {
        format!("{}{}", Self::PREFIX, password)
    }
}

#[async_trait]
impl PasswordHasher for PrefixHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        Ok(Self::hash_of(password))
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        match hash.strip_prefix(Self::PREFIX) {
            Some(stored) => Ok(stored == password),
            None => Err(HashError::UnsupportedFormat),
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct FailingHasher;

#[async_trait]
impl PasswordHasher for FailingHasher {
    async fn hash_password(&self, _password: &str) -> Result<String, HashError> {
        Err(HashError::HashFailed)
    }

    async fn verify_password(&self, _password: &str, _hash: &str) -> Result<bool, HashError> {
        Err(HashError::VerifyFailed)
    }
}

// ============================================================
// Tokens
// ============================================================

pub const VALID_TOKEN: &str = "valid-token";

/// Accepts only [`VALID_TOKEN`], which identifies user 1.
pub struct StaticTokenProvider;

impl TokenProvider for StaticTokenProvider {
    fn generate_access_token(
        &self,
        _user_id: UserId,
        _email: &str,
    ) -> Result<AccessToken, TokenError> {
        Ok(AccessToken {
            token: VALID_TOKEN.to_string(),
            expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        })
    }

    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        if token != VALID_TOKEN {
            return Err(TokenError::InvalidSignature);
        }

        Ok(TokenClaims {
            sub: "1".to_string(),
            email: "ana@example.com".to_string(),
            iss: "course-forum".to_string(),
            iat: 0,
            nbf: 0,
            exp: i64::MAX,
        })
    }
}

pub fn static_token_provider() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(StaticTokenProvider);
    web::Data::new(provider)
}

pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", VALID_TOKEN))
}

// ============================================================
// Auth use cases
// ============================================================

pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        Err(LoginError::InvalidCredentials)
    }
}

pub struct StubRegisterUserUseCase;

#[async_trait]
impl IRegisterUserUseCase for StubRegisterUserUseCase {
    async fn execute(&self, _request: RegisterUserRequest) -> Result<UserId, RegisterUserError> {
        Ok(UserId::from(1))
    }
}

// ============================================================
// Topic use cases
// ============================================================

pub fn sample_topic_view(id: i64) -> TopicView {
    TopicView {
        id: TopicId::from(id),
        title: format!("Topic {}", id),
        body: "How do I read this compiler error?".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap(),
        status: TopicStatus::Open,
        author_name: "Ana Torres".to_string(),
        course_name: "Rust from Scratch".to_string(),
    }
}

#[derive(Clone)]
pub struct StubCreateTopicUseCase(pub Result<TopicView, CreateTopicError>);

#[async_trait]
impl CreateTopicUseCase for StubCreateTopicUseCase {
    async fn execute(&self, _command: TopicCommand) -> Result<TopicView, CreateTopicError> {
        self.0.clone()
    }
}

#[derive(Clone)]
pub struct StubGetTopicUseCase(pub Result<TopicView, GetTopicError>);

#[async_trait]
impl GetTopicUseCase for StubGetTopicUseCase {
    async fn execute(&self, _id: TopicId) -> Result<TopicView, GetTopicError> {
        self.0.clone()
    }
}

#[derive(Clone)]
pub struct StubListTopicsUseCase(pub Result<Vec<TopicView>, ListTopicsError>);

#[async_trait]
impl ListTopicsUseCase for StubListTopicsUseCase {
    async fn execute(
        &self,
        _filter: TopicListFilter,
        _sort: TopicSort,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, ListTopicsError> {
        let items = self.0.clone()?;
        let total = items.len() as u64;
        Ok(PageResult::new(items, page, total))
    }
}

#[async_trait]
impl ListFirstTopicsUseCase for StubListTopicsUseCase {
    async fn execute(&self) -> Result<Vec<TopicView>, ListTopicsError> {
        self.0.clone()
    }
}

#[derive(Clone)]
pub struct StubUpdateTopicUseCase(pub Result<TopicView, UpdateTopicError>);

#[async_trait]
impl UpdateTopicUseCase for StubUpdateTopicUseCase {
    async fn execute(
        &self,
        _id: TopicId,
        _command: TopicCommand,
    ) -> Result<TopicView, UpdateTopicError> {
        self.0.clone()
    }
}

#[derive(Clone)]
pub struct StubDeleteTopicUseCase(pub Result<(), DeleteTopicError>);

#[async_trait]
impl DeleteTopicUseCase for StubDeleteTopicUseCase {
    async fn execute(&self, _id: TopicId) -> Result<(), DeleteTopicError> {
        self.0.clone()
    }
}
