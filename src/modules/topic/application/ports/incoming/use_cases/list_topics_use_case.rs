use async_trait::async_trait;

use crate::shared::pagination::{PageRequest, PageResult};
use crate::topic::application::domain::entities::TopicView;
use crate::topic::application::ports::outgoing::{TopicListFilter, TopicSort};

/// Size of the "first topics" listing.
pub const FIRST_TOPICS_LIMIT: u64 = 10;

#[derive(Debug, Clone, thiserror::Error)]
pub enum ListTopicsError {
    #[error("Failed to fetch topics: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait ListTopicsUseCase: Send + Sync {
    async fn execute(
        &self,
        filter: TopicListFilter,
        sort: TopicSort,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, ListTopicsError>;
}

#[async_trait]
pub trait ListFirstTopicsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<TopicView>, ListTopicsError>;
}
