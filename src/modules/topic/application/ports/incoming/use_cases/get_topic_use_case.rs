use async_trait::async_trait;

use crate::topic::application::domain::entities::{TopicId, TopicView};

#[derive(Debug, Clone, thiserror::Error)]
pub enum GetTopicError {
    #[error("Topic not found")]
    NotFound,

    #[error("Failed to fetch topic: {0}")]
    QueryFailed(String),
}

#[async_trait]
pub trait GetTopicUseCase: Send + Sync {
    async fn execute(&self, id: TopicId) -> Result<TopicView, GetTopicError>;
}
