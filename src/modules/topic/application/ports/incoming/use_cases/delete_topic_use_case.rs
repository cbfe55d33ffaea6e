use async_trait::async_trait;

use crate::topic::application::domain::entities::TopicId;

#[derive(Debug, Clone, thiserror::Error)]
pub enum DeleteTopicError {
    #[error("Topic not found")]
    NotFound,

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait DeleteTopicUseCase: Send + Sync {
    async fn execute(&self, id: TopicId) -> Result<(), DeleteTopicError>;
}
