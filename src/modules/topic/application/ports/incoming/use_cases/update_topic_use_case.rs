use async_trait::async_trait;

use super::TopicCommand;
use crate::topic::application::domain::entities::{ReferenceKind, TopicId, TopicView};

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateTopicError {
    #[error("Topic not found")]
    NotFound,

    #[error("Another topic with the same title and body already exists")]
    DuplicateTopic,

    #[error("Referenced {0} does not exist")]
    ReferenceNotFound(ReferenceKind),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait UpdateTopicUseCase: Send + Sync {
    async fn execute(&self, id: TopicId, command: TopicCommand)
        -> Result<TopicView, UpdateTopicError>;
}
