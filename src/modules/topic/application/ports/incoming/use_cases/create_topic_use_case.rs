use async_trait::async_trait;

use super::TopicCommand;
use crate::topic::application::domain::entities::{ReferenceKind, TopicView};

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateTopicError {
    #[error("A topic with the same title and body already exists")]
    DuplicateTopic,

    #[error("Referenced {0} does not exist")]
    ReferenceNotFound(ReferenceKind),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait CreateTopicUseCase: Send + Sync {
    async fn execute(&self, command: TopicCommand) -> Result<TopicView, CreateTopicError>;
}
