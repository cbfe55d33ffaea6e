use async_trait::async_trait;

use crate::topic::application::{
    domain::entities::TopicId,
    ports::incoming::use_cases::{DeleteTopicError, DeleteTopicUseCase},
    ports::outgoing::{TopicRepository, TopicRepositoryError},
};

/// Hard delete. Existence is decided by the affected row count, so there is
/// no window between the check and the removal.
#[derive(Debug, Clone)]
pub struct DeleteTopicService<R>
where
    R: TopicRepository + Send + Sync,
{
    repository: R,
}

impl<R> DeleteTopicService<R>
where
    R: TopicRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> DeleteTopicUseCase for DeleteTopicService<R>
where
    R: TopicRepository + Send + Sync,
{
    async fn execute(&self, id: TopicId) -> Result<(), DeleteTopicError> {
        self.repository.delete(id).await.map_err(|e| match e {
            TopicRepositoryError::NotFound => DeleteTopicError::NotFound,
            other => DeleteTopicError::RepositoryError(other.to_string()),
        })?;

        tracing::info!(topic_id = %id, "Topic deleted");
        Ok(())
    }
}
