use async_trait::async_trait;

use crate::topic::application::{
    domain::entities::{TopicId, TopicView},
    ports::incoming::use_cases::{GetTopicError, GetTopicUseCase},
    ports::outgoing::TopicQuery,
};

#[derive(Debug, Clone)]
pub struct GetTopicService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    query: Q,
}

impl<Q> GetTopicService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> GetTopicUseCase for GetTopicService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    async fn execute(&self, id: TopicId) -> Result<TopicView, GetTopicError> {
        self.query
            .find_by_id(id)
            .await
            .map_err(|e| GetTopicError::QueryFailed(e.to_string()))?
            .ok_or(GetTopicError::NotFound)
    }
}
