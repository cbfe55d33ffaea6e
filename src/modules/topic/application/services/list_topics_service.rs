use async_trait::async_trait;

use crate::shared::pagination::{PageRequest, PageResult};
use crate::topic::application::{
    domain::entities::TopicView,
    ports::incoming::use_cases::{
        ListFirstTopicsUseCase, ListTopicsError, ListTopicsUseCase, FIRST_TOPICS_LIMIT,
    },
    ports::outgoing::{TopicListFilter, TopicQuery, TopicSort},
};

//
// ──────────────────────────────────────────────────────────
// Paged listing
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone)]
pub struct ListTopicsService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    query: Q,
}

impl<Q> ListTopicsService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListTopicsUseCase for ListTopicsService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    async fn execute(
        &self,
        filter: TopicListFilter,
        sort: TopicSort,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, ListTopicsError> {
        self.query
            .list(filter, sort, page)
            .await
            .map_err(|e| ListTopicsError::QueryFailed(e.to_string()))
    }
}

//
// ──────────────────────────────────────────────────────────
// First topics
// ──────────────────────────────────────────────────────────
//

/// Always hits the store. Results are never cached between calls.
#[derive(Debug, Clone)]
pub struct ListFirstTopicsService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    query: Q,
}

impl<Q> ListFirstTopicsService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListFirstTopicsUseCase for ListFirstTopicsService<Q>
where
    Q: TopicQuery + Send + Sync,
{
    async fn execute(&self) -> Result<Vec<TopicView>, ListTopicsError> {
        self.query
            .first_n(FIRST_TOPICS_LIMIT)
            .await
            .map_err(|e| ListTopicsError::QueryFailed(e.to_string()))
    }
}
