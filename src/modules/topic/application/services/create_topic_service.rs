use async_trait::async_trait;
use chrono::SubsecRound;
use std::sync::Arc;

use super::references::{resolve_references, ReferenceError};
use crate::auth::application::ports::outgoing::UserQuery;
use crate::course::application::ports::outgoing::CourseQuery;
use crate::shared::clock::Clock;
use crate::topic::application::domain::entities::{TopicStatus, TopicView};
use crate::topic::application::ports::{
    incoming::use_cases::{CreateTopicError, CreateTopicUseCase, TopicCommand},
    outgoing::{NewTopic, TopicQuery, TopicRepository, TopicRepositoryError},
};

#[derive(Clone)]
pub struct CreateTopicService<Q, R, U, C>
where
    Q: TopicQuery + Send + Sync,
    R: TopicRepository + Send + Sync,
    U: UserQuery + Send + Sync,
    C: CourseQuery + Send + Sync,
{
    query: Q,
    repository: R,
    users: U,
    courses: C,
    clock: Arc<dyn Clock>,
}

impl<Q, R, U, C> CreateTopicService<Q, R, U, C>
where
    Q: TopicQuery + Send + Sync,
    R: TopicRepository + Send + Sync,
    U: UserQuery + Send + Sync,
    C: CourseQuery + Send + Sync,
{
    pub fn new(query: Q, repository: R, users: U, courses: C, clock: Arc<dyn Clock>) -> Self {
        Self {
            query,
            repository,
            users,
            courses,
            clock,
        }
    }
}

#[async_trait]
impl<Q, R, U, C> CreateTopicUseCase for CreateTopicService<Q, R, U, C>
where
    Q: TopicQuery + Send + Sync,
    R: TopicRepository + Send + Sync,
    U: UserQuery + Send + Sync,
    C: CourseQuery + Send + Sync,
{
    async fn execute(&self, command: TopicCommand) -> Result<TopicView, CreateTopicError> {
        // 1. Duplicate content
        let taken = self
            .query
            .exists_by_title_and_body(command.title(), command.body(), None)
            .await
            .map_err(|e| CreateTopicError::RepositoryError(e.to_string()))?;

        if taken {
            return Err(CreateTopicError::DuplicateTopic);
        }

        // 2. Author, then course
        let refs = resolve_references(
            &self.users,
            &self.courses,
            command.author_id(),
            command.course_id(),
        )
        .await
        .map_err(|e| match e {
            ReferenceError::Missing(kind) => CreateTopicError::ReferenceNotFound(kind),
            ReferenceError::Lookup(msg) => CreateTopicError::RepositoryError(msg),
        })?;

        // 3. Persist, at the precision the store keeps
        let created_at = self.clock.now().trunc_subsecs(6);
        let status = TopicStatus::Open;

        let id = self
            .repository
            .insert(NewTopic {
                title: command.title().to_string(),
                body: command.body().to_string(),
                author_id: command.author_id(),
                course_id: command.course_id(),
                created_at,
                status,
            })
            .await
            .map_err(|e| match e {
                TopicRepositoryError::DuplicateTopic => CreateTopicError::DuplicateTopic,
                TopicRepositoryError::MissingReference(kind) => {
                    CreateTopicError::ReferenceNotFound(kind)
                }
                other => CreateTopicError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(topic_id = %id, author_id = %command.author_id(), "Topic created");

        Ok(TopicView {
            id,
            title: command.title().to_string(),
            body: command.body().to_string(),
            created_at,
            status,
            author_name: refs.author_name,
            course_name: refs.course_name,
        })
    }
}
