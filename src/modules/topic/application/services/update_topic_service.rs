use async_trait::async_trait;

use super::references::{resolve_references, ReferenceError};
use crate::auth::application::ports::outgoing::UserQuery;
use crate::course::application::ports::outgoing::CourseQuery;
use crate::topic::application::domain::entities::{TopicId, TopicView};
use crate::topic::application::ports::{
    incoming::use_cases::{TopicCommand, UpdateTopicError, UpdateTopicUseCase},
    outgoing::{TopicChanges, TopicQuery, TopicRepository, TopicRepositoryError},
};

#[derive(Debug, Clone)]
pub struct UpdateTopicService<Q, R, U, C>
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
}

impl<Q, R, U, C> UpdateTopicService<Q, R, U, C>
where
    Q: TopicQuery + Send + Sync,
    R: TopicRepository + Send + Sync,
    U: UserQuery + Send + Sync,
    C: CourseQuery + Send + Sync,
{
    pub fn new(query: Q, repository: R, users: U, courses: C) -> Self {
        Self {
            query,
            repository,
            users,
            courses,
        }
    }
}

#[async_trait]
impl<Q, R, U, C> UpdateTopicUseCase for UpdateTopicService<Q, R, U, C>
where
    Q: TopicQuery + Send + Sync,
    R: TopicRepository + Send + Sync,
    U: UserQuery + Send + Sync,
    C: CourseQuery + Send + Sync,
{
    async fn execute(
        &self,
        id: TopicId,
        command: TopicCommand,
    ) -> Result<TopicView, UpdateTopicError> {
        // 1. Target must exist; its timestamp and status carry over
        let current = self
            .query
            .find_by_id(id)
            .await
            .map_err(|e| UpdateTopicError::RepositoryError(e.to_string()))?
            .ok_or(UpdateTopicError::NotFound)?;

        // 2. The pair may only belong to this topic
        let taken = self
            .query
            .exists_by_title_and_body(command.title(), command.body(), Some(id))
            .await
            .map_err(|e| UpdateTopicError::RepositoryError(e.to_string()))?;

        if taken {
            return Err(UpdateTopicError::DuplicateTopic);
        }

        // 3. Re-resolve references
        let refs = resolve_references(
            &self.users,
            &self.courses,
            command.author_id(),
            command.course_id(),
        )
        .await
        .map_err(|e| match e {
            ReferenceError::Missing(kind) => UpdateTopicError::ReferenceNotFound(kind),
            ReferenceError::Lookup(msg) => UpdateTopicError::RepositoryError(msg),
        })?;

        // 4. Replace the four mutable fields
        self.repository
            .update(
                id,
                TopicChanges {
                    title: command.title().to_string(),
                    body: command.body().to_string(),
                    author_id: command.author_id(),
                    course_id: command.course_id(),
                },
            )
            .await
            .map_err(|e| match e {
                TopicRepositoryError::NotFound => UpdateTopicError::NotFound,
                TopicRepositoryError::DuplicateTopic => UpdateTopicError::DuplicateTopic,
                TopicRepositoryError::MissingReference(kind) => {
                    UpdateTopicError::ReferenceNotFound(kind)
                }
                TopicRepositoryError::DatabaseError(msg) => UpdateTopicError::RepositoryError(msg),
            })?;

        tracing::info!(topic_id = %id, "Topic updated");

        Ok(TopicView {
            id,
            title: command.title().to_string(),
            body: command.body().to_string(),
            created_at: current.created_at,
            status: current.status,
            author_name: refs.author_name,
            course_name: refs.course_name,
        })
    }
}
