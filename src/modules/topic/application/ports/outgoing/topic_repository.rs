use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::auth::application::domain::entities::UserId;
use crate::course::application::domain::entities::CourseId;
use crate::topic::application::domain::entities::{ReferenceKind, TopicId, TopicStatus};

#[derive(Debug, Clone, PartialEq)]
pub struct NewTopic {
    pub title: String,
    pub body: String,
    pub author_id: UserId,
    pub course_id: CourseId,
    pub created_at: DateTime<Utc>,
    pub status: TopicStatus,
}

/// The four fields an update replaces. `created_at` and `status` are not here.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicChanges {
    pub title: String,
    pub body: String,
    pub author_id: UserId,
    pub course_id: CourseId,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum TopicRepositoryError {
    #[error("A topic with the same title and body already exists")]
    DuplicateTopic,

    #[error("Referenced {0} does not exist")]
    MissingReference(ReferenceKind),

    #[error("Topic not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait TopicRepository: Send + Sync {
    async fn insert(&self, topic: NewTopic) -> Result<TopicId, TopicRepositoryError>;

    async fn update(&self, id: TopicId, changes: TopicChanges) -> Result<(), TopicRepositoryError>;

    async fn delete(&self, id: TopicId) -> Result<(), TopicRepositoryError>;
}
