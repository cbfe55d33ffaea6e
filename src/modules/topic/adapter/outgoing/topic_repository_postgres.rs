use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, QueryFilter,
    Set,
};
use std::sync::Arc;

use crate::shared::db_error::{constraint_violation, ConstraintViolation};
use crate::topic::application::domain::entities::{ReferenceKind, TopicId};
use crate::topic::application::ports::outgoing::{
    NewTopic, TopicChanges, TopicRepository, TopicRepositoryError,
};

use super::sea_orm_entity::topics::{ActiveModel, Column, Entity};

const COURSE_FK_CONSTRAINT: &str = "fk_topics_course_id";

// ============================================================================
// Repository Implementation
// ============================================================================

#[derive(Clone)]
pub struct TopicRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl TopicRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TopicRepository for TopicRepositoryPostgres {
    async fn insert(&self, topic: NewTopic) -> Result<TopicId, TopicRepositoryError> {
        let model = ActiveModel {
            id: NotSet,
            title: Set(topic.title),
            body: Set(topic.body),
            created_at: Set(topic.created_at.fixed_offset()),
            status: Set(topic.status.as_str().to_string()),
            author_id: Set(topic.author_id.value()),
            course_id: Set(topic.course_id.value()),
        };

        let inserted = model.insert(&*self.db).await.map_err(map_write_err)?;

        tracing::debug!(topic_id = inserted.id, "Topic row inserted");

        Ok(TopicId::from(inserted.id))
    }

    async fn update(&self, id: TopicId, changes: TopicChanges) -> Result<(), TopicRepositoryError> {
        let model = ActiveModel {
            title: Set(changes.title),
            body: Set(changes.body),
            author_id: Set(changes.author_id.value()),
            course_id: Set(changes.course_id.value()),
            ..Default::default()
        };

        let result = Entity::update_many()
            .set(model)
            .filter(Column::Id.eq(id.value()))
            .exec(&*self.db)
            .await
            .map_err(map_write_err)?;

        if result.rows_affected == 0 {
            return Err(TopicRepositoryError::NotFound);
        }

        Ok(())
    }

    async fn delete(&self, id: TopicId) -> Result<(), TopicRepositoryError> {
        let result = Entity::delete_by_id(id.value())
            .exec(&*self.db)
            .await
            .map_err(map_write_err)?;

        if result.rows_affected == 0 {
            return Err(TopicRepositoryError::NotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn map_write_err(e: DbErr) -> TopicRepositoryError {
    match constraint_violation(&e) {
        Some(ConstraintViolation::Unique(_)) => TopicRepositoryError::DuplicateTopic,
        Some(ConstraintViolation::ForeignKey(msg)) => {
            let kind = if msg.contains(COURSE_FK_CONSTRAINT) {
                ReferenceKind::Course
            } else {
                ReferenceKind::Author
            };
            TopicRepositoryError::MissingReference(kind)
        }
        None => {
            tracing::error!(error = %e, "Topic write failed");
            TopicRepositoryError::DatabaseError(e.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
