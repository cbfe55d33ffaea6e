use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;

use crate::course::application::domain::entities::CourseId;
use crate::course::application::ports::outgoing::{
    CourseQuery, CourseQueryError, CourseQueryResult,
};

use super::sea_orm_entity::courses::{Entity as CourseEntity, Model as CourseModel};

#[derive(Clone, Debug)]
pub struct CourseQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl CourseQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<CourseModel> for CourseQueryResult {
    fn from(model: CourseModel) -> Self {
        Self {
            id: CourseId::from(model.id),
            name: model.name,
            category: model.category,
        }
    }
}

#[async_trait]
impl CourseQuery for CourseQueryPostgres {
    async fn find_by_id(
        &self,
        course_id: CourseId,
    ) -> Result<Option<CourseQueryResult>, CourseQueryError> {
        let course = CourseEntity::find_by_id(course_id.value())
            .one(&*self.db)
            .await
            .map_err(|e| CourseQueryError::DatabaseError(e.to_string()))?;

        Ok(course.map(CourseQueryResult::from))
    }
}
