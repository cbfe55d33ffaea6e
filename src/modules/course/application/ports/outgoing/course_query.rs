use async_trait::async_trait;

use crate::course::application::domain::entities::CourseId;

/// Courses are reference data. The forum only ever reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseQueryResult {
    pub id: CourseId,
    pub name: String,
    pub category: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CourseQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait CourseQuery: Send + Sync {
    async fn find_by_id(
        &self,
        course_id: CourseId,
    ) -> Result<Option<CourseQueryResult>, CourseQueryError>;
}
