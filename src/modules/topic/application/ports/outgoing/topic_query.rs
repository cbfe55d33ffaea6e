use async_trait::async_trait;

use crate::shared::pagination::{PageRequest, PageResult};
use crate::topic::application::domain::entities::{TopicId, TopicView};

//
// ──────────────────────────────────────────────────────────
// Filter
// ──────────────────────────────────────────────────────────
//

/// Optional narrowing of a topic listing. Both set means both must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicListFilter {
    /// Case-sensitive literal substring of the course name
    pub course_name: Option<String>,
    /// Calendar year (UTC) of `created_at`
    pub year: Option<i32>,
}

impl TopicListFilter {
    pub fn is_empty(&self) -> bool {
        self.course_name.is_none() && self.year.is_none()
    }
}

//
// ──────────────────────────────────────────────────────────
// Sort
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopicSortField {
    #[default]
    CreatedAt,
    Title,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Primary ordering of a listing. Adapters always append `id ASC`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TopicSort {
    pub field: TopicSortField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported sort '{0}', expected createdAt, title or id with optional ,asc or ,desc")]
pub struct TopicSortError(pub String);

impl TopicSort {
    /// Parses `field[,asc|,desc]`. Both English and Spanish field names are accepted.
    pub fn parse(raw: &str) -> Result<Self, TopicSortError> {
        let invalid = || TopicSortError(raw.to_string());

        let mut parts = raw.split(',').map(str::trim);
        let field = match parts.next().unwrap_or_default() {
            "" | "createdAt" | "fechaCreacion" => TopicSortField::CreatedAt,
            "title" | "titulo" => TopicSortField::Title,
            "id" => TopicSortField::Id,
            _ => return Err(invalid()),
        };

        let direction = match parts.next().map(|d| d.to_ascii_lowercase()) {
            None => SortDirection::Asc,
            Some(d) if d == "asc" => SortDirection::Asc,
            Some(d) if d == "desc" => SortDirection::Desc,
            Some(_) => return Err(invalid()),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self { field, direction })
    }
}

//
// ──────────────────────────────────────────────────────────
// Port
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, thiserror::Error)]
pub enum TopicQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A stored topic points at a user or course that cannot be loaded.
    #[error("Dangling reference: {0}")]
    DanglingReference(String),
}

/// Read side of the topic store. Every result is already projected.
#[async_trait]
pub trait TopicQuery: Send + Sync {
    async fn find_by_id(&self, id: TopicId) -> Result<Option<TopicView>, TopicQueryError>;

    /// Exact, case-sensitive match on both fields.
    async fn exists_by_title_and_body(
        &self,
        title: &str,
        body: &str,
        excluding: Option<TopicId>,
    ) -> Result<bool, TopicQueryError>;

    async fn list(
        &self,
        filter: TopicListFilter,
        sort: TopicSort,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, TopicQueryError>;

    /// Oldest `limit` topics, `created_at` then `id` ascending.
    async fn first_n(&self, limit: u64) -> Result<Vec<TopicView>, TopicQueryError>;
}
