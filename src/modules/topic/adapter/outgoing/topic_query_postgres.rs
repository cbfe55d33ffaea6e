use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{
    sea_query::SimpleExpr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Select,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::modules::auth::adapter::outgoing::sea_orm_entity::users;
use crate::modules::course::adapter::outgoing::sea_orm_entity::courses;
use crate::shared::pagination::{PageRequest, PageResult};
use crate::topic::application::domain::entities::{TopicId, TopicStatus, TopicView};
use crate::topic::application::ports::outgoing::{
    SortDirection, TopicListFilter, TopicQuery, TopicQueryError, TopicSort, TopicSortField,
};

use super::sea_orm_entity::topics::{Column, Entity, Model};

// ============================================================================
// Query Implementation
// ============================================================================

#[derive(Clone, Debug)]
pub struct TopicQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl TopicQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Resolves author and course names for a batch of rows with one query
    /// per referenced table.
    async fn project(&self, models: Vec<Model>) -> Result<Vec<TopicView>, TopicQueryError> {
        if models.is_empty() {
            return Ok(Vec::new());
        }

        let author_ids: BTreeSet<i64> = models.iter().map(|m| m.author_id).collect();
        let course_ids: BTreeSet<i64> = models.iter().map(|m| m.course_id).collect();

        let authors: HashMap<i64, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(author_ids))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let course_names: HashMap<i64, String> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        models
            .into_iter()
            .map(|m| model_to_view(m, &authors, &course_names))
            .collect()
    }
}

#[async_trait]
impl TopicQuery for TopicQueryPostgres {
    async fn find_by_id(&self, id: TopicId) -> Result<Option<TopicView>, TopicQueryError> {
        let Some(model) = Entity::find_by_id(id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        Ok(self.project(vec![model]).await?.into_iter().next())
    }

    async fn exists_by_title_and_body(
        &self,
        title: &str,
        body: &str,
        excluding: Option<TopicId>,
    ) -> Result<bool, TopicQueryError> {
        let mut query = Entity::find()
            .select_only()
            .column(Column::Id)
            .filter(Column::Title.eq(title))
            .filter(Column::Body.eq(body));

        if let Some(id) = excluding {
            query = query.filter(Column::Id.ne(id.value()));
        }

        let found = query
            .into_tuple::<i64>()
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(found.is_some())
    }

    async fn list(
        &self,
        filter: TopicListFilter,
        sort: TopicSort,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, TopicQueryError> {
        let mut query = Entity::find();

        if let Some(ref fragment) = filter.course_name {
            query = query.filter(course_name_contains(fragment));
        }

        if let Some(year) = filter.year {
            let Some((start, end)) = year_bounds(year) else {
                return Ok(PageResult::empty(page));
            };
            query = query
                .filter(Column::CreatedAt.gte(start))
                .filter(Column::CreatedAt.lt(end));
        }

        let query = apply_sort(query, sort);

        let total = query.clone().count(&*self.db).await.map_err(map_db_err)?;

        let models = query
            .offset(page.offset())
            .limit(page.size())
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(PageResult::new(self.project(models).await?, page, total))
    }

    async fn first_n(&self, limit: u64) -> Result<Vec<TopicView>, TopicQueryError> {
        let models = apply_sort(Entity::find(), TopicSort::default())
            .limit(limit)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        self.project(models).await
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn model_to_view(
    model: Model,
    authors: &HashMap<i64, String>,
    courses: &HashMap<i64, String>,
) -> Result<TopicView, TopicQueryError> {
    let author_name = authors.get(&model.author_id).cloned().ok_or_else(|| {
        tracing::error!(topic_id = model.id, author_id = model.author_id, "Topic author is missing");
        TopicQueryError::DanglingReference(format!("author {} of topic {}", model.author_id, model.id))
    })?;

    let course_name = courses.get(&model.course_id).cloned().ok_or_else(|| {
        tracing::error!(topic_id = model.id, course_id = model.course_id, "Topic course is missing");
        TopicQueryError::DanglingReference(format!("course {} of topic {}", model.course_id, model.id))
    })?;

    let status = model.status.parse::<TopicStatus>().map_err(|e| {
        tracing::error!(topic_id = model.id, error = %e, "Stored topic status is invalid");
        TopicQueryError::DatabaseError(e.to_string())
    })?;

    Ok(TopicView {
        id: TopicId::from(model.id),
        title: model.title,
        body: model.body,
        created_at: model.created_at.with_timezone(&Utc),
        status,
        author_name,
        course_name,
    })
}

/// Every ordering ends on `id ASC` so equal keys page deterministically.
fn apply_sort(query: Select<Entity>, sort: TopicSort) -> Select<Entity> {
    let order = match sort.direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    };

    match sort.field {
        TopicSortField::CreatedAt => query
            .order_by(Column::CreatedAt, order)
            .order_by_asc(Column::Id),
        TopicSortField::Title => query.order_by(Column::Title, order).order_by_asc(Column::Id),
        TopicSortField::Id => query.order_by(Column::Id, order),
    }
}

/// `%fragment%` with LIKE metacharacters escaped by backslash, the
/// PostgreSQL default escape character.
/// Topics whose course name contains `fragment` literally, resolved in the
/// database so the bind count stays constant.
fn course_name_contains(fragment: &str) -> SimpleExpr {
    Column::CourseId.in_subquery(
        courses::Entity::find()
            .select_only()
            .column(courses::Column::Id)
            .filter(courses::Column::Name.like(like_contains(fragment)))
            .into_query(),
    )
}

fn like_contains(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// `[Jan 1 year, Jan 1 year+1)` in UTC, or `None` outside chrono's range.
fn year_bounds(year: i32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).single()?;
    let end = Utc
        .with_ymd_and_hms(year.checked_add(1)?, 1, 1, 0, 0, 0)
        .single()?;
    Some((start, end))
}

fn map_db_err(e: DbErr) -> TopicQueryError {
    TopicQueryError::DatabaseError(e.to_string())
}

// ============================================================================
// Tests
// ============================================================================
