use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Datelike, SubsecRound, Utc};

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::{
    NewUser, UserQuery, UserQueryError, UserQueryResult, UserRepository, UserRepositoryError,
};
use crate::course::application::domain::entities::CourseId;
use crate::course::application::ports::outgoing::{
    CourseQuery, CourseQueryError, CourseQueryResult,
};
use crate::shared::pagination::{PageRequest, PageResult};
use crate::topic::application::domain::entities::{
    ReferenceKind, TopicId, TopicStatus, TopicView,
};
use crate::topic::application::ports::outgoing::{
    NewTopic, SortDirection, TopicChanges, TopicListFilter, TopicQuery, TopicQueryError,
    TopicRepository, TopicRepositoryError, TopicSort, TopicSortField,
};

// ──────────────────────────────────────────────────────────
// State
// ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct StoredUser {
    name: String,
    email: String,
    password_hash: String,
}

#[derive(Debug, Clone)]
struct StoredCourse {
    name: String,
    category: String,
}

#[derive(Default)]
struct State {
    users: BTreeMap<i64, StoredUser>,
    courses: BTreeMap<i64, StoredCourse>,
    topics: BTreeMap<i64, NewTopic>,
    next_user_id: i64,
    next_course_id: i64,
    next_topic_id: i64,
    failure: Option<String>,
    reject_next_user_insert: bool,
    reject_next_topic_insert: bool,
}

impl State {
    fn check_failure(&self) -> Result<(), String> {
        match &self.failure {
            Some(msg) => Err(msg.clone()),
            None => Ok(()),
        }
    }

    fn pair_taken(&self, title: &str, body: &str, excluding: Option<i64>) -> bool {
        self.topics
            .iter()
            .any(|(id, t)| Some(*id) != excluding && t.title == title && t.body == body)
    }

    fn missing_reference(&self, author: UserId, course: CourseId) -> Option<ReferenceKind> {
        if !self.users.contains_key(&author.value()) {
            Some(ReferenceKind::Author)
        } else if !self.courses.contains_key(&course.value()) {
            Some(ReferenceKind::Course)
        } else {
            None
        }
    }

    fn project(&self, id: i64, topic: &NewTopic) -> Result<TopicView, TopicQueryError> {
        let author = self.users.get(&topic.author_id.value()).ok_or_else(|| {
            TopicQueryError::DanglingReference(format!("topic {} author", id))
        })?;
        let course = self.courses.get(&topic.course_id.value()).ok_or_else(|| {
            TopicQueryError::DanglingReference(format!("topic {} course", id))
        })?;

        Ok(TopicView {
            id: TopicId::from(id),
            title: topic.title.clone(),
            body: topic.body.clone(),
            created_at: topic.created_at,
            status: topic.status,
            author_name: author.name.clone(),
            course_name: course.name.clone(),
        })
    }

    fn matches(&self, topic: &NewTopic, filter: &TopicListFilter) -> bool {
        let course_ok = match &filter.course_name {
            Some(fragment) => self
                .courses
                .get(&topic.course_id.value())
                .is_some_and(|c| c.name.contains(fragment.as_str())),
            None => true,
        };
        let year_ok = filter.year.map_or(true, |y| topic.created_at.year() == y);

        course_ok && year_ok
    }
}

fn compare(sort: TopicSort, a: (&i64, &NewTopic), b: (&i64, &NewTopic)) -> Ordering {
    let primary = match sort.field {
        TopicSortField::CreatedAt => a.1.created_at.cmp(&b.1.created_at),
        TopicSortField::Title => a.1.title.cmp(&b.1.title),
        TopicSortField::Id => a.0.cmp(b.0),
    };
    let primary = match sort.direction {
        SortDirection::Asc => primary,
        SortDirection::Desc => primary.reverse(),
    };

    primary.then(a.0.cmp(b.0))
}

// ──────────────────────────────────────────────────────────
// Store
// ──────────────────────────────────────────────────────────

/// In-memory stand-in for the PostgreSQL gateway. Implements every outgoing
/// port, enforcing the same uniqueness and reference rules as the schema.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryStore {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn seed_user(&self, name: &str, email: &str, password_hash: &str) -> UserId {
        let mut state = self.lock();
        state.next_user_id += 1;
        let id = state.next_user_id;
        state.users.insert(
            id,
            StoredUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            },
        );
        UserId::from(id)
    }

    pub fn seed_course(&self, name: &str, category: &str) -> CourseId {
        let mut state = self.lock();
        state.next_course_id += 1;
        let id = state.next_course_id;
        state.courses.insert(
            id,
            StoredCourse {
                name: name.to_string(),
                category: category.to_string(),
            },
        );
        CourseId::from(id)
    }

    /// Inserts a topic row directly, bypassing every rule.
    pub fn seed_topic(
        &self,
        title: &str,
        body: &str,
        author_id: UserId,
        course_id: CourseId,
        created_at: DateTime<Utc>,
    ) -> TopicId {
        let mut state = self.lock();
        state.next_topic_id += 1;
        let id = state.next_topic_id;
        state.topics.insert(
            id,
            NewTopic {
                title: title.to_string(),
                body: body.to_string(),
                author_id,
                course_id,
                created_at,
                status: TopicStatus::Open,
            },
        );
        TopicId::from(id)
    }

    pub fn remove_course(&self, id: CourseId) {
        self.lock().courses.remove(&id.value());
    }

    pub fn user_by_email(&self, email: &str) -> Option<UserQueryResult> {
        self.lock()
            .users
            .iter()
            .find(|(_, u)| u.email == email)
            .map(|(id, u)| UserQueryResult {
                id: UserId::from(*id),
                name: u.name.clone(),
                email: u.email.clone(),
                password_hash: u.password_hash.clone(),
            })
    }

    pub fn user_count(&self) -> usize {
        self.lock().users.len()
    }

    pub fn topic_row(&self, id: TopicId) -> Option<NewTopic> {
        self.lock().topics.get(&id.value()).cloned()
    }

    pub fn topic_count(&self) -> usize {
        self.lock().topics.len()
    }

    /// Every subsequent call on any port fails with `msg`.
    pub fn fail_with(&self, msg: &str) {
        self.lock().failure = Some(msg.to_string());
    }

    /// Simulates losing the race against a concurrent registration.
    pub fn reject_next_user_insert_as_duplicate(&self) {
        self.lock().reject_next_user_insert = true;
    }

    /// Simulates losing the race against a concurrent identical topic.
    pub fn reject_next_topic_insert_as_duplicate(&self) {
        self.lock().reject_next_topic_insert = true;
    }
}

// ──────────────────────────────────────────────────────────
// Users
// ──────────────────────────────────────────────────────────

#[async_trait]
impl UserQuery for InMemoryStore {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<UserQueryResult>, UserQueryError> {
        let state = self.lock();
        state.check_failure().map_err(UserQueryError::DatabaseError)?;

        Ok(state.users.get(&user_id.value()).map(|u| UserQueryResult {
            id: user_id,
            name: u.name.clone(),
            email: u.email.clone(),
            password_hash: u.password_hash.clone(),
        }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserQueryResult>, UserQueryError> {
        self.lock()
            .check_failure()
            .map_err(UserQueryError::DatabaseError)?;

        Ok(self.user_by_email(email))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<UserId, UserRepositoryError> {
        let mut state = self.lock();
        state
            .check_failure()
            .map_err(UserRepositoryError::DatabaseError)?;

        if std::mem::take(&mut state.reject_next_user_insert)
            || state.users.values().any(|u| u.email == user.email)
        {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        state.next_user_id += 1;
        let id = state.next_user_id;
        state.users.insert(
            id,
            StoredUser {
                name: user.name,
                email: user.email,
                password_hash: user.password_hash,
            },
        );

        Ok(UserId::from(id))
    }
}

// ──────────────────────────────────────────────────────────
// Courses
// ──────────────────────────────────────────────────────────

#[async_trait]
impl CourseQuery for InMemoryStore {
    async fn find_by_id(
        &self,
        course_id: CourseId,
    ) -> Result<Option<CourseQueryResult>, CourseQueryError> {
        let state = self.lock();
        state
            .check_failure()
            .map_err(CourseQueryError::DatabaseError)?;

        Ok(state
            .courses
            .get(&course_id.value())
            .map(|c| CourseQueryResult {
                id: course_id,
                name: c.name.clone(),
                category: c.category.clone(),
            }))
    }
}

// ──────────────────────────────────────────────────────────
// Topics
// ──────────────────────────────────────────────────────────

#[async_trait]
impl TopicQuery for InMemoryStore {
    async fn find_by_id(&self, id: TopicId) -> Result<Option<TopicView>, TopicQueryError> {
        let state = self.lock();
        state.check_failure().map_err(TopicQueryError::DatabaseError)?;

        state
            .topics
            .get(&id.value())
            .map(|t| state.project(id.value(), t))
            .transpose()
    }

    async fn exists_by_title_and_body(
        &self,
        title: &str,
        body: &str,
        excluding: Option<TopicId>,
    ) -> Result<bool, TopicQueryError> {
        let state = self.lock();
        state.check_failure().map_err(TopicQueryError::DatabaseError)?;

        Ok(state.pair_taken(title, body, excluding.map(|id| id.value())))
    }

    async fn list(
        &self,
        filter: TopicListFilter,
        sort: TopicSort,
        page: PageRequest,
    ) -> Result<PageResult<TopicView>, TopicQueryError> {
        let state = self.lock();
        state.check_failure().map_err(TopicQueryError::DatabaseError)?;

        let mut rows: Vec<(&i64, &NewTopic)> = state
            .topics
            .iter()
            .filter(|(_, t)| state.matches(t, &filter))
            .collect();
        rows.sort_by(|a, b| compare(sort, *a, *b));

        let total = rows.len() as u64;
        let items = rows
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size() as usize)
            .map(|(id, t)| state.project(*id, t))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PageResult::new(items, page, total))
    }

    async fn first_n(&self, limit: u64) -> Result<Vec<TopicView>, TopicQueryError> {
        let state = self.lock();
        state.check_failure().map_err(TopicQueryError::DatabaseError)?;

        let mut rows: Vec<(&i64, &NewTopic)> = state.topics.iter().collect();
        rows.sort_by(|a, b| compare(TopicSort::default(), *a, *b));

        rows.into_iter()
            .take(limit as usize)
            .map(|(id, t)| state.project(*id, t))
            .collect()
    }
}

#[async_trait]
impl TopicRepository for InMemoryStore {
    async fn insert(&self, topic: NewTopic) -> Result<TopicId, TopicRepositoryError> {
        let mut state = self.lock();
        state
            .check_failure()
            .map_err(TopicRepositoryError::DatabaseError)?;

        if std::mem::take(&mut state.reject_next_topic_insert)
            || state.pair_taken(&topic.title, &topic.body, None)
        {
            return Err(TopicRepositoryError::DuplicateTopic);
        }
        if let Some(kind) = state.missing_reference(topic.author_id, topic.course_id) {
            return Err(TopicRepositoryError::MissingReference(kind));
        }

        state.next_topic_id += 1;
        let id = state.next_topic_id;
        // timestamptz keeps microseconds
        let topic = NewTopic {
            created_at: topic.created_at.trunc_subsecs(6),
            ..topic
        };
        state.topics.insert(id, topic);

        Ok(TopicId::from(id))
    }

    async fn update(&self, id: TopicId, changes: TopicChanges) -> Result<(), TopicRepositoryError> {
        let mut state = self.lock();
        state
            .check_failure()
            .map_err(TopicRepositoryError::DatabaseError)?;

        if !state.topics.contains_key(&id.value()) {
            return Err(TopicRepositoryError::NotFound);
        }
        if state.pair_taken(&changes.title, &changes.body, Some(id.value())) {
            return Err(TopicRepositoryError::DuplicateTopic);
        }
        if let Some(kind) = state.missing_reference(changes.author_id, changes.course_id) {
            return Err(TopicRepositoryError::MissingReference(kind));
        }

        if let Some(row) = state.topics.get_mut(&id.value()) {
            row.title = changes.title;
            row.body = changes.body;
            row.author_id = changes.author_id;
            row.course_id = changes.course_id;
        }

        Ok(())
    }

    async fn delete(&self, id: TopicId) -> Result<(), TopicRepositoryError> {
        let mut state = self.lock();
        state
            .check_failure()
            .map_err(TopicRepositoryError::DatabaseError)?;

        state
            .topics
            .remove(&id.value())
            .map(|_| ())
            .ok_or(TopicRepositoryError::NotFound)
    }
}
