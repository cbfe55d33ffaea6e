use crate::auth::application::domain::entities::UserId;
use crate::course::application::domain::entities::CourseId;

pub const MAX_TITLE_LENGTH: usize = 200;

//
// ──────────────────────────────────────────────────────────
// Topic Command
// ──────────────────────────────────────────────────────────
//

/// Validated input shared by create and update.
///
/// Title and body are kept exactly as sent. Blank values are rejected but
/// surrounding whitespace is not stripped, so duplicate detection compares
/// what the client actually submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicCommand {
    title: String,
    body: String,
    author_id: UserId,
    course_id: CourseId,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicCommandError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Title must be at most 200 characters")]
    TitleTooLong,

    #[error("Body cannot be empty")]
    EmptyBody,

    #[error("Author id must be a positive number")]
    InvalidAuthorId,

    #[error("Course id must be a positive number")]
    InvalidCourseId,
}

impl TopicCommand {
    pub fn new(
        title: String,
        body: String,
        author_id: i64,
        course_id: i64,
    ) -> Result<Self, TopicCommandError> {
        if title.trim().is_empty() {
            return Err(TopicCommandError::EmptyTitle);
        }

        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(TopicCommandError::TitleTooLong);
        }

        if body.trim().is_empty() {
            return Err(TopicCommandError::EmptyBody);
        }

        if author_id <= 0 {
            return Err(TopicCommandError::InvalidAuthorId);
        }

        if course_id <= 0 {
            return Err(TopicCommandError::InvalidCourseId);
        }

        Ok(Self {
            title,
            body,
            author_id: UserId::from(author_id),
            course_id: CourseId::from(course_id),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn course_id(&self) -> CourseId {
        self.course_id
    }
}
