use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::UserQuery;
use crate::course::application::domain::entities::CourseId;
use crate::course::application::ports::outgoing::CourseQuery;
use crate::topic::application::domain::entities::ReferenceKind;

/// Display names of a topic's author and course.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ResolvedReferences {
    pub author_name: String,
    pub course_name: String,
}

#[derive(Debug, Clone)]
pub(super) enum ReferenceError {
    Missing(ReferenceKind),
    Lookup(String),
}

/// Author is resolved before course, so a request with both ids unknown
/// reports the author.
pub(super) async fn resolve_references<U, C>(
    users: &U,
    courses: &C,
    author_id: UserId,
    course_id: CourseId,
) -> Result<ResolvedReferences, ReferenceError>
where
    U: UserQuery + ?Sized,
    C: CourseQuery + ?Sized,
{
    let author = users
        .find_by_id(author_id)
        .await
        .map_err(|e| ReferenceError::Lookup(e.to_string()))?
        .ok_or(ReferenceError::Missing(ReferenceKind::Author))?;

    let course = courses
        .find_by_id(course_id)
        .await
        .map_err(|e| ReferenceError::Lookup(e.to_string()))?
        .ok_or(ReferenceError::Missing(ReferenceKind::Course))?;

    Ok(ResolvedReferences {
        author_name: author.name,
        course_name: course.name,
    })
}
