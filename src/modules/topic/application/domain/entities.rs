use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(i64);

impl TopicId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for TopicId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<TopicId> for i64 {
    fn from(id: TopicId) -> Self {
        id.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ──────────────────────────────────────────────────────────
// Status
// ──────────────────────────────────────────────────────────
//

/// Every topic starts `OPEN`. No operation in this service moves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TopicStatus {
    #[default]
    Open,
    Closed,
    UnderReview,
}

impl TopicStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicStatus::Open => "OPEN",
            TopicStatus::Closed => "CLOSED",
            TopicStatus::UnderReview => "UNDER_REVIEW",
        }
    }
}

impl fmt::Display for TopicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown topic status: {0}")]
pub struct UnknownTopicStatus(pub String);

impl FromStr for TopicStatus {
    type Err = UnknownTopicStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OPEN" => Ok(TopicStatus::Open),
            "CLOSED" => Ok(TopicStatus::Closed),
            "UNDER_REVIEW" => Ok(TopicStatus::UnderReview),
            other => Err(UnknownTopicStatus(other.to_string())),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// References
// ──────────────────────────────────────────────────────────
//

/// Which foreign reference of a topic failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Author,
    Course,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Author => f.write_str("author"),
            ReferenceKind::Course => f.write_str("course"),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Projection
// ──────────────────────────────────────────────────────────
//

/// A topic with its author and course already resolved to names.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicView {
    pub id: TopicId,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub status: TopicStatus,
    pub author_name: String,
    pub course_name: String,
}
