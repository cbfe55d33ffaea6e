use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::api::ApiResponse;
use crate::topic::application::domain::entities::{ReferenceKind, TopicStatus, TopicView};
use crate::topic::application::ports::incoming::use_cases::{TopicCommand, TopicCommandError};

//
// ──────────────────────────────────────────────────────────
// Request DTOs
// ──────────────────────────────────────────────────────────
//

/// Body of create and update requests
#[derive(Debug, Deserialize, ToSchema)]
pub struct TopicRequestDto {
    #[serde(rename = "titulo", alias = "title")]
    #[schema(example = "How do lifetimes work?")]
    pub title: String,

    #[serde(rename = "mensaje", alias = "body")]
    #[schema(example = "I keep fighting the borrow checker in chapter 4.")]
    pub body: String,

    #[serde(rename = "autorId", alias = "authorId")]
    #[schema(example = 1)]
    pub author_id: i64,

    #[serde(rename = "cursoId", alias = "courseId")]
    #[schema(example = 1)]
    pub course_id: i64,
}

impl TopicRequestDto {
    pub fn into_command(self) -> Result<TopicCommand, TopicCommandError> {
        TopicCommand::new(self.title, self.body, self.author_id, self.course_id)
    }
}

/// Query string of `GET /topicos`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListTopicsQuery {
    /// Substring the course name must contain (case-sensitive)
    #[serde(alias = "course")]
    pub curso: Option<String>,

    /// Calendar year of creation, UTC
    #[serde(alias = "year")]
    pub anio: Option<i32>,

    /// Zero-based page number
    pub page: Option<u64>,

    /// Page size, 1 to 100
    #[serde(alias = "per_page")]
    pub size: Option<u64>,

    /// `createdAt`, `title` or `id`, optionally followed by `,asc` or `,desc`
    pub sort: Option<String>,
}

//
// ──────────────────────────────────────────────────────────
// Response DTO
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize, ToSchema)]
pub struct TopicResponse {
    #[schema(example = 1)]
    pub id: i64,

    #[serde(rename = "titulo")]
    #[schema(example = "How do lifetimes work?")]
    pub title: String,

    #[serde(rename = "mensaje")]
    #[schema(example = "I keep fighting the borrow checker in chapter 4.")]
    pub body: String,

    #[serde(rename = "fechaCreacion")]
    pub created_at: DateTime<Utc>,

    pub status: TopicStatus,

    #[serde(rename = "autorNombre")]
    #[schema(example = "Ana Torres")]
    pub author_name: String,

    #[serde(rename = "cursoNombre")]
    #[schema(example = "Rust from Scratch")]
    pub course_name: String,
}

impl From<TopicView> for TopicResponse {
    fn from(view: TopicView) -> Self {
        Self {
            id: view.id.value(),
            title: view.title,
            body: view.body,
            created_at: view.created_at,
            status: view.status,
            author_name: view.author_name,
            course_name: view.course_name,
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Error Mapping
// ──────────────────────────────────────────────────────────
//

pub(super) fn command_error(err: TopicCommandError) -> HttpResponse {
    ApiResponse::bad_request("VALIDATION_ERROR", &err.to_string())
}

pub(super) fn reference_not_found(kind: ReferenceKind) -> HttpResponse {
    match kind {
        ReferenceKind::Author => ApiResponse::not_found("AUTHOR_NOT_FOUND", "Author not found"),
        ReferenceKind::Course => ApiResponse::not_found("COURSE_NOT_FOUND", "Course not found"),
    }
}

pub(super) fn duplicate_topic() -> HttpResponse {
    ApiResponse::conflict(
        "DUPLICATE_TOPIC",
        "A topic with the same title and body already exists",
    )
}

pub(super) fn topic_not_found() -> HttpResponse {
    ApiResponse::not_found("TOPIC_NOT_FOUND", "Topic not found")
}
