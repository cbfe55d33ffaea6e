use actix_web::{post, web, Responder};
use tracing::{error, info, warn};

use super::dto::{
    command_error, duplicate_topic, reference_not_found, TopicRequestDto, TopicResponse,
};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::topic::application::ports::incoming::use_cases::CreateTopicError;
use crate::AppState;

/// Create a topic
///
/// Rejects a topic whose title and body both match an existing one.
#[utoipa::path(
    post,
    path = "/topicos",
    tag = "topics",
    request_body = TopicRequestDto,
    security(("BearerAuth" = [])),
    responses(
        (status = 201, description = "Topic created", body = inline(SuccessResponse<TopicResponse>)),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (
            status = 404,
            description = "Author or course does not exist",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "COURSE_NOT_FOUND", "message": "Course not found" }
            })
        ),
        (
            status = 409,
            description = "Duplicate topic",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "DUPLICATE_TOPIC",
                    "message": "A topic with the same title and body already exists"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/topicos")]
pub async fn create_topic_handler(
    user: AuthenticatedUser,
    payload: web::Json<TopicRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let command = match payload.into_inner().into_command() {
        Ok(cmd) => cmd,
        Err(e) => {
            warn!(error = %e, "Topic creation rejected: invalid input");
            return command_error(e);
        }
    };

    match data.topic.create.execute(command).await {
        Ok(topic) => {
            info!(topic_id = %topic.id, caller = %user.user_id, "Topic created");
            ApiResponse::created(TopicResponse::from(topic))
        }

        Err(CreateTopicError::DuplicateTopic) => duplicate_topic(),

        Err(CreateTopicError::ReferenceNotFound(kind)) => reference_not_found(kind),

        Err(CreateTopicError::RepositoryError(e)) => {
            error!(error = %e, "Repository error creating topic");
            ApiResponse::internal_error()
        }
    }
}
