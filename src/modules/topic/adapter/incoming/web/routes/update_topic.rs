use actix_web::{put, web, Responder};
use tracing::{error, info, warn};

use super::dto::{
    command_error, duplicate_topic, reference_not_found, topic_not_found, TopicRequestDto,
    TopicResponse,
};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::topic::application::domain::entities::TopicId;
use crate::topic::application::ports::incoming::use_cases::UpdateTopicError;
use crate::AppState;

/// Replace a topic
///
/// Title, body, author and course are replaced. Creation date and status are kept.
#[utoipa::path(
    put,
    path = "/topicos/{id}",
    tag = "topics",
    params(("id" = i64, Path, description = "Topic id")),
    request_body = TopicRequestDto,
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Topic updated", body = inline(SuccessResponse<TopicResponse>)),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Topic, author or course not found", body = ErrorResponse),
        (status = 409, description = "Another topic has the same title and body", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/topicos/{id}")]
pub async fn update_topic_handler(
    user: AuthenticatedUser,
    path: web::Path<i64>,
    payload: web::Json<TopicRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = TopicId::from(path.into_inner());

    let command = match payload.into_inner().into_command() {
        Ok(cmd) => cmd,
        Err(e) => {
            warn!(topic_id = %id, error = %e, "Topic update rejected: invalid input");
            return command_error(e);
        }
    };

    match data.topic.update.execute(id, command).await {
        Ok(topic) => {
            info!(topic_id = %id, caller = %user.user_id, "Topic updated");
            ApiResponse::success(TopicResponse::from(topic))
        }

        Err(UpdateTopicError::NotFound) => topic_not_found(),

        Err(UpdateTopicError::DuplicateTopic) => duplicate_topic(),

        Err(UpdateTopicError::ReferenceNotFound(kind)) => reference_not_found(kind),

        Err(UpdateTopicError::RepositoryError(e)) => {
            error!(topic_id = %id, error = %e, "Repository error updating topic");
            ApiResponse::internal_error()
        }
    }
}
