use actix_web::{delete, web, Responder};
use tracing::{error, info};

use super::dto::topic_not_found;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::topic::application::domain::entities::TopicId;
use crate::topic::application::ports::incoming::use_cases::DeleteTopicError;
use crate::AppState;

/// Delete a topic
///
/// The row is removed permanently.
#[utoipa::path(
    delete,
    path = "/topicos/{id}",
    tag = "topics",
    params(("id" = i64, Path, description = "Topic id")),
    security(("BearerAuth" = [])),
    responses(
        (status = 204, description = "Topic deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Topic not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/topicos/{id}")]
pub async fn delete_topic_handler(
    user: AuthenticatedUser,
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = TopicId::from(path.into_inner());

    match data.topic.delete.execute(id).await {
        Ok(()) => {
            info!(topic_id = %id, caller = %user.user_id, "Topic deleted");
            ApiResponse::no_content()
        }

        Err(DeleteTopicError::NotFound) => topic_not_found(),

        Err(DeleteTopicError::RepositoryError(e)) => {
            error!(topic_id = %id, error = %e, "Repository error deleting topic");
            ApiResponse::internal_error()
        }
    }
}
