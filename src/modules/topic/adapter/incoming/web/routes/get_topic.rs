use actix_web::{get, web, Responder};
use tracing::error;

use super::dto::{topic_not_found, TopicResponse};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::ApiResponse;
use crate::topic::application::domain::entities::TopicId;
use crate::topic::application::ports::incoming::use_cases::GetTopicError;
use crate::AppState;

/// Get a topic by id
#[utoipa::path(
    get,
    path = "/topicos/{id}",
    tag = "topics",
    params(("id" = i64, Path, description = "Topic id")),
    responses(
        (status = 200, description = "Topic found", body = inline(SuccessResponse<TopicResponse>)),
        (
            status = 404,
            description = "Topic not found",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "TOPIC_NOT_FOUND", "message": "Topic not found" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/topicos/{id}")]
pub async fn get_topic_handler(
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = TopicId::from(path.into_inner());

    match data.topic.get.execute(id).await {
        Ok(topic) => ApiResponse::success(TopicResponse::from(topic)),

        Err(GetTopicError::NotFound) => topic_not_found(),

        Err(GetTopicError::QueryFailed(e)) => {
            error!(topic_id = %id, error = %e, "Failed to fetch topic");
            ApiResponse::internal_error()
        }
    }
}
