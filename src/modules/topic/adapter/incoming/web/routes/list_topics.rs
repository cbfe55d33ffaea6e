use actix_web::{get, web, Responder};
use tracing::{error, warn};

use super::dto::{ListTopicsQuery, TopicResponse};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::shared::api::ApiResponse;
use crate::shared::pagination::{PageRequest, PageResult};
use crate::topic::application::ports::outgoing::{TopicListFilter, TopicSort};
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// GET /topicos
// ──────────────────────────────────────────────────────────
//

/// List topics
///
/// Oldest first by default. `curso` and `anio` narrow the listing and can be
/// combined.
#[utoipa::path(
    get,
    path = "/topicos",
    tag = "topics",
    params(ListTopicsQuery),
    responses(
        (status = 200, description = "Page of topics", body = inline(SuccessResponse<PageResult<TopicResponse>>)),
        (status = 400, description = "Malformed query", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/topicos")]
pub async fn list_topics_handler(
    query: web::Query<ListTopicsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();

    let sort = match query.sort.as_deref().map(TopicSort::parse).transpose() {
        Ok(sort) => sort.unwrap_or_default(),
        Err(e) => {
            warn!(error = %e, "Topic listing rejected: invalid sort");
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    let filter = TopicListFilter {
        course_name: query.curso.filter(|c| !c.is_empty()),
        year: query.anio,
    };
    let page = PageRequest::new(query.page, query.size);

    match data.topic.list.execute(filter, sort, page).await {
        Ok(result) => ApiResponse::success(result.map(TopicResponse::from)),
        Err(e) => {
            error!(error = %e, "Failed to list topics");
            ApiResponse::internal_error()
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// GET /topicos/primeros10
// ──────────────────────────────────────────────────────────
//

/// First ten topics, oldest first
#[utoipa::path(
    get,
    path = "/topicos/primeros10",
    tag = "topics",
    responses(
        (status = 200, description = "Up to ten topics", body = inline(SuccessResponse<Vec<TopicResponse>>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/topicos/primeros10")]
pub async fn list_first_topics_handler(data: web::Data<AppState>) -> impl Responder {
    match data.topic.list_first.execute().await {
        Ok(topics) => ApiResponse::success(
            topics
                .into_iter()
                .map(TopicResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => {
            error!(error = %e, "Failed to list first topics");
            ApiResponse::internal_error()
        }
    }
}
