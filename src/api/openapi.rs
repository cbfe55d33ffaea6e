use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::{
    LoginRequestDto, LoginResponse, RegisterUserRequestDto,
};
use crate::shared::pagination::PageResult;
use crate::topic::adapter::incoming::web::routes::{TopicRequestDto, TopicResponse};
use crate::topic::application::domain::entities::TopicStatus;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course Forum API",
        version = "1.0.0",
        description = "Topics posted by registered users about the courses they follow"
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::login_user_handler,
        crate::auth::adapter::incoming::web::routes::register_user_handler,

        // Topic endpoints
        crate::topic::adapter::incoming::web::routes::create_topic_handler,
        crate::topic::adapter::incoming::web::routes::list_topics_handler,
        crate::topic::adapter::incoming::web::routes::list_first_topics_handler,
        crate::topic::adapter::incoming::web::routes::get_topic_handler,
        crate::topic::adapter::incoming::web::routes::update_topic_handler,
        crate::topic::adapter::incoming::web::routes::delete_topic_handler,
    ),
    components(
        schemas(
            // Response wrappers
            ErrorResponse,
            ErrorDetail,
            PageResult<TopicResponse>,

            // Auth DTOs
            LoginRequestDto,
            LoginResponse,
            RegisterUserRequestDto,

            // Topic DTOs
            TopicRequestDto,
            TopicResponse,
            TopicStatus,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Authentication endpoints"),
        (name = "topics", description = "Forum topic endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by POST /auth/login"))
                        .build(),
                ),
            )
        }
    }
}
