use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::register_user::{RegisterUserError, RegisterUserRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Request body for user registration
#[derive(Deserialize, ToSchema)]
pub struct RegisterUserRequestDto {
    /// Display name
    #[serde(rename = "nombre", alias = "name")]
    #[schema(example = "Ana Torres")]
    pub name: String,

    /// Email address, used as the login identifier
    #[serde(rename = "correoElectronico", alias = "email")]
    #[schema(example = "ana@example.com")]
    pub email: String,

    /// Password
    #[serde(rename = "contrasena", alias = "password")]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

/// User registration
///
/// Creates an account. The response body is empty on success.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterUserRequestDto,
    responses(
        (status = 200, description = "User registered"),
        (
            status = 400,
            description = "Email already registered or invalid input",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "EMAIL_ALREADY_REGISTERED",
                    "message": "Email is already registered"
                }
            })
        ),
        (
            status = 500,
            description = "Internal server error",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INTERNAL_ERROR",
                    "message": "An unexpected error occurred"
                }
            })
        ),
    )
)]
#[post("/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match RegisterUserRequest::new(dto.name, dto.email, dto.password) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Invalid registration input");
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    let email = request.email().to_string();

    match data.register_user_use_case.execute(request).await {
        Ok(user_id) => {
            info!(user_id = %user_id, email = %email, "User registered");
            ApiResponse::ok_empty()
        }

        Err(RegisterUserError::EmailAlreadyRegistered) => {
            warn!(email = %email, "Registration rejected: email already registered");
            ApiResponse::bad_request("EMAIL_ALREADY_REGISTERED", "Email is already registered")
        }

        Err(e @ RegisterUserError::HashingFailed(_))
        | Err(e @ RegisterUserError::RepositoryError(_)) => {
            error!(email = %email, error = %e, "User registration failed");
            ApiResponse::internal_error()
        }
    }
}
