use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::use_cases::login_user::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{post, web, Responder};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use utoipa::ToSchema;

/// Login request from client
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    /// Email address
    #[serde(rename = "correoElectronico", alias = "email")]
    #[schema(example = "ana@example.com")]
    pub email: String,

    /// Password
    #[serde(rename = "contrasena", alias = "password")]
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    token: String,

    /// Always `Bearer`
    #[schema(example = "Bearer")]
    token_type: String,

    /// Instant after which the token is rejected
    expires_at: DateTime<Utc>,
}

/// User login
///
/// Authenticates a user with email and password and returns a JWT access token.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (
            status = 200,
            description = "Login successful",
            body = inline(SuccessResponse<LoginResponse>),
            example = json!({
                "success": true,
                "data": {
                    "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
                    "tokenType": "Bearer",
                    "expiresAt": "2026-01-01T12:00:00Z"
                }
            })
        ),
        (
            status = 400,
            description = "Malformed email or blank password",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "VALIDATION_ERROR",
                    "message": "Invalid email format"
                }
            })
        ),
        (
            status = 401,
            description = "Invalid credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INVALID_CREDENTIALS",
                    "message": "Invalid email or password"
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
#[post("/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let use_case = &data.login_user_use_case;
    let dto = req.into_inner();

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(req) => req,
        Err(e) => {
            warn!(error = %e, "Login rejected: invalid input");
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    info!(email = %request.email(), "Login attempt");

    match use_case.execute(request).await {
        Ok(response) => {
            info!(user_id = %response.user_id, "User logged in successfully");

            ApiResponse::success(LoginResponse {
                token: response.access_token,
                token_type: "Bearer".to_string(),
                expires_at: response.expires_at,
            })
        }

        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: Invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        Err(LoginError::PasswordVerificationFailed(ref e)) => {
            error!(error = %e, "Password verification failed");
            ApiResponse::internal_error()
        }

        Err(LoginError::TokenGenerationFailed(ref e)) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }

        Err(LoginError::QueryError(ref e)) => {
            error!(error = %e, "Database query failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::auth::application::use_cases::login_user::{
        ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse,
    };
    use crate::shared::api::custom_json_config;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use serde_json::json;

    // ========================================================================
    // Mock Use Cases for Different Scenarios
    // ========================================================================

    #[derive(Clone)]
    struct MockLoginUserSuccess;

    #[async_trait]
    impl ILoginUserUseCase for MockLoginUserSuccess {
        async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
            assert_eq!(request.email(), "ana@example.com");
            Ok(LoginUserResponse {
                user_id: UserId::from(1),
                access_token: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.access".to_string(),
                expires_at: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
            })
        }
    }

    #[derive(Clone)]
    struct MockLoginUserFailing(LoginError);

    #[async_trait]
    impl ILoginUserUseCase for MockLoginUserFailing {
        async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
            Err(self.0.clone())
        }
    }

    async fn post_login(
        uc: impl ILoginUserUseCase + Send + Sync + 'static,
        payload: serde_json::Value,
    ) -> actix_web::dev::ServiceResponse {
        let app_state = TestAppStateBuilder::default().with_login_user(uc).build();
        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(custom_json_config())
                .service(login_user_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(&payload)
            .to_request();

        test::call_service(&app, req).await
    }

    // ========================================================================
    // Tests
    // ========================================================================

    #[actix_web::test]
    async fn test_login_success_with_wire_names() {
        let resp = post_login(
            MockLoginUserSuccess,
            json!({ "correoElectronico": "Ana@Example.com", "contrasena": "s3cret" }),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(
            body["data"]["token"],
            "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.access"
        );
        assert_eq!(body["data"]["tokenType"], "Bearer");
        assert_eq!(body["data"]["expiresAt"], "2030-01-01T00:00:00Z");
    }

    #[actix_web::test]
    async fn test_login_accepts_english_aliases() {
        let resp = post_login(
            MockLoginUserSuccess,
            json!({ "email": "ana@example.com", "password": "s3cret" }),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_login_invalid_credentials() {
        let resp = post_login(
            MockLoginUserFailing(LoginError::InvalidCredentials),
            json!({ "correoElectronico": "ana@example.com", "contrasena": "wrong" }),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
        assert_eq!(body["error"]["message"], "Invalid email or password");
    }

    #[actix_web::test]
    async fn test_login_malformed_email_is_validation_error() {
        let resp = post_login(
            MockLoginUserSuccess,
            json!({ "correoElectronico": "not-an-email", "contrasena": "s3cret" }),
        )
        .await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_login_missing_field_is_validation_error() {
        let resp = post_login(MockLoginUserSuccess, json!({ "correoElectronico": "ana@example.com" })).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_login_internal_failures_are_hidden() {
        for err in [
            LoginError::QueryError("db down".to_string()),
            LoginError::PasswordVerificationFailed("bad hash".to_string()),
            LoginError::TokenGenerationFailed("bad key".to_string()),
        ] {
            let resp = post_login(
                MockLoginUserFailing(err),
                json!({ "correoElectronico": "ana@example.com", "contrasena": "s3cret" }),
            )
            .await;

            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
        }
    }
}
