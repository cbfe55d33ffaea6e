use serde::Serialize;
use utoipa::ToSchema;

/// Envelope of every 2xx JSON body: `{ "success": true, "data": ... }`.
///
/// Only used for documentation; handlers build the envelope through
/// `ApiResponse`.
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

/// Envelope of every non-2xx JSON body.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

/// Stable machine code plus a message safe to show to forum users.
///
/// Codes: `VALIDATION_ERROR`, `INVALID_CREDENTIALS`, `EMAIL_ALREADY_REGISTERED`,
/// `MISSING_AUTH_HEADER`, `INVALID_TOKEN`, `TOPIC_NOT_FOUND`, `AUTHOR_NOT_FOUND`, `COURSE_NOT_FOUND`,
/// `DUPLICATE_TOPIC`, `INTERNAL_ERROR`.
#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    #[schema(example = "DUPLICATE_TOPIC")]
    pub code: String,

    #[schema(example = "A topic with the same title and body already exists")]
    pub message: String,
}
