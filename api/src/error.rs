use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use feastly_service::ServiceError;
use serde_json::json;

/// Everything a handler can fail with, rendered as `{"error": ...}` with the
/// status code the failure class maps to.
#[derive(Debug)]
pub enum ApiError {
    /// Missing, malformed or unknown bearer token.
    Unauthorized(&'static str),
    Service(ServiceError),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.to_owned()),
            ApiError::Service(ServiceError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Service(ServiceError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg),
            ApiError::Service(ServiceError::PermissionDenied(msg)) => (StatusCode::FORBIDDEN, msg),
            // The gateway's reason is already in the logs; clients get a
            // fixed line.
            ApiError::Service(ServiceError::PaymentInitiation(_)) => (
                StatusCode::BAD_REQUEST,
                "Payment initiation failed".to_owned(),
            ),
            ApiError::Service(ServiceError::Db(err)) => {
                tracing::error!(error = %err, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
