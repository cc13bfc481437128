use axum::{
    http::{header::RETRY_AFTER, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;
use crate::validation::FieldError;

/// Everything that can go wrong in the intake pipeline. Each variant is
/// produced by exactly one component and converted to an HTTP response
/// here, at the boundary.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Malformed request: wrong content type or unparsable JSON.
    #[error("invalid request format: {0}")]
    Format(String),

    /// One or more field constraints violated; carries every failure.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Origin exceeded its request quota for the current window.
    #[error("rate limit exceeded")]
    RateLimited { retry_after_secs: u64 },

    /// Storage unreachable or rejected the write. The cause is logged
    /// server-side; callers get a generic message.
    #[error("persistence failure")]
    Persistence(#[from] StoreError),
}

impl IntoResponse for IntakeError {
    fn into_response(self) -> Response {
        match self {
            IntakeError::Format(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            IntakeError::Validation(errors) => {
                let summary = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": summary, "details": errors })),
                )
                    .into_response()
            }
            IntakeError::RateLimited { retry_after_secs } => {
                let mut response = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({ "error": "Too many requests. Please try again later." })),
                )
                    .into_response();
                response.headers_mut().insert(
                    RETRY_AFTER,
                    HeaderValue::from_str(&retry_after_secs.to_string())
                        .unwrap_or_else(|_| HeaderValue::from_static("1")),
                );
                response
            }
            IntakeError::Persistence(err) => {
                tracing::error!(error = ?err, "submission persistence failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Something went wrong. Please try again." })),
                )
                    .into_response()
            }
        }
    }
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
