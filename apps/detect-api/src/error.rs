//! Error types for the Detect API.
//!
//! Maps the core's typed errors onto HTTP status codes and the uniform
//! response envelope. Client input faults become 400s; anything unexpected
//! becomes a generic 500 that leaks no internal state.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use cardlink_core::CoreError;

use crate::envelope::ApiResponse;

/// Detect API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request itself is at fault (missing field, invalid signal).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An unexpected fault during classification.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            // Validation failures originate from request-supplied signals.
            CoreError::Validation(e) => ApiError::InvalidRequest(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::InvalidRequest(detail) => (
                StatusCode::BAD_REQUEST,
                detail,
                "Request rejected".to_string(),
            ),
            ApiError::Internal(detail) => {
                // Log the detail, report a generic description.
                error!(detail = %detail, "Internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "Detection failed".to_string(),
                )
            }
        };

        let body: ApiResponse<()> = ApiResponse::err(error, message);
        (status, Json(body)).into_response()
    }
}
