//! Error types for the stamp server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stamp_core::StampError;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid action at index {index}: {reason}")]
    InvalidAction { index: usize, reason: String },

    #[error("Could not read PDF: {0}")]
    InvalidPdf(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body: `error` always, `details` when there is more to say
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ServerError::InvalidAction { index, reason } => (
                StatusCode::BAD_REQUEST,
                "Invalid actions payload".to_string(),
                Some(vec![format!("action {}: {}", index, reason)]),
            ),
            ServerError::InvalidPdf(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Could not read PDF: {}", msg),
                None,
            ),
            ServerError::Internal(msg) => {
                // Internals are logged, not leaked to the client
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse { error, details };
        (status, Json(body)).into_response()
    }
}

impl From<StampError> for ServerError {
    fn from(err: StampError) -> Self {
        match err {
            StampError::Validation { index, reason } => ServerError::InvalidAction { index, reason },
            StampError::ParseError(msg) => ServerError::InvalidPdf(msg),
            StampError::SerializationError(msg) => ServerError::InvalidRequest(msg),
            other => ServerError::Internal(other.to_string()),
        }
    }
}
