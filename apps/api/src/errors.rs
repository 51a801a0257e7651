use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::dataset::RowError;
use crate::models::student::RecordError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A student row failed integrity checks; its scores are never guessed.
    #[error("Malformed record in row {row}: {source}")]
    MalformedRecord {
        row: usize,
        #[source]
        source: RecordError,
    },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<RowError> for AppError {
    fn from(err: RowError) -> Self {
        match err {
            err @ RowError::OutOfBounds { .. } => AppError::NotFound(err.to_string()),
            RowError::Malformed { row, source } => AppError::MalformedRecord { row, source },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::MalformedRecord { row, source } => {
                tracing::warn!("Malformed record in row {row}: {source}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "MALFORMED_RECORD",
                    format!("row {row} is malformed: {source}"),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
