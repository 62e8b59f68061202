use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::models::FieldViolation;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },
    #[error("database error")]
    Database(#[from] mongodb::error::Error),
    #[error("storage error: {0}")]
    Storage(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<FieldViolation>,
}

impl AppError {
    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        Self::Validation(violations)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Syntax and shape errors are both client errors on the body; only the
        // content-type rejection keeps its own status.
        let status = match &rejection {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::UNPROCESSABLE_ENTITY,
        };

        Self::InvalidBody {
            status,
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            Self::Validation(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "request validation failed".to_string(),
                violations,
            ),
            Self::InvalidBody { status, message } => (status, "invalid_body", message, Vec::new()),
            Self::Database(err) => {
                error!(error = %err, "database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "database operation failed".to_string(),
                    Vec::new(),
                )
            }
            Self::Storage(msg) => {
                error!(error = %msg, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg, Vec::new())
            }
        };

        (
            status,
            Json(ErrorBody {
                error: message,
                code,
                details,
            }),
        )
            .into_response()
    }
}
