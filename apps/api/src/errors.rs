use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::reddit::RedditError;
use crate::tts::TtsError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Reddit error: {0}")]
    Reddit(#[from] RedditError),

    #[error("TTS error: {0}")]
    Tts(#[from] TtsError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Reddit(e) => {
                tracing::error!("Reddit error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "The content service is unavailable".to_string(),
                )
            }
            AppError::Tts(e) => {
                tracing::error!("TTS error: {e}");
                (
                    StatusCode::BAD_GATEWAY,
                    "TTS_ERROR",
                    "Speech generation failed".to_string(),
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

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Rejects `value` unless it lies within `min..=max`.
pub fn ensure_range(name: &str, value: u32, min: u32, max: u32) -> Result<u32, AppError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AppError::Validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )))
    }
}

const MAX_SUBREDDIT_CHARS: usize = 21;

/// Accepts only bare subreddit names (`[A-Za-z0-9_]{1,21}`), so a name can
/// never escape its `/r/` path on the upstream API.
pub fn validate_subreddit(name: &str) -> Result<&str, AppError> {
    let valid = !name.is_empty()
        && name.len() <= MAX_SUBREDDIT_CHARS
        && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    if valid {
        Ok(name)
    } else {
        Err(AppError::Validation(format!("Invalid subreddit name: {name:?}")))
    }
}
