use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::ingest::IngestError;
use crate::interview::models::SessionError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant is scoped to the action that raised it; session state never advances.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Extraction failure: {0}")]
    ExtractionFailure(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<IngestError> for AppError {
    fn from(e: IngestError) -> Self {
        match e {
            IngestError::UnsupportedFormat(_) => AppError::UnsupportedFormat(e.to_string()),
            IngestError::ExtractionFailure(_) => AppError::ExtractionFailure(e.to_string()),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::EmptyAnswer => AppError::Validation(e.to_string()),
            _ => AppError::Conflict(e.to_string()),
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Invalid upload: {}", e.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "INVALID_PHASE", msg.clone()),
            AppError::UnsupportedFormat(msg) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                msg.clone(),
            ),
            AppError::ExtractionFailure(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EXTRACTION_FAILURE",
                msg.clone(),
            ),
            AppError::Llm(LlmError::AuthenticationFailure(msg)) => {
                tracing::error!("LLM authentication failure: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_AUTHENTICATION_FAILURE",
                    "The AI interviewer is unavailable: the API key is missing or invalid."
                        .to_string(),
                )
            }
            AppError::Llm(LlmError::RateLimited(msg)) => {
                tracing::warn!("LLM rate limited: {msg}");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "LLM_RATE_LIMITED",
                    "The AI service is busy right now. Please wait a moment and try again."
                        .to_string(),
                )
            }
            AppError::Llm(LlmError::UpstreamError(msg)) => {
                tracing::error!("LLM upstream error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_UPSTREAM_ERROR",
                    "The AI service did not respond properly. Please try again.".to_string(),
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
