//! Axum route handlers for the Interview API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::ingest::{extract_text, DocumentFormat};
use crate::interview::models::{SessionId, SessionView};
use crate::interview::service::{open_interview, request_feedback, submit_answer};
use crate::interview::store::SessionHandle;
use crate::state::AppState;

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub answer: String,
}

struct ResumeUpload {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Bytes,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interviews
pub async fn handle_create_interview(
    State(state): State<AppState>,
) -> (StatusCode, Json<SessionView>) {
    let (_, handle) = state.sessions.create();
    let view = handle.lock().await.view();
    (StatusCode::CREATED, Json(view))
}

/// GET /api/v1/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionView>, AppError> {
    let handle = lookup(&state, id)?;
    let mut session = handle.lock().await;
    session.touch();
    Ok(Json(session.view()))
}

/// DELETE /api/v1/interviews/:id
///
/// Discards the session; the browser starts over with a new one.
pub async fn handle_end_interview(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// POST /api/v1/interviews/:id/resume
///
/// Extracts the uploaded resume and asks the model for the opening question.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    mut multipart: Multipart,
) -> Result<Json<SessionView>, AppError> {
    let handle = lookup(&state, id)?;
    let upload = read_resume_field(&mut multipart, state.config.max_upload_bytes).await?;
    let format = DocumentFormat::detect(upload.file_name.as_deref(), upload.content_type.as_deref())?;

    let mut session = handle.lock().await;
    session.ensure_empty()?;

    let bytes = upload.bytes;
    let resume = tokio::task::spawn_blocking(move || extract_text(&bytes, format))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("resume extraction task failed: {e}")))??;

    open_interview(state.model.as_ref(), &mut session, resume).await?;
    Ok(Json(session.view()))
}

/// POST /api/v1/interviews/:id/answers
pub async fn handle_submit_answer(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<SessionView>, AppError> {
    let handle = lookup(&state, id)?;
    let mut session = handle.lock().await;
    submit_answer(state.model.as_ref(), &mut session, &request.answer).await?;
    Ok(Json(session.view()))
}

/// POST /api/v1/interviews/:id/feedback
///
/// Ends the interview. Repeated calls return the same report.
pub async fn handle_request_feedback(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Json<SessionView>, AppError> {
    let handle = lookup(&state, id)?;
    let mut session = handle.lock().await;
    request_feedback(state.model.as_ref(), &mut session).await?;
    Ok(Json(session.view()))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn lookup(state: &AppState, id: SessionId) -> Result<SessionHandle, AppError> {
    state.sessions.get(id).ok_or_else(|| not_found(id))
}

fn not_found(id: SessionId) -> AppError {
    AppError::NotFound(format!("Interview session {id} not found"))
}

async fn read_resume_field(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<ResumeUpload, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        if bytes.len() > max_bytes {
            return Err(AppError::Validation(format!(
                "File size exceeds the {} MB limit",
                max_bytes / (1024 * 1024)
            )));
        }

        return Ok(ResumeUpload {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(format!(
        "Missing '{RESUME_FIELD}' file field"
    )))
}
