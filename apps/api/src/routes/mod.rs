pub mod health;
pub mod ui;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Result<Router> {
    let body_limit = state.config.body_limit()?;

    let router = Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        // Interview API
        .route("/api/v1/interviews", post(handlers::handle_create_interview))
        .route(
            "/api/v1/interviews/:id",
            get(handlers::handle_get_interview).delete(handlers::handle_end_interview),
        )
        .route(
            "/api/v1/interviews/:id/resume",
            post(handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/interviews/:id/answers",
            post(handlers::handle_submit_answer),
        )
        .route(
            "/api/v1/interviews/:id/feedback",
            post(handlers::handle_request_feedback),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    Ok(router)
}
