use std::sync::Arc;

use crate::config::Config;
use crate::interview::store::SessionStore;
use crate::llm_client::InterviewModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    /// Pluggable model. Default: the Gemini `LlmClient`.
    pub model: Arc<dyn InterviewModel>,
    pub config: Config,
}
