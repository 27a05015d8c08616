mod config;
mod errors;
mod ingest;
mod interview;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::store::SessionStore;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interviewer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.gemini_api_key.clone(), config.model.clone())?;
    if !llm.has_api_key() {
        warn!("GEMINI_API_KEY is not set; interview actions will fail until it is configured");
    }
    info!("LLM client initialized (model: {})", config.model.model);

    let sessions = SessionStore::new(config.session_ttl());
    info!(
        "Session store initialized (idle ttl: {} min, max upload: {} bytes)",
        config.session_ttl_minutes, config.max_upload_bytes
    );

    // Build app state
    let state = AppState {
        sessions,
        model: Arc::new(llm),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)?
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
