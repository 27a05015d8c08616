/// LLM Client — the single point of entry for all Gemini API calls.
///
/// No other module may call the Gemini API directly. Orchestration code talks to
/// the `InterviewModel` trait so it can run against a scripted model in tests.
///
/// Failures are surfaced to the caller as-is: there is no retry or backoff here,
/// the user re-attempts the action.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM authentication failed: {0}")]
    AuthenticationFailure(String),

    #[error("LLM rate limit reached: {0}")]
    RateLimited(String),

    #[error("LLM upstream error: {0}")]
    UpstreamError(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::UpstreamError(e.to_string())
    }
}

/// Which hosted model to call and how to sample it.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model: String,
    /// Cap on response size, in output tokens. `None` leaves the API default.
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Anything that can turn a prompt into interviewer text.
///
/// Carried in `AppState` as `Arc<dyn InterviewModel>`.
#[async_trait]
pub trait InterviewModel: Send + Sync {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError>;

    /// Model identifier, for logs.
    fn model_name(&self) -> &str;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "GenerationConfig::is_empty")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl GenerationConfig {
    fn is_empty(&self) -> bool {
        self.max_output_tokens.is_none() && self.temperature.is_none()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    config: ModelConfig,
}

impl LlmClient {
    pub fn new(api_key: Option<String>, config: ModelConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            config,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Makes a single call to the API, returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<GenerateContentResponse, LlmError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            LlmError::AuthenticationFailure("GEMINI_API_KEY is not configured".to_string())
        })?;

        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: self.config.max_output_tokens,
                temperature: self.config.temperature,
            },
        };

        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.config.model);
        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}", status);
            return Err(classify_failure(status, &body));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::UpstreamError(format!("unreadable response: {e}")))?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl InterviewModel for LlmClient {
    async fn generate(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let response = self.call(prompt, system).await?;
        response.text().ok_or_else(|| {
            let reason = response
                .prompt_feedback
                .as_ref()
                .and_then(|f| f.block_reason.clone())
                .or_else(|| {
                    response
                        .candidates
                        .first()
                        .and_then(|c| c.finish_reason.clone())
                })
                .unwrap_or_else(|| "no candidates".to_string());
            LlmError::UpstreamError(format!("model returned no text ({reason})"))
        })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Maps a non-success HTTP status to the error taxonomy.
///
/// Gemini answers an invalid key with 400 `INVALID_ARGUMENT`, so the error body
/// is inspected as well as the status.
fn classify_failure(status: StatusCode, body: &str) -> LlmError {
    let (message, api_status) = serde_json::from_str::<GeminiError>(body)
        .map(|e| (e.error.message, e.error.status))
        .unwrap_or_else(|_| (body.to_string(), String::new()));
    let message = if message.is_empty() {
        status.to_string()
    } else {
        message
    };

    let bad_key = message.contains("API key") || message.contains("API_KEY_INVALID");
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::AuthenticationFailure(message),
        StatusCode::BAD_REQUEST if bad_key => LlmError::AuthenticationFailure(message),
        StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(message),
        _ if api_status == "RESOURCE_EXHAUSTED" => LlmError::RateLimited(message),
        _ => LlmError::UpstreamError(message),
    }
}
