use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::llm_client::ModelConfig;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;
/// One week.
const MAX_SESSION_TTL_MINUTES: i64 = 7 * 24 * 60;
/// Room for multipart framing around the largest accepted file.
pub const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Application configuration loaded from environment variables.
///
/// The API key is optional at startup: without it the server runs, and every
/// interview action reports an authentication failure.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub model: ModelConfig,
    pub port: u16,
    pub rust_log: String,
    pub max_upload_bytes: usize,
    pub session_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            model: ModelConfig {
                model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_output_tokens: parse_env("LLM_MAX_OUTPUT_TOKENS", optional_env("LLM_MAX_OUTPUT_TOKENS"))?,
                temperature: parse_env("LLM_TEMPERATURE", optional_env("LLM_TEMPERATURE"))?,
            },
            port: parse_env("PORT", optional_env("PORT"))?.unwrap_or(8080),
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_upload_bytes: check_upload_limit(
                parse_env("MAX_UPLOAD_BYTES", optional_env("MAX_UPLOAD_BYTES"))?
                    .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            )?,
            session_ttl_minutes: check_session_ttl(
                parse_env("SESSION_TTL_MINUTES", optional_env("SESSION_TTL_MINUTES"))?
                    .unwrap_or(DEFAULT_SESSION_TTL_MINUTES),
            )?,
        })
    }

    /// Request body cap for the router: the upload limit plus multipart framing.
    pub fn body_limit(&self) -> Result<usize> {
        self.max_upload_bytes
            .checked_add(MULTIPART_OVERHEAD)
            .context("MAX_UPLOAD_BYTES is too large")
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.session_ttl_minutes)
    }
}

fn check_upload_limit(bytes: usize) -> Result<usize> {
    if bytes == 0 {
        bail!("Environment variable 'MAX_UPLOAD_BYTES' must be greater than zero");
    }
    if bytes.checked_add(MULTIPART_OVERHEAD).is_none() {
        bail!("Environment variable 'MAX_UPLOAD_BYTES' is too large: {bytes}");
    }
    Ok(bytes)
}

/// Accepts 1 minute up to one week.
fn check_session_ttl(minutes: i64) -> Result<i64> {
    if !(1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) {
        bail!(
            "Environment variable 'SESSION_TTL_MINUTES' must be between 1 and {MAX_SESSION_TTL_MINUTES}, got {minutes}"
        );
    }
    Ok(minutes)
}

/// Reads a variable, treating blank values as unset.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, raw: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.map(|v| {
        v.trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: '{v}'"))
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_unset_is_none() {
        let parsed: Option<u16> = parse_env("PORT", None).unwrap();
        assert_eq!(parsed, None);
    }

    #[test]
    fn test_parse_env_trims_value() {
        let parsed: Option<u32> = parse_env("LLM_MAX_OUTPUT_TOKENS", Some(" 2048 ".to_string())).unwrap();
        assert_eq!(parsed, Some(2048));
        let parsed: Option<f32> = parse_env("LLM_TEMPERATURE", Some("0.7".to_string())).unwrap();
        assert_eq!(parsed, Some(0.7));
    }

    #[test]
    fn test_session_ttl_must_be_positive_and_bounded() {
        assert_eq!(check_session_ttl(60).unwrap(), 60);
        assert_eq!(check_session_ttl(MAX_SESSION_TTL_MINUTES).unwrap(), MAX_SESSION_TTL_MINUTES);
        for bad in [0, -5, MAX_SESSION_TTL_MINUTES + 1, i64::MAX] {
            let err = check_session_ttl(bad).unwrap_err();
            assert!(err.to_string().contains("SESSION_TTL_MINUTES"), "{bad}: {err}");
        }
    }

    #[test]
    fn test_upload_limit_rejects_zero_and_overflow() {
        assert_eq!(check_upload_limit(1024).unwrap(), 1024);
        assert!(check_upload_limit(0).is_err());
        assert!(check_upload_limit(usize::MAX).is_err());
        assert!(check_upload_limit(usize::MAX - MULTIPART_OVERHEAD).is_ok());
    }

    #[test]
    fn test_body_limit_adds_multipart_overhead() {
        let mut config = Config {
            gemini_api_key: None,
            model: ModelConfig {
                model: DEFAULT_MODEL.to_string(),
                max_output_tokens: None,
                temperature: None,
            },
            port: 8080,
            rust_log: "info".to_string(),
            max_upload_bytes: 1024,
            session_ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
        };
        assert_eq!(config.body_limit().unwrap(), 1024 + MULTIPART_OVERHEAD);
        assert_eq!(config.session_ttl(), chrono::Duration::minutes(60));

        config.max_upload_bytes = usize::MAX;
        assert!(config.body_limit().is_err());
    }

    #[test]
    fn test_parse_env_reports_key_on_error() {
        let err = parse_env::<u16>("PORT", Some("eighty".to_string())).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }
}
