//! LLM Client: the single point of entry for generative-text API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//!
//! Each call walks `API_VERSIONS` × `MODELS` in order and returns the first
//! candidate text. There is no backoff or retry beyond that fallback list.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const API_VERSIONS: &[&str] = &["v1beta", "v1"];
/// Tried in order; the first model that answers wins.
pub const MODELS: &[&str] = &[
    "gemini-2.5-flash",
    "gemini-2.0-flash",
    "gemini-flash-latest",
    "gemini-2.5-pro",
];

const TEMPERATURE: f32 = 0.9;
const TOP_K: u32 = 40;
const TOP_P: f32 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 1024;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Please add your Gemini API key in Settings → API Configuration")]
    MissingApiKey,

    #[error("Invalid API key. Please verify your Gemini API key.")]
    InvalidApiKey,

    #[error("API quota exceeded. Please try again later or check your quota at https://aistudio.google.com/apikey")]
    QuotaExceeded,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("All API attempts failed. Please verify your API key. Last error: {0}")]
    AllModelsFailed(Box<LlmError>),
}

impl LlmError {
    /// Errors that make trying another model pointless.
    fn is_fatal(&self) -> bool {
        matches!(
            self,
            LlmError::MissingApiKey | LlmError::InvalidApiKey | LlmError::QuotaExceeded
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
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

impl LlmResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Anything that can turn a prompt into post text. `LlmClient` is the production
/// implementation; tests substitute canned generators.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, key_override: Option<&str>) -> Result<String, LlmError>;
}

/// The generative-text client shared by all handlers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(api_key: Option<String>, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: GEMINI_BASE_URL.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Generates text for `prompt`. `key_override` (a user-supplied key) wins over the
    /// configured key.
    pub async fn generate(&self, prompt: &str, key_override: Option<&str>) -> Result<String, LlmError> {
        let api_key = key_override
            .filter(|k| !k.trim().is_empty())
            .or(self.api_key.as_deref())
            .ok_or(LlmError::MissingApiKey)?;

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };

        let mut last_error: Option<LlmError> = None;

        for version in API_VERSIONS {
            for model in MODELS {
                match self.call_model(version, model, api_key, &body).await {
                    Ok(text) => {
                        info!("Generated content with {version}/{model}");
                        return Ok(text);
                    }
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        warn!("{version}/{model} failed: {e}");
                        last_error = Some(e);
                    }
                }
            }
        }

        Err(LlmError::AllModelsFailed(Box::new(
            last_error.unwrap_or(LlmError::EmptyContent),
        )))
    }

    async fn call_model(
        &self,
        version: &str,
        model: &str,
        api_key: &str,
        body: &GenerateContentRequest<'_>,
    ) -> Result<String, LlmError> {
        let url = format!("{}/{version}/models/{model}:generateContent", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &text));
        }

        let parsed: LlmResponse = response.json().await?;
        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        parsed
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn generate(&self, prompt: &str, key_override: Option<&str>) -> Result<String, LlmError> {
        LlmClient::generate(self, prompt, key_override).await
    }
}

/// Maps a failed response to a user-facing error.
fn classify_error(status: StatusCode, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<GeminiError>(body).ok();
    let api_status = parsed
        .as_ref()
        .and_then(|e| e.error.status.clone())
        .unwrap_or_default();
    let message = parsed.map(|e| e.error.message).unwrap_or_else(|| body.to_string());

    if status == StatusCode::TOO_MANY_REQUESTS
        || api_status == "RESOURCE_EXHAUSTED"
        || message.contains("quota")
    {
        return LlmError::QuotaExceeded;
    }

    if message.contains("API_KEY_INVALID") || message.contains("API key not valid") {
        return LlmError::InvalidApiKey;
    }

    LlmError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_extraction() {
        let json = r#"{
            "candidates": [{"content": {"parts": [{"text": "Strike!"}]}}],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 3}
        }"#;
        let r: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(r.text(), Some("Strike!"));
        assert_eq!(r.usage_metadata.unwrap().prompt_token_count, 12);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let r: LlmResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(r.text().is_none());
        let r: LlmResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#)
                .unwrap();
        assert!(r.text().is_none());
    }

    #[test]
    fn test_request_body_uses_camel_case() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: "hi" }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_k: TOP_K,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(v["generationConfig"]["topK"], 40);
        assert_eq!(v["contents"][0]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_classify_quota() {
        let body = r#"{"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert!(matches!(
            classify_error(StatusCode::TOO_MANY_REQUESTS, body),
            LlmError::QuotaExceeded
        ));
    }

    #[test]
    fn test_classify_invalid_key() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        let err = classify_error(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, LlmError::InvalidApiKey));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_classify_other_error_keeps_message() {
        let err = classify_error(StatusCode::NOT_FOUND, "model not found");
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "model not found");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_without_any_key_fails_fast() {
        let client = LlmClient::new(None, Duration::from_secs(1)).unwrap();
        let err = client.generate("prompt", None).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));

        let err = client.generate("prompt", Some("  ")).await.unwrap_err();
        assert!(matches!(err, LlmError::MissingApiKey));
    }
}
