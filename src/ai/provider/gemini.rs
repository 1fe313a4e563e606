//! Google Gemini Provider
//!
//! LLM provider using the Generative Language API (`models/{model}:generateContent`).
//! Returns LlmResponse with token usage from `usageMetadata`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use super::{
    ErrorCategory, ErrorClassifier, LlmError, LlmProvider, LlmResponse, ProviderConfig,
    ResponseMetadata, ResponseTiming, TokenUsage, build_http_client, error_from_response,
    normalize_api_base, resolve_api_key,
};
use crate::types::{DocsmithError, Result};

const PROVIDER: &str = "gemini";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const API_KEY_ENV: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Gemini provider with secure API key handling
pub struct GeminiProvider {
    api_key: SecretString,
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self> {
        let client = build_http_client(config.timeout_secs)?;
        Self::with_client(config, client)
    }

    pub(crate) fn with_client(config: ProviderConfig, client: reqwest::Client) -> Result<Self> {
        let api_key = resolve_api_key(config.api_key, API_KEY_ENV).ok_or_else(|| {
            DocsmithError::Config(
                "Gemini API key not found. Set GEMINI_API_KEY env var or llm.api_key in config"
                    .to_string(),
            )
        })?;

        let api_base = normalize_api_base(
            config.api_base.as_deref().unwrap_or(DEFAULT_API_BASE),
            PROVIDER,
        )?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            api_base,
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    fn build_request(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: self.max_tokens,
            },
        }
    }
}

/// Concatenate the text parts of the first candidate
fn extract_text(body: &GenerateContentResponse) -> std::result::Result<String, LlmError> {
    let text: String = body
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect()
        })
        .unwrap_or_default();

    if !text.is_empty() {
        return Ok(text);
    }

    if let Some(reason) = body
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(LlmError::with_provider(
            ErrorCategory::BadRequest,
            format!("Prompt blocked: {}", reason),
            PROVIDER,
        ));
    }

    let finish = body
        .candidates
        .first()
        .and_then(|c| c.finish_reason.as_deref())
        .unwrap_or("none");
    Err(LlmError::with_provider(
        ErrorCategory::ParseError,
        format!("No content in Gemini response (finish reason: {})", finish),
        PROVIDER,
    ))
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> Result<LlmResponse> {
        info!(
            "Generating with Gemini (model: {}, temperature: {})",
            self.model, self.temperature
        );

        let start_time = Instant::now();
        let request = self.build_request(prompt);
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ErrorClassifier::classify_transport(&e, PROVIDER))?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            return Err(error_from_response(response, PROVIDER).await.into());
        }

        let body: GenerateContentResponse = response.json().await.map_err(|e| {
            LlmError::with_provider(
                ErrorCategory::ParseError,
                format!("Failed to parse Gemini response: {}", e),
                PROVIDER,
            )
        })?;

        let usage = body
            .usage_metadata
            .as_ref()
            .map(|u| TokenUsage::new(u.prompt_token_count, u.candidates_token_count))
            .unwrap_or_default();

        let content = extract_text(&body)?;
        debug!(
            "Received {} chars from Gemini ({} tokens)",
            content.len(),
            usage.total()
        );

        Ok(LlmResponse::with_metrics(
            content,
            usage,
            ResponseTiming::from_duration(elapsed),
            ResponseMetadata {
                model: self.model.clone(),
                provider: PROVIDER.to_string(),
            },
        ))
    }

    fn name(&self) -> &str {
        PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{direct_client, serve_once};
    use super::*;

    fn config(api_base: Option<String>) -> ProviderConfig {
        ProviderConfig {
            provider: PROVIDER.to_string(),
            api_key: Some("test-key".to_string()),
            api_base,
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_and_redaction() {
        let provider = GeminiProvider::new(config(None)).unwrap();
        assert_eq!(provider.api_base, DEFAULT_API_BASE);
        assert_eq!(provider.model, DEFAULT_MODEL);
        assert!(!format!("{:?}", provider).contains("test-key"));
    }

    #[test]
    fn test_request_shape() {
        let provider = GeminiProvider::new(config(None)).unwrap();
        let value = serde_json::to_value(provider.build_request("hello")).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Core "},{"text":"functionality"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&body).unwrap(), "Core functionality");
    }

    #[test]
    fn test_extract_text_blocked_prompt() {
        let body: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        let err = extract_text(&body).unwrap_err();
        assert_eq!(err.category, ErrorCategory::BadRequest);
        assert!(err.message.contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_generate_against_local_server() {
        let (base, handle) = serve_once(
            200,
            r#"{"candidates":[{"content":{"parts":[{"text":"Parses config files."}]}}],"usageMetadata":{"promptTokenCount":12,"candidatesTokenCount":4}}"#,
        )
        .await;

        let provider = GeminiProvider::with_client(config(Some(base)), direct_client()).unwrap();
        let response = provider.generate("Analyze this").await.unwrap();

        assert_eq!(response.content, "Parses config files.");
        assert_eq!(response.usage.total(), 16);
        assert_eq!(response.metadata.provider, "gemini");

        let request = handle.await.unwrap();
        assert!(request.starts_with("POST /models/gemini-1.5-flash:generateContent"));
        assert!(request.contains("x-goog-api-key: test-key"));
        assert!(request.contains("Analyze this"));
    }

    #[tokio::test]
    async fn test_generate_classifies_rate_limit() {
        let (base, _handle) = serve_once(429, r#"{"error":{"message":"quota"}}"#).await;

        let provider = GeminiProvider::with_client(config(Some(base)), direct_client()).unwrap();
        let err = provider.generate("Analyze this").await.unwrap_err();

        match err {
            DocsmithError::Llm(e) => assert_eq!(e.category, ErrorCategory::RateLimit),
            other => panic!("unexpected error: {other}"),
        }
    }
}
