/// LLM Client — the single point of entry for all Gemini API calls in the screener.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Handlers receive an `Arc<dyn CompletionClient>` through `AppState`.
///
/// Model: gemini-2.5-flash (hardcoded — do not make configurable to prevent drift)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// The model used for all LLM calls in the screener.
pub const MODEL: &str = "gemini-2.5-flash";

const TEMPERATURE: f32 = 1.0;
const TOP_P: f32 = 0.95;
const TOP_K: u32 = 40;
const MAX_OUTPUT_TOKENS: u32 = 8192;
const RESPONSE_MIME_TYPE: &str = "text/plain";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Anything that can turn a prompt into raw completion text.
///
/// Implementations return text already cleaned by [`clean_completion`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: &'static str,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE,
            top_p: TOP_P,
            top_k: TOP_K,
            max_output_tokens: MAX_OUTPUT_TOKENS,
            response_mime_type: RESPONSE_MIME_TYPE,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
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

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.is_empty() {
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
    message: String,
}

/// Gemini `generateContent` client with the fixed generation config.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    generation_config: GenerationConfig,
}

impl GeminiClient {
    pub fn new(api_key: String, api_base: &str, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
            endpoint: generate_content_url(api_base, MODEL),
            generation_config: GenerationConfig::default(),
        })
    }

    /// Makes a single call to the Gemini API, returning the full response object.
    /// Failures are returned as-is; callers decide what to show the user.
    pub async fn call(&self, prompt: &str) -> Result<GenerateContentResponse, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: self.generation_config.clone(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let gemini_response: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &gemini_response.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(gemini_response)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self.call(prompt).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(clean_completion(&text))
    }
}

fn generate_content_url(api_base: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{model}:generateContent",
        api_base.trim_end_matches('/')
    )
}

/// Trims the completion and removes every ```json / ``` fence marker,
/// wherever the model put them.
pub fn clean_completion(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_completion_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(clean_completion(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_clean_completion_without_tag() {
        let input = "  ```\n{\"key\": \"value\"}\n```  ";
        assert_eq!(clean_completion(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_clean_completion_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(clean_completion(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_clean_completion_removes_inner_fences() {
        let input = "Here you go:\n```json\n{}\n```\n";
        assert_eq!(clean_completion(input), "Here you go:\n\n{}");
    }

    #[test]
    fn test_generation_config_serializes_camel_case() {
        let value = serde_json::to_value(GenerationConfig::default()).unwrap();
        assert_eq!(value["temperature"], 1.0);
        assert_eq!(value["topK"], 40);
        assert_eq!(value["maxOutputTokens"], 8192);
        assert_eq!(value["responseMimeType"], "text/plain");
        assert!((value["topP"].as_f64().unwrap() - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hello" }],
            }],
            generation_config: GenerationConfig::default(),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert!(value.get("generationConfig").is_some());
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 3}
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
        assert_eq!(response.usage_metadata.unwrap().prompt_token_count, 10);
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_generate_content_url_trims_trailing_slash() {
        assert_eq!(
            generate_content_url("http://localhost:9000/", "gemini-2.5-flash"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
