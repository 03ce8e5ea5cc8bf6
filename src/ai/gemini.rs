use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::timeout;

use crate::ai::error::GenerationError;
use crate::ai::provider::{AiProvider, Completion, CompletionRequest, OutputFormat, TokenUsage};
use crate::ai::response::extract_text;
use crate::config::GenerationConfig;

const TEMPERATURE: f64 = 0.7;
const TOP_P: f64 = 0.95;
const MAX_OUTPUT_TOKENS: u32 = 1500;
const ERROR_BODY_LIMIT: usize = 500;

/// Single-attempt client for the Gemini `generateContent` endpoint.
///
/// Immutable after construction; share it behind an `Arc` across requests.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    timeout: Duration,
}

impl GeminiProvider {
    pub fn new(api_key: String, endpoint: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_key,
            endpoint,
            timeout,
        }
    }

    /// Build a provider from configuration. Returns `None` when no credential is set.
    pub fn from_config(config: &GenerationConfig) -> Option<Self> {
        let api_key = config.credential()?;
        Some(Self::new(
            api_key.to_string(),
            config.endpoint.clone(),
            config.timeout(),
        ))
    }

    fn build_request(&self, request: &CompletionRequest) -> GeminiRequest {
        let response_mime_type = match request.format {
            OutputFormat::Markdown => None,
            OutputFormat::Json => Some("application/json"),
        };

        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: GeminiGenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                response_mime_type,
            },
        }
    }

    async fn send(&self, body: &GeminiRequest) -> Result<Completion, GenerationError> {
        // The key travels in the query string, so URLs are stripped from
        // reqwest errors before they can reach a log line.
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|e| GenerationError::Network(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Http {
                status: status.as_u16(),
                body: text.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::Parse(format!("Failed to parse response: {}", e.without_url())))?;

        let (shape, text) = extract_text(&value).ok_or_else(GenerationError::no_text)?;
        let usage = parse_usage(&value);

        tracing::debug!(
            shape = ?shape,
            input_tokens = usage.as_ref().map(|u| u.input_tokens),
            output_tokens = usage.as_ref().map(|u| u.output_tokens),
            total_tokens = usage.as_ref().map(TokenUsage::total),
            "Gemini returned {} chars",
            text.len()
        );

        Ok(Completion { text, usage })
    }
}

fn parse_usage(body: &Value) -> Option<TokenUsage> {
    let meta: GeminiUsageMetadata = serde_json::from_value(body.get("usageMetadata")?.clone()).ok()?;
    Some(TokenUsage {
        input_tokens: meta.prompt_token_count.unwrap_or(0),
        output_tokens: meta.candidates_token_count.unwrap_or(0),
    })
}

// --- Request types ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f64,
    top_p: f64,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

// --- Response types ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[async_trait]
impl AiProvider for GeminiProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GenerationError> {
        let body = self.build_request(request);

        // Dropping the in-flight future on timeout aborts the request.
        match timeout(self.timeout, self.send(&body)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout(self.timeout)),
        }
    }
}
