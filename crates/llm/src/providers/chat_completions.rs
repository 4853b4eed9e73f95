//! OpenAI-compatible chat completions provider.
//!
//! Serves both Groq and OpenAI, which share the wire format:
//! - `POST {base}/chat/completions` for non-streaming completions
//! - `GET {base}/models` for the model catalogue

use crate::client::{ChatMessage, LlmClient, LlmRequest, LlmResponse, LlmUsage, ModelInfo};
use crate::types::ProviderType;
use docqa_core::{AppResult, LlmError};
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Longest slice of an error body kept for logs and errors.
const MAX_SNIPPET_CHARS: usize = 200;

/// Request body for `/chat/completions`.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelInfo>,
}

/// Chat completions client for OpenAI-compatible providers.
#[derive(Debug)]
pub struct ChatCompletionsClient {
    provider: ProviderType,

    /// Base URL without trailing slash
    base_url: String,

    /// HTTP client carrying the bearer credential as a default header
    client: reqwest::Client,
}

impl ChatCompletionsClient {
    /// Create a client for `provider` against `base_url`.
    ///
    /// # Errors
    /// - `LlmError::MissingApiKey` if `api_key` is blank
    /// - `LlmError::ClientBuild` if the key is not a valid header value or
    ///   the HTTP client cannot be built
    pub fn new(
        provider: ProviderType,
        base_url: &str,
        api_key: &str,
        timeout: Option<Duration>,
    ) -> AppResult<Self> {
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey {
                provider: provider.as_str().to_string(),
            }
            .into());
        }

        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|e| LlmError::ClientBuild(format!("invalid API key header: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LlmError::ClientBuild(e.to_string()))?;

        Ok(Self {
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.base_url)
    }

    /// Read the body of a non-success response into a classified error.
    async fn status_error(response: reqwest::Response) -> LlmError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        classify_status(status, &body)
    }
}

#[async_trait::async_trait]
impl LlmClient for ChatCompletionsClient {
    fn provider_name(&self) -> &str {
        self.provider.as_str()
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        let started = Instant::now();
        let url = self.chat_url();
        let body = ChatCompletionRequest {
            model: &request.model,
            messages: &request.messages,
            temperature: request.temperature,
        };

        tracing::debug!(
            provider = self.provider.as_str(),
            model = %request.model,
            messages = request.messages.len(),
            "POST {}",
            url
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let err = Self::status_error(response).await;
            tracing::error!(
                provider = self.provider.as_str(),
                latency_ms = started.elapsed().as_millis() as u64,
                "Chat completion failed: {}",
                err
            );
            return Err(err.into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        let completion = parse_completion(&text, &request.model)?;

        tracing::info!(
            provider = self.provider.as_str(),
            model = %completion.model,
            total_tokens = completion.usage.total_tokens,
            latency_ms = started.elapsed().as_millis() as u64,
            "Chat completion received"
        );

        Ok(completion)
    }

    async fn list_models(&self) -> AppResult<Vec<ModelInfo>> {
        let url = self.models_url();
        tracing::debug!(provider = self.provider.as_str(), "GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await.into());
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;
        let list: ModelList =
            serde_json::from_str(&text).map_err(|e| LlmError::Decode(e.to_string()))?;

        Ok(list.data)
    }
}

/// Decode a `/chat/completions` body, keeping only the top choice.
///
/// A body without choices, or whose first choice has no text, is an
/// `EmptyCompletion` rather than a success with an empty answer.
fn parse_completion(body: &str, requested_model: &str) -> Result<LlmResponse, LlmError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body).map_err(|e| {
        LlmError::Decode(format!(
            "{}; expected `choices[0].message.content`",
            e
        ))
    })?;

    let top = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(LlmError::EmptyCompletion)?;

    let content = top
        .message
        .and_then(|m| m.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(LlmError::EmptyCompletion)?;

    let usage = parsed
        .usage
        .map(|u| {
            let mut usage = LlmUsage::new(u.prompt_tokens, u.completion_tokens);
            if let Some(total) = u.total_tokens {
                usage.total_tokens = total;
            }
            usage
        })
        .unwrap_or_default();

    Ok(LlmResponse {
        content,
        model: parsed.model.unwrap_or_else(|| requested_model.to_string()),
        usage,
        finish_reason: top.finish_reason,
    })
}

fn classify_status(status: StatusCode, body: &str) -> LlmError {
    let snippet = make_snippet(body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth {
            status: status.as_u16(),
            snippet,
        },
        _ => LlmError::Status {
            status: status.as_u16(),
            snippet,
        },
    }
}

fn make_snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_SNIPPET_CHARS {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(MAX_SNIPPET_CHARS).collect();
        format!("{}...", cut)
    }
}
