//! LLM client abstraction and request/response types.
//!
//! This module defines the core abstractions for talking to chat-completion
//! providers. Implementations live in [`crate::providers`].

use docqa_core::AppResult;
use serde::{Deserialize, Serialize};

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// LLM completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// Conversation to send, in order
    pub messages: Vec<ChatMessage>,

    /// Model identifier (e.g., "llama3-8b-8192")
    pub model: String,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl LlmRequest {
    /// Create a request carrying `prompt` as a single user message.
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(prompt)],
            model: model.into(),
            temperature: None,
        }
    }

    /// Set the temperature for sampling.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Content of the last user message, if any.
    pub fn user_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == ChatRole::User)
            .map(|m| m.content.as_str())
    }
}

/// LLM completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Text of the top completion choice
    pub content: String,

    /// Model that generated the response
    pub model: String,

    /// Usage statistics
    #[serde(default)]
    pub usage: LlmUsage,

    /// Why generation stopped, as reported by the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct LlmUsage {
    #[serde(default)]
    pub prompt_tokens: u32,

    #[serde(default)]
    pub completion_tokens: u32,

    #[serde(default)]
    pub total_tokens: u32,
}

impl LlmUsage {
    /// Create usage stats from prompt and completion token counts.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// A model advertised by the provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: String,

    #[serde(default)]
    pub owned_by: Option<String>,
}

/// Trait for LLM providers.
///
/// Implementations must be safe to share across concurrent callers; a single
/// client is built at startup and passed by reference wherever it is needed.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Get the provider name (e.g., "groq", "openai").
    fn provider_name(&self) -> &str;

    /// Perform a non-streaming chat completion.
    ///
    /// # Errors
    /// Returns `AppError::Llm` classified by cause (transport, auth, status,
    /// decode, empty completion).
    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse>;

    /// List the models the provider serves.
    async fn list_models(&self) -> AppResult<Vec<ModelInfo>>;
}
