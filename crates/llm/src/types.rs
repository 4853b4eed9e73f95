//! Provider identification and connection settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Known chat-completion providers.
///
/// Both speak the OpenAI-compatible `/chat/completions` protocol and differ
/// only in their default base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    Groq,
    OpenAI,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "groq" => Some(Self::Groq),
            "openai" => Some(Self::OpenAI),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groq => "groq",
            Self::OpenAI => "openai",
        }
    }

    /// Base URL used when no endpoint is configured.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Self::Groq => "https://api.groq.com/openai/v1",
            Self::OpenAI => "https://api.openai.com/v1",
        }
    }
}

/// Everything the factory needs to build a client.
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    /// Provider name as configured ("groq", "openai")
    pub provider: String,

    /// Custom base URL; falls back to the provider default
    pub endpoint: Option<String>,

    /// API credential
    pub api_key: Option<String>,

    /// Request timeout; reqwest's default applies when unset
    pub timeout: Option<Duration>,
}

impl ProviderSettings {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Self::default()
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
