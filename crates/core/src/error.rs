//! Error types for DocQA.
//!
//! This module defines a unified error enum covering configuration, I/O,
//! LLM provider, prompt and serialization failures. LLM provider failures
//! carry their own classification in [`LlmError`] so callers can tell an
//! authentication problem from a dropped connection without parsing strings.

use thiserror::Error;

/// Unified error type for DocQA.
///
/// All fallible functions return `Result<T, AppError>`.
/// We never panic; errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// LLM provider errors
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// Prompt system errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Classified failure of an LLM provider interaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// No credential was supplied for a provider that needs one
    #[error("{provider} provider requires an API key")]
    MissingApiKey { provider: String },

    /// The provider name did not match any known provider
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    /// The HTTP client could not be constructed
    #[error("Failed to build client: {0}")]
    ClientBuild(String),

    /// Network-level failure (connect, timeout, reset)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider rejected the credential (401/403)
    #[error("Authentication rejected ({status}): {snippet}")]
    Auth { status: u16, snippet: String },

    /// Any other non-success HTTP status
    #[error("Provider returned status {status}: {snippet}")]
    Status { status: u16, snippet: String },

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Response decoded but carried no usable completion text
    #[error("Provider returned an empty completion")]
    EmptyCompletion,
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
