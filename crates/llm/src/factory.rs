//! LLM provider factory.
//!
//! Builds an LLM client from [`ProviderSettings`]. A missing credential or a
//! failed construction never aborts the host process: [`create_client`]
//! logs the reason and returns `None`, and callers treat LLM features as
//! disabled.

use crate::client::LlmClient;
use crate::providers::ChatCompletionsClient;
use crate::types::{ProviderSettings, ProviderType};
use docqa_core::{AppResult, LlmError};
use std::sync::Arc;

/// Create an LLM client, or `None` when one cannot be built.
///
/// # Arguments
/// * `settings` - Provider name, optional endpoint, credential and timeout
///
/// # Returns
/// A shared client, or `None` if the credential is absent, the provider is
/// unknown, or construction fails. The reason is logged.
pub fn create_client(settings: &ProviderSettings) -> Option<Arc<dyn LlmClient>> {
    match try_create_client(settings) {
        Ok(client) => {
            tracing::info!(
                provider = client.provider_name(),
                "LLM client initialized"
            );
            Some(client)
        }
        Err(docqa_core::AppError::Llm(LlmError::MissingApiKey { provider })) => {
            tracing::warn!(
                "No API key configured for {}. LLM features will be disabled.",
                provider
            );
            None
        }
        Err(e) => {
            tracing::error!("Failed to initialize LLM client: {}", e);
            None
        }
    }
}

/// Create an LLM client, reporting why construction failed.
///
/// # Errors
/// - `LlmError::UnknownProvider` if the provider name is not recognized
/// - `LlmError::MissingApiKey` if no non-blank credential is given
/// - `LlmError::ClientBuild` if the HTTP client cannot be constructed
pub fn try_create_client(settings: &ProviderSettings) -> AppResult<Arc<dyn LlmClient>> {
    let provider = ProviderType::parse(&settings.provider)
        .ok_or_else(|| LlmError::UnknownProvider(settings.provider.clone()))?;

    let api_key = settings
        .api_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| LlmError::MissingApiKey {
            provider: provider.as_str().to_string(),
        })?;

    let base_url = settings
        .endpoint
        .as_deref()
        .unwrap_or_else(|| provider.default_base_url());

    let client = ChatCompletionsClient::new(provider, base_url, api_key, settings.timeout)?;
    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_groq_client() {
        let settings = ProviderSettings::new("groq").with_api_key(Some("gsk_test".to_string()));
        let client = create_client(&settings).expect("client");
        assert_eq!(client.provider_name(), "groq");
    }

    #[test]
    fn test_create_openai_with_custom_endpoint() {
        let settings = ProviderSettings::new("openai")
            .with_api_key(Some("sk-test".to_string()))
            .with_endpoint(Some("http://localhost:8000/v1".to_string()));
        let client = create_client(&settings).expect("client");
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_missing_key_disables_client() {
        let settings = ProviderSettings::new("groq");
        assert!(create_client(&settings).is_none());

        match try_create_client(&settings) {
            Err(docqa_core::AppError::Llm(LlmError::MissingApiKey { provider })) => {
                assert_eq!(provider, "groq")
            }
            other => panic!("Expected missing key error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_blank_key_disables_client() {
        let settings = ProviderSettings::new("groq").with_api_key(Some("   ".to_string()));
        assert!(create_client(&settings).is_none());
    }

    #[test]
    fn test_construction_failure_is_not_fatal() {
        let settings =
            ProviderSettings::new("groq").with_api_key(Some("bad\nkey".to_string()));
        assert!(create_client(&settings).is_none());
    }

    #[test]
    fn test_unknown_provider() {
        let settings = ProviderSettings::new("unknown").with_api_key(Some("k".to_string()));
        assert!(create_client(&settings).is_none());
        assert!(matches!(
            try_create_client(&settings),
            Err(docqa_core::AppError::Llm(LlmError::UnknownProvider(_)))
        ));
    }
}
