//! Scripted LLM client for tests and offline runs.

use crate::client::{LlmClient, LlmRequest, LlmResponse, LlmUsage, ModelInfo};
use docqa_core::{AppError, AppResult, LlmError};
use std::sync::Mutex;

/// Mock client that returns a fixed reply (or error) and records every
/// request it receives.
#[derive(Debug)]
pub struct MockLlmClient {
    reply: Result<String, LlmError>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    /// Mock that answers every request with `reply`.
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Mock that fails every request with `error`.
    pub fn failing(error: LlmError) -> Self {
        Self {
            reply: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(request.clone());
        }

        match &self.reply {
            Ok(content) => Ok(LlmResponse {
                content: content.clone(),
                model: request.model.clone(),
                usage: LlmUsage::new(
                    request.user_prompt().map(|p| p.len() as u32).unwrap_or(0),
                    content.len() as u32,
                ),
                finish_reason: Some("stop".to_string()),
            }),
            Err(e) => Err(AppError::Llm(e.clone())),
        }
    }

    async fn list_models(&self) -> AppResult<Vec<ModelInfo>> {
        Ok(vec![ModelInfo {
            id: "mock-model".to_string(),
            owned_by: Some("docqa".to_string()),
        }])
    }
}
