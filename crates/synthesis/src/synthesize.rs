//! LLM synthesis with citations.
//!
//! Builds the citation-labelled prompt for a query, sends it to the LLM and
//! pairs the reply with the label mapping. Failures never escape: every path
//! ends in a [`SynthesisOutcome`].

use crate::citation::build_context;
use crate::types::{RetrievedChunk, SynthesisFailure, SynthesisOutcome, SynthesisResult};
use docqa_llm::{LlmClient, LlmRequest};
use docqa_prompt::{build_prompt, defaults, ensure_references, PromptDefinition};
use std::collections::HashMap;

/// Fixed sampling temperature; favors faithful over creative answers.
pub const SYNTHESIS_TEMPERATURE: f32 = 0.2;

/// Notice returned when there is nothing to synthesize from.
pub const NO_DOCUMENTS_MESSAGE: &str = "I couldn't find any relevant documents with the current search to answer your query or identify themes.";

/// Synthesize an answer with the built-in synthesis prompt.
///
/// Precedence: a missing client yields `Unavailable`, then an empty chunk
/// list yields `NoDocuments`, otherwise the model is called once.
pub async fn synthesize(
    client: Option<&dyn LlmClient>,
    query: &str,
    chunks: &[RetrievedChunk],
    model: &str,
) -> SynthesisOutcome {
    synthesize_with_prompt(client, &defaults::synthesis_prompt(), query, chunks, model).await
}

/// Synthesize an answer and collapse the outcome into `(answer, mapping)`.
pub async fn synthesize_with_citations(
    client: Option<&dyn LlmClient>,
    query: &str,
    chunks: &[RetrievedChunk],
    model: &str,
) -> SynthesisResult {
    synthesize(client, query, chunks, model).await.into_parts()
}

/// Synthesize an answer using `prompt` as the template.
///
/// `prompt` receives two variables: `context` (the labelled excerpts) and
/// `query` (the question, verbatim). A template that does not reference
/// both fails without calling the model.
pub async fn synthesize_with_prompt(
    client: Option<&dyn LlmClient>,
    prompt: &PromptDefinition,
    query: &str,
    chunks: &[RetrievedChunk],
    model: &str,
) -> SynthesisOutcome {
    let Some(client) = client else {
        tracing::error!("LLM client not initialized. Cannot synthesize an answer.");
        return SynthesisOutcome::Unavailable;
    };

    if chunks.is_empty() {
        tracing::info!("No chunks provided for synthesis");
        return SynthesisOutcome::NoDocuments {
            message: NO_DOCUMENTS_MESSAGE.to_string(),
            citations: Default::default(),
        };
    }

    if let Err(e) = ensure_references(prompt, &["context", "query"]) {
        tracing::error!("Rejected synthesis prompt '{}': {}", prompt.id, e);
        return SynthesisOutcome::Failed(SynthesisFailure::Prompt(e.to_string()));
    }

    let (context, citations) = build_context(chunks);

    let mut variables = HashMap::new();
    variables.insert("context".to_string(), context.clone());
    variables.insert("query".to_string(), query.to_string());

    let built = match build_prompt(prompt, variables) {
        Ok(built) => built,
        Err(e) => {
            tracing::error!("Failed to build synthesis prompt '{}': {}", prompt.id, e);
            return SynthesisOutcome::Failed(SynthesisFailure::Prompt(e.to_string()));
        }
    };

    let request = LlmRequest::new(built.user, model).with_temperature(SYNTHESIS_TEMPERATURE);

    tracing::info!(
        provider = client.provider_name(),
        model = model,
        chunks = chunks.len(),
        context_chars = context.len(),
        "Sending synthesis prompt"
    );

    match client.complete(&request).await {
        Ok(response) => {
            tracing::info!(
                total_tokens = response.usage.total_tokens,
                "Synthesis response received"
            );
            SynthesisOutcome::Answered {
                text: response.content,
                citations,
            }
        }
        Err(docqa_core::AppError::Llm(e)) => {
            tracing::error!("LLM call failed: {}", e);
            SynthesisOutcome::Failed(SynthesisFailure::Llm(e))
        }
        Err(e) => {
            tracing::error!("LLM call failed: {}", e);
            SynthesisOutcome::Failed(SynthesisFailure::Client(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CitationMap;
    use docqa_core::LlmError;
    use docqa_llm::{ChatRole, MockLlmClient};

    fn foo_chunks() -> Vec<RetrievedChunk> {
        vec![RetrievedChunk::new("foo", "doc1", 0)]
    }

    #[tokio::test]
    async fn test_absent_client_is_unavailable() {
        let outcome = synthesize(None, "what is foo?", &foo_chunks(), "m").await;
        assert_eq!(outcome, SynthesisOutcome::Unavailable);

        let (text, citations) = synthesize_with_citations(None, "q", &[], "m").await;
        assert!(text.is_none());
        assert!(citations.is_none());
    }

    #[tokio::test]
    async fn test_empty_chunks_return_notice_and_empty_map() {
        let mock = MockLlmClient::replying("unused");
        let (text, citations) = synthesize_with_citations(Some(&mock), "q", &[], "m").await;

        assert_eq!(text.as_deref(), Some(NO_DOCUMENTS_MESSAGE));
        assert_eq!(citations, Some(CitationMap::new()));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_single_chunk_scenario() {
        let mock = MockLlmClient::replying("Foo is a placeholder (Document Ref 1).");
        let (text, citations) =
            synthesize_with_citations(Some(&mock), "what is foo?", &foo_chunks(), "llama3-8b-8192")
                .await;

        assert_eq!(text.as_deref(), Some("Foo is a placeholder (Document Ref 1)."));
        let citations = citations.expect("mapping");
        assert_eq!(citations.len(), 1);
        assert_eq!(citations.get("Document Ref 1"), Some("doc1 (Chunk 0)"));

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        let prompt = requests[0].user_prompt().unwrap();
        assert!(prompt.contains("Document Ref 1:"));
        assert!(prompt.contains("what is foo?"));
        assert!(prompt.contains("\"foo\""));
    }

    #[tokio::test]
    async fn test_request_shape() {
        let mock = MockLlmClient::replying("ok");
        synthesize(Some(&mock), "q", &foo_chunks(), "mixtral-8x7b-32768").await;

        let request = &mock.requests()[0];
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, ChatRole::User);
        assert_eq!(request.model, "mixtral-8x7b-32768");
        assert_eq!(request.temperature, Some(SYNTHESIS_TEMPERATURE));
    }

    #[tokio::test]
    async fn test_n_chunks_give_n_labels() {
        let chunks: Vec<RetrievedChunk> = (0..5)
            .map(|_| RetrievedChunk::new("dup", "same.pdf", 7).with_page(1))
            .collect();
        let mock = MockLlmClient::replying("ok");

        let outcome = synthesize(Some(&mock), "q", &chunks, "m").await;
        let citations = outcome.citations().expect("mapping");

        assert_eq!(citations.len(), 5);
        for i in 1..=5 {
            assert_eq!(
                citations.get(&format!("Document Ref {}", i)),
                Some("same.pdf (Chunk 7, Page 1)")
            );
        }
    }

    #[tokio::test]
    async fn test_client_failure_collapses_to_absent() {
        let mock = MockLlmClient::failing(LlmError::Transport("connection refused".to_string()));
        let outcome = synthesize(Some(&mock), "q", &foo_chunks(), "m").await;

        assert_eq!(
            outcome,
            SynthesisOutcome::Failed(SynthesisFailure::Llm(LlmError::Transport(
                "connection refused".to_string()
            )))
        );
        assert_eq!(outcome.into_parts(), (None, None));
    }

    #[tokio::test]
    async fn test_empty_completion_is_failure() {
        let mock = MockLlmClient::failing(LlmError::EmptyCompletion);
        let (text, citations) =
            synthesize_with_citations(Some(&mock), "q", &foo_chunks(), "m").await;
        assert!(text.is_none());
        assert!(citations.is_none());
    }

    #[tokio::test]
    async fn test_custom_prompt_template() {
        let prompt = PromptDefinition {
            id: "custom".to_string(),
            title: "Custom".to_string(),
            api_version: "1.0".to_string(),
            created_by: "test".to_string(),
            required_variables: vec!["context".to_string(), "query".to_string()],
            template: "Q={{query}}\n{{context}}".to_string(),
        };
        let mock = MockLlmClient::replying("ok");

        synthesize_with_prompt(Some(&mock), &prompt, "why?", &foo_chunks(), "m").await;

        let prompt_sent = mock.requests()[0].user_prompt().unwrap().to_string();
        assert_eq!(prompt_sent, "Q=why?\nDocument Ref 1:\n\"foo\"\n");
    }

    #[tokio::test]
    async fn test_prompt_without_context_fails_without_calling_client() {
        let prompt = PromptDefinition {
            id: "other".to_string(),
            title: "Other".to_string(),
            api_version: "1.0".to_string(),
            created_by: "test".to_string(),
            required_variables: vec![],
            template: "only {{query}}".to_string(),
        };
        let mock = MockLlmClient::replying("ok");

        let outcome = synthesize_with_prompt(Some(&mock), &prompt, "q", &foo_chunks(), "m").await;

        match outcome {
            SynthesisOutcome::Failed(SynthesisFailure::Prompt(msg)) => {
                assert!(msg.contains("{{context}}"))
            }
            other => panic!("Expected prompt failure, got {:?}", other),
        }
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_broken_prompt_fails_without_calling_client() {
        let prompt = PromptDefinition {
            id: "broken".to_string(),
            title: "Broken".to_string(),
            api_version: "1.0".to_string(),
            created_by: "test".to_string(),
            required_variables: vec![],
            template: "{{context}} {{query}} {{#each}}".to_string(),
        };
        let mock = MockLlmClient::replying("ok");

        let outcome = synthesize_with_prompt(Some(&mock), &prompt, "q", &foo_chunks(), "m").await;

        assert!(matches!(
            outcome,
            SynthesisOutcome::Failed(SynthesisFailure::Prompt(_))
        ));
        assert!(mock.requests().is_empty());
    }
}
