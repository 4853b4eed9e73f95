//! Ask command handler.
//!
//! Answers a question from a file of retrieved chunks, printing the answer
//! with its inline citations followed by the document reference key.

use clap::Args;
use docqa_core::{config::AppConfig, AppError, AppResult};
use docqa_llm::LlmClient;
use docqa_prompt::{load_prompt_or_builtin, SYNTHESIS_PROMPT_ID};
use docqa_synthesis::{load_chunks, synthesize_with_prompt, SynthesisOutcome};
use std::path::PathBuf;

/// Answer a question from retrieved document chunks
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub query: Option<String>,

    /// Read the question from a file
    #[arg(short, long, conflicts_with = "query")]
    pub file: Option<PathBuf>,

    /// JSON file with the ranked chunks returned by retrieval
    #[arg(long)]
    pub chunks: PathBuf,

    /// Prompt definition to use
    #[arg(long, default_value = SYNTHESIS_PROMPT_ID)]
    pub prompt_id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig, client: Option<&dyn LlmClient>) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let query = self
            .get_query()?
            .ok_or_else(|| AppError::Config("No query provided".to_string()))?;

        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Config("Query cannot be empty".to_string()));
        }

        let chunks = load_chunks(&self.chunks)?;
        let prompt = load_prompt_or_builtin(&config.workspace, &self.prompt_id)?;

        let outcome = synthesize_with_prompt(client, &prompt, query, &chunks, &config.model).await;

        if self.json {
            let json = serde_json::to_string_pretty(&render_json(&outcome, config))?;
            println!("{}", json);
        } else {
            println!("{}", render_text(&outcome, config));
        }

        Ok(())
    }

    /// Get the query text from the argument or the file.
    fn get_query(&self) -> AppResult<Option<String>> {
        if let Some(ref query) = self.query {
            return Ok(Some(query.clone()));
        }

        match self.file {
            Some(ref path) => Ok(Some(std::fs::read_to_string(path)?)),
            None => Ok(None),
        }
    }
}

/// Render an outcome for the terminal.
fn render_text(outcome: &SynthesisOutcome, config: &AppConfig) -> String {
    match outcome {
        SynthesisOutcome::Answered { text, citations } => {
            let mut out = text.trim_end().to_string();
            if !citations.is_empty() {
                out.push_str("\n\nDocument References:\n");
                for entry in citations.iter() {
                    out.push_str(&format!("  {}: {}\n", entry.label, entry.descriptor));
                }
            }
            out.trim_end().to_string()
        }
        SynthesisOutcome::NoDocuments { message, .. } => message.clone(),
        SynthesisOutcome::Unavailable => format!(
            "LLM service unavailable. Set {} to enable answers.",
            config.api_key_var()
        ),
        SynthesisOutcome::Failed(_) => {
            "The query returned no response. See logs for details.".to_string()
        }
    }
}

/// Render an outcome as structured JSON.
fn render_json(outcome: &SynthesisOutcome, config: &AppConfig) -> serde_json::Value {
    let status = match outcome {
        SynthesisOutcome::Answered { .. } => "answered",
        SynthesisOutcome::NoDocuments { .. } => "no_documents",
        SynthesisOutcome::Unavailable => "unavailable",
        SynthesisOutcome::Failed(_) => "failed",
    };

    let error = match outcome {
        SynthesisOutcome::Failed(failure) => Some(failure.to_string()),
        _ => None,
    };

    serde_json::json!({
        "status": status,
        "answer": outcome.text(),
        "documentReferences": outcome.citations(),
        "model": config.model,
        "provider": config.provider,
        "error": error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use docqa_core::LlmError;
    use docqa_synthesis::{build_context, RetrievedChunk, SynthesisFailure};

    fn answered() -> SynthesisOutcome {
        let (_, citations) = build_context(&[
            RetrievedChunk::new("foo", "doc1", 0),
            RetrievedChunk::new("bar", "doc2.pdf", 3).with_page(5),
        ]);
        SynthesisOutcome::Answered {
            text: "Foo relates to bar (Document Ref 1, Document Ref 2).\n".to_string(),
            citations,
        }
    }

    #[test]
    fn test_render_text_answered() {
        let text = render_text(&answered(), &AppConfig::default());
        assert_eq!(
            text,
            "Foo relates to bar (Document Ref 1, Document Ref 2).\n\n\
             Document References:\n  \
             Document Ref 1: doc1 (Chunk 0)\n  \
             Document Ref 2: doc2.pdf (Chunk 3, Page 5)"
        );
    }

    #[test]
    fn test_render_text_unavailable_names_key() {
        let text = render_text(&SynthesisOutcome::Unavailable, &AppConfig::default());
        assert!(text.contains("GROQ_API_KEY"));
    }

    #[test]
    fn test_render_json_answered() {
        let json = render_json(&answered(), &AppConfig::default());
        assert_eq!(json["status"], "answered");
        assert_eq!(
            json["documentReferences"]["Document Ref 2"],
            "doc2.pdf (Chunk 3, Page 5)"
        );
        assert!(json["error"].is_null());
    }

    #[test]
    fn test_render_json_failed_has_null_answer() {
        let outcome = SynthesisOutcome::Failed(SynthesisFailure::Llm(LlmError::Auth {
            status: 401,
            snippet: "invalid api key".to_string(),
        }));
        let json = render_json(&outcome, &AppConfig::default());

        assert_eq!(json["status"], "failed");
        assert!(json["answer"].is_null());
        assert!(json["documentReferences"].is_null());
        assert!(json["error"].as_str().unwrap().contains("401"));
    }

    #[test]
    fn test_render_json_no_documents_has_empty_map() {
        let outcome = SynthesisOutcome::NoDocuments {
            message: "nothing".to_string(),
            citations: Default::default(),
        };
        let json = render_json(&outcome, &AppConfig::default());

        assert_eq!(json["status"], "no_documents");
        assert_eq!(json["documentReferences"], serde_json::json!({}));
    }
}
