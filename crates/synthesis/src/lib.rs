//! Citation-grounded answer synthesis for DocQA.
//!
//! Given a query and the ranked chunks returned by retrieval, builds a prompt
//! in which every chunk carries a positional `Document Ref N` label, asks the
//! LLM for an answer that cites those labels, and returns the answer together
//! with a map from each label to a readable source descriptor.
//!
//! # Example
//! ```no_run
//! use docqa_llm::MockLlmClient;
//! use docqa_synthesis::{synthesize_with_citations, RetrievedChunk};
//!
//! # async fn example() {
//! let client = MockLlmClient::replying("Foo is a metasyntactic variable (Document Ref 1).");
//! let chunks = vec![RetrievedChunk::new("foo", "doc1", 0)];
//!
//! let (answer, citations) =
//!     synthesize_with_citations(Some(&client), "what is foo?", &chunks, "llama3-8b-8192").await;
//! assert_eq!(citations.unwrap().get("Document Ref 1"), Some("doc1 (Chunk 0)"));
//! println!("{}", answer.unwrap());
//! # }
//! ```

pub mod citation;
pub mod input;
pub mod synthesize;
pub mod types;

pub use citation::{build_context, citation_label, describe_source, unique_sources};
pub use input::load_chunks;
pub use synthesize::{
    synthesize, synthesize_with_citations, synthesize_with_prompt, NO_DOCUMENTS_MESSAGE,
    SYNTHESIS_TEMPERATURE,
};
pub use types::{
    CitationEntry, CitationMap, RetrievedChunk, SynthesisFailure, SynthesisOutcome,
    SynthesisResult,
};
