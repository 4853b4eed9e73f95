//! Synthesis input and output types.

use docqa_core::LlmError;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// A chunk returned by the retrieval collaborator.
///
/// Read-only input; the order of a chunk sequence is the retrieval ranking
/// and decides citation numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedChunk {
    /// Chunk text
    pub text: String,

    /// Name of the originating document
    #[serde(rename = "source_doc")]
    pub source_document: String,

    /// Position of the chunk within its document
    #[serde(rename = "chunk_num_in_doc")]
    pub chunk_index: u64,

    /// Page number, for paged formats only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_number: Option<u32>,
}

impl RetrievedChunk {
    pub fn new(
        text: impl Into<String>,
        source_document: impl Into<String>,
        chunk_index: u64,
    ) -> Self {
        Self {
            text: text.into(),
            source_document: source_document.into(),
            chunk_index,
            page_number: None,
        }
    }

    pub fn with_page(mut self, page_number: u32) -> Self {
        self.page_number = Some(page_number);
        self
    }
}

/// One citation label and what it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitationEntry {
    /// Label the model cites, e.g. "Document Ref 3"
    pub label: String,

    /// Human-readable source, e.g. "report.pdf (Chunk 4, Page 2)"
    pub descriptor: String,
}

/// Mapping from citation label to source descriptor, in label order.
///
/// Serializes as a JSON object whose keys keep label order, so
/// "Document Ref 10" follows "Document Ref 9".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationMap {
    entries: Vec<CitationEntry>,
}

impl CitationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, label: String, descriptor: String) {
        self.entries.push(CitationEntry { label, descriptor });
    }

    /// Descriptor for `label`, if present.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.descriptor.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CitationEntry> {
        self.entries.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.label.as_str())
    }
}

impl Serialize for CitationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.label, &entry.descriptor)?;
        }
        map.end()
    }
}

/// Why a synthesis attempt failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisFailure {
    /// The prompt template could not be rendered
    #[error("prompt rendering failed: {0}")]
    Prompt(String),

    /// The provider call failed
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The client failed outside the provider protocol
    #[error("client error: {0}")]
    Client(String),
}

/// Outcome of one synthesis call.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisOutcome {
    /// The model answered; `text` still contains the inline citation labels
    Answered { text: String, citations: CitationMap },

    /// No chunks were supplied; `message` is a fixed notice and
    /// `citations` is always empty
    NoDocuments { message: String, citations: CitationMap },

    /// No LLM client is configured
    Unavailable,

    /// Prompt rendering or the client call failed
    Failed(SynthesisFailure),
}

/// Answer text (absent on failure) and citation mapping (absent on failure).
pub type SynthesisResult = (Option<String>, Option<CitationMap>);

impl SynthesisOutcome {
    /// Collapse into the `(answer, mapping)` pair.
    ///
    /// Unavailable and failed outcomes both become `(None, None)`; the no
    /// documents case keeps its notice and an empty, present mapping.
    pub fn into_parts(self) -> SynthesisResult {
        match self {
            Self::Answered { text, citations } => (Some(text), Some(citations)),
            Self::NoDocuments { message, citations } => (Some(message), Some(citations)),
            Self::Unavailable | Self::Failed(_) => (None, None),
        }
    }

    /// Answer or notice text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Answered { text, .. } => Some(text.as_str()),
            Self::NoDocuments { message, .. } => Some(message.as_str()),
            Self::Unavailable | Self::Failed(_) => None,
        }
    }

    pub fn citations(&self) -> Option<&CitationMap> {
        match self {
            Self::Answered { citations, .. } | Self::NoDocuments { citations, .. } => {
                Some(citations)
            }
            Self::Unavailable | Self::Failed(_) => None,
        }
    }
}
