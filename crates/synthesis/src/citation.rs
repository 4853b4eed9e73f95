//! Citation labelling and context assembly.
//!
//! Labels are positional: the chunk at index `i` is cited as
//! `Document Ref {i + 1}`. The model only ever sees labels; translating a
//! label back to its source happens through the [`CitationMap`].

use crate::types::{CitationMap, RetrievedChunk};

/// Prefix of every citation label.
pub const LABEL_PREFIX: &str = "Document Ref";

/// Label for the chunk at zero-based `position`.
pub fn citation_label(position: usize) -> String {
    format!("{} {}", LABEL_PREFIX, position + 1)
}

/// Human-readable source descriptor, e.g. `A.pdf (Chunk 3, Page 5)`.
pub fn describe_source(chunk: &RetrievedChunk) -> String {
    match chunk.page_number {
        Some(page) => format!(
            "{} (Chunk {}, Page {})",
            chunk.source_document, chunk.chunk_index, page
        ),
        None => format!("{} (Chunk {})", chunk.source_document, chunk.chunk_index),
    }
}

/// Labelled excerpt block plus the label mapping for `chunks`, in input order.
///
/// Each excerpt is rendered as `<label>:\n"<text>"\n`; excerpts are joined
/// with a newline. Duplicate chunks get distinct labels.
pub fn build_context(chunks: &[RetrievedChunk]) -> (String, CitationMap) {
    let mut citations = CitationMap::new();
    let mut parts = Vec::with_capacity(chunks.len());

    for (position, chunk) in chunks.iter().enumerate() {
        let label = citation_label(position);
        parts.push(format!("{}:\n\"{}\"\n", label, chunk.text));
        citations.push(label, describe_source(chunk));
    }

    (parts.join("\n"), citations)
}

/// Sorted, de-duplicated source document names across `chunks`.
pub fn unique_sources(chunks: &[RetrievedChunk]) -> Vec<String> {
    let mut sources: Vec<String> = chunks
        .iter()
        .map(|chunk| chunk.source_document.clone())
        .filter(|name| !name.is_empty())
        .collect();
    sources.sort();
    sources.dedup();
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_without_page() {
        let chunk = RetrievedChunk::new("text", "A.pdf", 3);
        assert_eq!(describe_source(&chunk), "A.pdf (Chunk 3)");
    }

    #[test]
    fn test_descriptor_with_page() {
        let chunk = RetrievedChunk::new("text", "A.pdf", 3).with_page(5);
        assert_eq!(describe_source(&chunk), "A.pdf (Chunk 3, Page 5)");
    }

    #[test]
    fn test_descriptor_with_page_zero() {
        let chunk = RetrievedChunk::new("text", "A.pdf", 3).with_page(0);
        assert_eq!(describe_source(&chunk), "A.pdf (Chunk 3, Page 0)");
    }

    #[test]
    fn test_labels_are_sequential() {
        let chunks: Vec<RetrievedChunk> = (0..12)
            .map(|i| RetrievedChunk::new(format!("text {}", i), "doc", i))
            .collect();

        let (_, citations) = build_context(&chunks);
        let labels: Vec<&str> = citations.labels().collect();
        let expected: Vec<String> = (1..=12).map(|i| format!("Document Ref {}", i)).collect();

        assert_eq!(citations.len(), 12);
        assert_eq!(labels, expected);
    }

    #[test]
    fn test_duplicates_get_distinct_labels() {
        let chunk = RetrievedChunk::new("same", "doc1", 4);
        let (context, citations) = build_context(&[chunk.clone(), chunk]);

        assert_eq!(citations.len(), 2);
        assert_eq!(citations.get("Document Ref 1"), Some("doc1 (Chunk 4)"));
        assert_eq!(citations.get("Document Ref 2"), Some("doc1 (Chunk 4)"));
        assert!(context.contains("Document Ref 1:\n\"same\""));
        assert!(context.contains("Document Ref 2:\n\"same\""));
    }

    #[test]
    fn test_reordering_changes_mapping() {
        let a = RetrievedChunk::new("alpha", "a.txt", 0);
        let b = RetrievedChunk::new("beta", "b.txt", 1).with_page(2);

        let (_, forward) = build_context(&[a.clone(), b.clone()]);
        let (_, reversed) = build_context(&[b, a]);

        assert_eq!(forward.get("Document Ref 1"), Some("a.txt (Chunk 0)"));
        assert_eq!(forward.get("Document Ref 2"), Some("b.txt (Chunk 1, Page 2)"));
        assert_eq!(reversed.get("Document Ref 1"), Some("b.txt (Chunk 1, Page 2)"));
        assert_eq!(reversed.get("Document Ref 2"), Some("a.txt (Chunk 0)"));
    }

    #[test]
    fn test_context_layout() {
        let chunks = vec![
            RetrievedChunk::new("first", "d", 0),
            RetrievedChunk::new("second", "d", 1),
        ];

        let (context, _) = build_context(&chunks);
        assert_eq!(
            context,
            "Document Ref 1:\n\"first\"\n\nDocument Ref 2:\n\"second\"\n"
        );
    }

    #[test]
    fn test_empty_input() {
        let (context, citations) = build_context(&[]);
        assert!(context.is_empty());
        assert!(citations.is_empty());
    }

    #[test]
    fn test_unique_sources() {
        let chunks = vec![
            RetrievedChunk::new("x", "b.pdf", 0),
            RetrievedChunk::new("y", "a.txt", 0),
            RetrievedChunk::new("z", "b.pdf", 1),
            RetrievedChunk::new("w", "", 0),
        ];
        assert_eq!(unique_sources(&chunks), vec!["a.txt", "b.pdf"]);
    }
}
