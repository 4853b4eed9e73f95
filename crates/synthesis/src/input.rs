//! Reading retrieval results from disk.

use crate::types::RetrievedChunk;
use docqa_core::{AppError, AppResult};
use std::path::Path;

/// Load a JSON array of retrieved chunks, keeping file order as rank order.
pub fn load_chunks(path: &Path) -> AppResult<Vec<RetrievedChunk>> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to read chunks file {:?}: {}", path, e),
        )
    })?;

    let chunks: Vec<RetrievedChunk> = serde_json::from_str(&contents).map_err(|e| {
        AppError::Serialization(format!("Failed to parse chunks file {:?}: {}", path, e))
    })?;

    tracing::debug!("Loaded {} chunks from {:?}", chunks.len(), path);
    Ok(chunks)
}
