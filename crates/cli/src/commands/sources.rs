//! Sources command handler.
//!
//! Lists the documents represented in a retrieval result.

use clap::Args;
use docqa_core::AppResult;
use docqa_synthesis::{load_chunks, unique_sources};
use std::path::PathBuf;

/// List the source documents in a chunks file
#[derive(Args, Debug)]
pub struct SourcesCommand {
    /// JSON file with retrieved chunks
    #[arg(long)]
    pub chunks: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SourcesCommand {
    pub async fn execute(&self) -> AppResult<()> {
        tracing::info!("Executing sources command");

        let chunks = load_chunks(&self.chunks)?;
        let sources = unique_sources(&chunks);

        if self.json {
            let names: Vec<serde_json::Value> = sources
                .iter()
                .map(|name| serde_json::json!({ "name": name }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&names)?);
        } else if sources.is_empty() {
            println!("No documents found.");
        } else {
            for name in &sources {
                println!("{}", name);
            }
        }

        Ok(())
    }
}
