//! Command handlers for the DocQA CLI.

pub mod ask;
pub mod models;
pub mod prompts;
pub mod sources;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use models::ModelsCommand;
pub use prompts::PromptsCommand;
pub use sources::SourcesCommand;
