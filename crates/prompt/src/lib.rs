//! Prompt system for DocQA.
//!
//! This crate provides:
//! - Built-in prompt definitions (the citation-grounded synthesis prompt)
//! - YAML prompt overrides loaded from `.docqa/prompts/`
//! - Handlebars template rendering

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, ensure_references};
pub use defaults::SYNTHESIS_PROMPT_ID;
pub use loader::{list_prompts, load_prompt, load_prompt_or_builtin};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
