//! LLM integration crate for DocQA.
//!
//! This crate provides a provider-agnostic abstraction for chat-completion
//! LLMs behind the [`LlmClient`] trait.
//!
//! # Providers
//! - **Groq** (default) and **OpenAI**: OpenAI-compatible chat completions
//! - **Mock**: scripted replies for tests
//!
//! # Example
//! ```no_run
//! use docqa_llm::{create_client, LlmRequest, ProviderSettings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = ProviderSettings::new("groq")
//!     .with_api_key(std::env::var("GROQ_API_KEY").ok());
//! if let Some(client) = create_client(&settings) {
//!     let request = LlmRequest::new("Hello, world!", "llama3-8b-8192");
//!     let response = client.complete(&request).await?;
//!     println!("{}", response.content);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{ChatMessage, ChatRole, LlmClient, LlmRequest, LlmResponse, LlmUsage, ModelInfo};
pub use factory::{create_client, try_create_client};
pub use providers::{ChatCompletionsClient, MockLlmClient};
pub use types::{ProviderSettings, ProviderType};
