//! Models command handler.
//!
//! Lists the models served by the configured provider.

use clap::Args;
use docqa_core::{config::AppConfig, AppError, AppResult};
use docqa_llm::LlmClient;

/// List models available from the provider
#[derive(Args, Debug)]
pub struct ModelsCommand {
    /// Maximum number of models to show
    #[arg(long, default_value = "20")]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl ModelsCommand {
    pub async fn execute(&self, config: &AppConfig, client: Option<&dyn LlmClient>) -> AppResult<()> {
        tracing::info!("Executing models command");

        let client = client.ok_or_else(|| {
            AppError::Config(format!(
                "LLM client unavailable. Set {} to list models.",
                config.api_key_var()
            ))
        })?;

        let mut models = client.list_models().await?;
        models.sort_by(|a, b| a.id.cmp(&b.id));
        models.truncate(self.limit);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&models)?);
        } else {
            for model in &models {
                match model.owned_by {
                    Some(ref owner) => println!("{} (owned by: {})", model.id, owner),
                    None => println!("{}", model.id),
                }
            }
        }

        Ok(())
    }
}
