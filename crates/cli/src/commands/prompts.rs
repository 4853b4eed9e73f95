//! Prompts command handler.

use clap::Args;
use docqa_core::{config::AppConfig, AppResult};
use docqa_prompt::{list_prompts, load_prompt_or_builtin, SYNTHESIS_PROMPT_ID};

/// List prompt definitions, or show one
#[derive(Args, Debug)]
pub struct PromptsCommand {
    /// Print the template of this prompt instead of listing
    #[arg(long)]
    pub show: Option<String>,
}

impl PromptsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        if let Some(ref id) = self.show {
            let prompt = load_prompt_or_builtin(&config.workspace, id)?;
            println!("# {} ({})", prompt.title, prompt.id);
            println!("{}", prompt.template);
            return Ok(());
        }

        let overrides = list_prompts(&config.workspace)?;
        if !overrides.iter().any(|id| id == SYNTHESIS_PROMPT_ID) {
            println!("{} (built-in)", SYNTHESIS_PROMPT_ID);
        }
        for id in overrides {
            println!("{} (workspace)", id);
        }

        Ok(())
    }
}
