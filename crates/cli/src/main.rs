//! DocQA CLI
//!
//! Main entry point for the docqa command-line tool.
//! Answers questions over retrieved document chunks with cited sources.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ModelsCommand, PromptsCommand, SourcesCommand};
use docqa_core::{config::AppConfig, logging, AppResult};
use docqa_llm::{create_client, ProviderSettings};
use std::path::PathBuf;
use std::time::Duration;

/// DocQA - citation-grounded answers over your documents
#[derive(Parser, Debug)]
#[command(name = "docqa")]
#[command(about = "Citation-grounded answers over your documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "DOCQA_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "DOCQA_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// LLM provider (groq, openai)
    #[arg(short, long, global = true, env = "DOCQA_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "DOCQA_MODEL")]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question from retrieved chunks, with citations
    Ask(AskCommand),

    /// List source documents in a chunks file
    Sources(SourcesCommand),

    /// List models served by the provider
    Models(ModelsCommand),

    /// List or show prompt definitions
    Prompts(PromptsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.workspace.clone(), cli.config.clone())?.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("DocQA starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);

    config.validate()?;

    // Built once and passed explicitly to every command that needs it
    let settings = ProviderSettings::new(&config.provider)
        .with_api_key(config.resolve_api_key())
        .with_endpoint(config.endpoint.clone())
        .with_timeout(config.timeout_secs.map(Duration::from_secs));
    let client = create_client(&settings);

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Sources(_) => "sources",
        Commands::Models(_) => "models",
        Commands::Prompts(_) => "prompts",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config, client.as_deref()).await,
        Commands::Sources(cmd) => cmd.execute().await,
        Commands::Models(cmd) => cmd.execute(&config, client.as_deref()).await,
        Commands::Prompts(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
