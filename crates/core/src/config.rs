//! Configuration management for DocQA.
//!
//! Configuration is merged from several sources, later ones winning:
//! - Built-in defaults
//! - Config file (`.docqa/config.yaml`)
//! - Environment variables (a `.env` file is loaded first if present)
//! - Command-line flags
//!
//! The configuration is workspace-centric, with local state stored in `.docqa/`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Default LLM provider.
pub const DEFAULT_PROVIDER: &str = "groq";

/// Default chat model served by the default provider.
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Providers the LLM factory knows how to build.
pub const KNOWN_PROVIDERS: [&str; 2] = ["groq", "openai"];

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .docqa/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// LLM provider ("groq" or "openai")
    pub provider: String,

    /// Chat model identifier
    pub model: String,

    /// Custom provider base URL
    pub endpoint: Option<String>,

    /// Environment variable holding the API key (overrides the provider default)
    pub api_key_env: Option<String>,

    /// Request timeout for provider calls, in seconds
    pub timeout_secs: Option<u64>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    #[serde(rename = "apiKeyEnv")]
    api_key_env: Option<String>,
    #[serde(rename = "timeoutSecs")]
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: DEFAULT_PROVIDER.to_string(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: None,
            api_key_env: None,
            timeout_secs: None,
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `.env`, the YAML config file and the environment.
    ///
    /// Environment variables:
    /// - `DOCQA_WORKSPACE`: Override workspace path
    /// - `DOCQA_CONFIG`: Path to config file
    /// - `DOCQA_PROVIDER`: LLM provider
    /// - `DOCQA_MODEL`: Model identifier
    /// - `DOCQA_ENDPOINT`: Provider base URL
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use docqa_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Model: {}", config.model);
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_from(None, None)
    }

    /// Load configuration with an explicit workspace and/or config file.
    ///
    /// `workspace` and `config_file` take precedence over `DOCQA_WORKSPACE`
    /// and `DOCQA_CONFIG`, and decide which YAML file is merged. An explicit
    /// config file that does not exist is an error.
    pub fn load_from(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
            Err(e) if e.not_found() => {
                tracing::debug!("No .env file found, using process environment")
            }
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }

        let mut config = Self::default();

        if let Ok(workspace) = std::env::var("DOCQA_WORKSPACE") {
            config.workspace = PathBuf::from(workspace);
        }

        if let Ok(config_file) = std::env::var("DOCQA_CONFIG") {
            config.config_file = Some(PathBuf::from(config_file));
        }

        if let Some(workspace) = workspace {
            config.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            config.config_file = Some(config_file);
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        match config.config_file.clone() {
            Some(path) if !path.exists() => {
                return Err(AppError::Config(format!(
                    "Config file does not exist: {:?}",
                    path
                )));
            }
            Some(path) => config = config.merge_yaml(&path)?,
            None => {
                let default_path = config.docqa_dir().join("config.yaml");
                if default_path.exists() {
                    config = config.merge_yaml(&default_path)?;
                }
            }
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("DOCQA_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("DOCQA_MODEL") {
            config.model = model;
        }

        if let Ok(endpoint) = std::env::var("DOCQA_ENDPOINT") {
            config.endpoint = Some(endpoint);
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var_os("NO_COLOR").is_some() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        Ok(self.merge_file(config_file))
    }

    fn merge_file(&self, config_file: ConfigFile) -> Self {
        let mut result = self.clone();

        if let Some(llm) = config_file.llm {
            if let Some(provider) = llm.provider {
                result.provider = provider;
            }
            if let Some(model) = llm.model {
                result.model = model;
            }
            result.endpoint = llm.endpoint.or(result.endpoint);
            result.api_key_env = llm.api_key_env.or(result.api_key_env);
            result.timeout_secs = llm.timeout_secs.or(result.timeout_secs);
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        result
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            // Verbose mode implies debug logging
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .docqa directory.
    pub fn docqa_dir(&self) -> PathBuf {
        self.workspace.join(".docqa")
    }

    /// Name of the environment variable carrying the API key.
    pub fn api_key_var(&self) -> String {
        if let Some(ref var) = self.api_key_env {
            return var.clone();
        }

        match self.provider.to_lowercase().as_str() {
            "openai" => "OPENAI_API_KEY".to_string(),
            _ => "GROQ_API_KEY".to_string(),
        }
    }

    /// Resolve the API key from the environment.
    ///
    /// Returns `None` when the variable is unset or blank.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(self.api_key_var())
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Validate the configured provider.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.provider.to_lowercase();

        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.model.trim().is_empty() {
            return Err(AppError::Config("Model name cannot be empty".to_string()));
        }

        if let Some(ref endpoint) = self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(AppError::Config(format!(
                    "Endpoint must start with http:// or https://: {}",
                    endpoint
                )));
            }
        }

        Ok(())
    }
}
