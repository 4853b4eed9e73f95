//! Prompt loader for workspace prompt overrides.
//!
//! A workspace can replace a built-in prompt by placing `<id>.yml` in
//! `.docqa/prompts/`.

use crate::builder::ensure_references;
use crate::defaults;
use crate::types::PromptDefinition;
use docqa_core::{AppError, AppResult};
use std::path::{Path, PathBuf};

fn prompts_dir(workspace_path: &Path) -> PathBuf {
    workspace_path.join(".docqa/prompts")
}

/// Load a prompt definition by ID from the workspace.
///
/// # Arguments
/// * `workspace_path` - Root workspace directory containing `.docqa/`
/// * `prompt_id` - Prompt identifier (e.g., "docqa.synthesis.default")
///
/// # Example
/// ```no_run
/// use docqa_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("."), "docqa.synthesis.default")?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let prompt_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));

    tracing::debug!("Loading prompt from: {:?}", prompt_file);

    if !prompt_file.exists() {
        return Err(AppError::Prompt(format!(
            "Prompt file not found: {:?}",
            prompt_file
        )));
    }

    let contents = std::fs::read_to_string(&prompt_file).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to read prompt file {:?}: {}",
            prompt_file, e
        ))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!(
            "Failed to parse prompt YAML {:?}: {}",
            prompt_file, e
        ))
    })?;

    if definition.id != prompt_id {
        return Err(AppError::Prompt(format!(
            "Prompt file {:?} declares id '{}', expected '{}'",
            prompt_file, definition.id, prompt_id
        )));
    }

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Load a workspace override if one exists, otherwise the built-in prompt.
pub fn load_prompt_or_builtin(workspace_path: &Path, prompt_id: &str) -> AppResult<PromptDefinition> {
    let override_file = prompts_dir(workspace_path).join(format!("{}.yml", prompt_id));
    if override_file.exists() {
        return load_prompt(workspace_path, prompt_id);
    }

    defaults::builtin(prompt_id)
        .ok_or_else(|| AppError::Prompt(format!("Unknown prompt: {}", prompt_id)))
}

/// List all prompt override IDs in the workspace.
pub fn list_prompts(workspace_path: &Path) -> AppResult<Vec<String>> {
    let dir = prompts_dir(workspace_path);

    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut prompt_ids = Vec::new();

    for entry in walkdir::WalkDir::new(&dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("yml") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                prompt_ids.push(stem.to_string());
            }
        }
    }

    prompt_ids.sort();
    Ok(prompt_ids)
}

/// Validate a prompt definition.
fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    if !def.api_version.contains('.') {
        return Err(AppError::Prompt(format!(
            "Invalid apiVersion format: {}. Expected format: 'x.y'",
            def.api_version
        )));
    }

    // Overrides of a built-in must keep the built-in's variables
    if let Some(builtin) = defaults::builtin(&def.id) {
        let names: Vec<&str> = builtin
            .required_variables
            .iter()
            .map(String::as_str)
            .collect();
        ensure_references(def, &names)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::SYNTHESIS_PROMPT_ID;
    use std::fs;
    use tempfile::TempDir;

    fn write_prompt(dir: &Path, id: &str, body: &str) -> PathBuf {
        let prompts = prompts_dir(dir);
        fs::create_dir_all(&prompts).unwrap();
        let file_path = prompts.join(format!("{}.yml", id));
        fs::write(&file_path, body).unwrap();
        file_path
    }

    fn valid_yaml(id: &str, template: &str) -> String {
        format!(
            "id: {}\ntitle: \"Test Prompt\"\napiVersion: \"1.0\"\ncreatedBy: test\ntemplate: \"{}\"\n",
            id, template
        )
    }

    #[test]
    fn test_load_valid_prompt() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "test.prompt", &valid_yaml("test.prompt", "Q: {{query}}"));

        let prompt = load_prompt(temp_dir.path(), "test.prompt").unwrap();
        assert_eq!(prompt.id, "test.prompt");
        assert_eq!(prompt.title, "Test Prompt");
    }

    #[test]
    fn test_load_nonexistent_prompt() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_prompt(temp_dir.path(), "nonexistent").is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "invalid", "invalid: yaml: content:");
        assert!(load_prompt(temp_dir.path(), "invalid").is_err());
    }

    #[test]
    fn test_bad_api_version_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let yaml = "id: p\ntitle: P\napiVersion: \"1\"\ntemplate: x\n";
        write_prompt(temp_dir.path(), "p", yaml);
        assert!(load_prompt(temp_dir.path(), "p").is_err());
    }

    #[test]
    fn test_builtin_used_without_override() {
        let temp_dir = TempDir::new().unwrap();
        let prompt = load_prompt_or_builtin(temp_dir.path(), SYNTHESIS_PROMPT_ID).unwrap();
        assert_eq!(prompt.id, SYNTHESIS_PROMPT_ID);
        assert_eq!(prompt.created_by, "docqa");
    }

    #[test]
    fn test_override_replaces_builtin() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(
            temp_dir.path(),
            SYNTHESIS_PROMPT_ID,
            &valid_yaml(SYNTHESIS_PROMPT_ID, "{{context}} -- {{query}}"),
        );

        let prompt = load_prompt_or_builtin(temp_dir.path(), SYNTHESIS_PROMPT_ID).unwrap();
        assert_eq!(prompt.template, "{{context}} -- {{query}}");
        assert_eq!(prompt.created_by, "test");
    }

    #[test]
    fn test_override_must_keep_builtin_variables() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(
            temp_dir.path(),
            SYNTHESIS_PROMPT_ID,
            &valid_yaml(SYNTHESIS_PROMPT_ID, "only {{query}}"),
        );

        match load_prompt_or_builtin(temp_dir.path(), SYNTHESIS_PROMPT_ID) {
            Err(AppError::Prompt(msg)) => assert!(msg.contains("{{context}}")),
            other => panic!("Expected prompt error, got {:?}", other),
        }
    }

    #[test]
    fn test_override_with_mismatched_id_rejected() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(
            temp_dir.path(),
            SYNTHESIS_PROMPT_ID,
            &valid_yaml("other", "only {{query}}"),
        );

        match load_prompt_or_builtin(temp_dir.path(), SYNTHESIS_PROMPT_ID) {
            Err(AppError::Prompt(msg)) => assert!(msg.contains("other")),
            other => panic!("Expected prompt error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_prompt_without_override() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_prompt_or_builtin(temp_dir.path(), "nope").is_err());
    }

    #[test]
    fn test_list_prompts() {
        let temp_dir = TempDir::new().unwrap();
        write_prompt(temp_dir.path(), "prompt2", &valid_yaml("prompt2", "x"));
        write_prompt(temp_dir.path(), "prompt1", &valid_yaml("prompt1", "x"));

        let prompts = list_prompts(temp_dir.path()).unwrap();
        assert_eq!(prompts, vec!["prompt1".to_string(), "prompt2".to_string()]);
    }

    #[test]
    fn test_list_prompts_without_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(list_prompts(temp_dir.path()).unwrap().is_empty());
    }
}
