//! Prompt builder for rendering templates.

use crate::types::{BuiltPrompt, PromptDefinition};
use docqa_core::{AppError, AppResult};
use handlebars::Handlebars;
use std::collections::HashMap;

/// Build a prompt from a definition and input variables.
///
/// Every variable listed in `definition.required_variables` must be present.
/// Values are inserted verbatim (no HTML escaping).
///
/// # Example
/// ```no_run
/// use docqa_prompt::{build_prompt, defaults};
/// use std::collections::HashMap;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut vars = HashMap::new();
/// vars.insert("context".to_string(), "Document Ref 1:\n\"foo\"\n".to_string());
/// vars.insert("query".to_string(), "what is foo?".to_string());
///
/// let built = build_prompt(&defaults::synthesis_prompt(), vars)?;
/// println!("{}", built.user);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(
    definition: &PromptDefinition,
    variables: HashMap<String, String>,
) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let missing: Vec<&str> = definition
        .required_variables
        .iter()
        .filter(|name| !variables.contains_key(name.as_str()))
        .map(String::as_str)
        .collect();

    if !missing.is_empty() {
        return Err(AppError::Prompt(format!(
            "Prompt '{}' is missing variables: {}",
            definition.id,
            missing.join(", ")
        )));
    }

    let rendered = render_template(&definition.template, &variables)?;

    Ok(BuiltPrompt::new(rendered, definition.id.clone(), variables))
}

/// Check that `definition`'s template references every variable in `names`.
///
/// Accepts both `{{name}}` and `{{ name }}`.
pub fn ensure_references(definition: &PromptDefinition, names: &[&str]) -> AppResult<()> {
    let missing: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| !references(&definition.template, name))
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(AppError::Prompt(format!(
        "Prompt '{}' must reference {}",
        definition.id,
        missing
            .iter()
            .map(|name| format!("{{{{{}}}}}", name))
            .collect::<Vec<_>>()
            .join(", ")
    )))
}

fn references(template: &str, name: &str) -> bool {
    template.contains(&format!("{{{{{}}}}}", name))
        || template.contains(&format!("{{{{ {} }}}}", name))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<String, String>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text prompts: never escape quotes or angle brackets
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
