//! Prompt types for DocQA.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A prompt definition, built in or loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Creator identifier
    #[serde(rename = "createdBy", default)]
    pub created_by: String,

    /// Variables the template must reference
    #[serde(rename = "requiredVariables", default)]
    pub required_variables: Vec<String>,

    /// Template string with Handlebars syntax
    pub template: String,
}

/// A fully rendered prompt ready for LLM execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// User message
    pub user: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Template variables that were resolved
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: HashMap<String, String>,
}

impl BuiltPrompt {
    /// Create a new built prompt.
    pub fn new(
        user: String,
        source_prompt_id: String,
        resolved_variables: HashMap<String, String>,
    ) -> Self {
        Self {
            user,
            metadata: BuiltPromptMetadata {
                source_prompt_id,
                resolved_variables,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_definition_deserialization() {
        let yaml = r#"
id: docqa.synthesis.terse
title: Terse synthesis
apiVersion: "1.0"
createdBy: test
requiredVariables: [context, query]
template: "{{context}} / {{query}}"
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id, "docqa.synthesis.terse");
        assert_eq!(def.required_variables, vec!["context", "query"]);
        assert_eq!(def.created_by, "test");
    }

    #[test]
    fn test_optional_fields_default() {
        let yaml = "id: p\ntitle: P\napiVersion: \"1.0\"\ntemplate: x\n";
        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert!(def.created_by.is_empty());
        assert!(def.required_variables.is_empty());
    }

    #[test]
    fn test_built_prompt_metadata_serialization() {
        let mut vars = HashMap::new();
        vars.insert("query".to_string(), "what?".to_string());

        let built = BuiltPrompt::new("User message".to_string(), "p".to_string(), vars);
        let json = serde_json::to_value(&built).unwrap();

        assert_eq!(json["user"], "User message");
        assert_eq!(json["metadata"]["sourcePromptId"], "p");
        assert_eq!(json["metadata"]["resolvedVariables"]["query"], "what?");
    }
}
