//! Built-in prompt definitions.

use crate::types::PromptDefinition;

/// Identifier of the built-in synthesis prompt.
pub const SYNTHESIS_PROMPT_ID: &str = "docqa.synthesis.default";

/// Synthesis template. `context` holds the labelled excerpts, `query` the
/// user's question verbatim.
const SYNTHESIS_TEMPLATE: &str = r#"You are an AI research assistant. Your task is to answer a user's query based *only* on the provided document excerpts below. You must also identify common themes and cite your sources accurately using the provided 'Document Ref X' labels.

Provided Document Excerpts:
{{context}}

User Query: "{{query}}"

Instructions for your response:
1.  **Synthesized Answer:** Provide a direct and comprehensive answer to the User Query. Base your answer *strictly* on the information found in the "Provided Document Excerpts." Do not use any external knowledge. If the excerpts do not contain enough information to answer, explicitly state that.
2.  **Citations for Answer:** For every factual statement in your Synthesized Answer, you MUST cite the supporting 'Document Ref(s)' immediately after the statement or at the end of the sentence. Use the format (Document Ref X) or (Document Ref X, Document Ref Y).
3.  **Identified Themes:** After the answer, list any common themes that emerge from the excerpts relevant to the query. Each theme should be clearly described. If no clear themes emerge from the provided excerpts related to the query, state that.
4.  **Citations for Themes:** For each identified theme, you MUST cite all 'Document Ref(s)' that support or exemplify that theme. Use the format (Document Ref X, Document Ref Y).

Example Response Structure:

Synthesized Answer:
The sky is often blue due to Rayleigh scattering (Document Ref 1). Some reports also indicate that water can appear blue (Document Ref 2, Document Ref 3).

Identified Themes:
*   Atmospheric Optics: This theme is supported by discussions on light scattering (Document Ref 1).
*   Properties of Water: This theme is supported by observations about water's appearance (Document Ref 2, Document Ref 3).

Begin your response now.
"#;

/// The built-in synthesis prompt definition.
pub fn synthesis_prompt() -> PromptDefinition {
    PromptDefinition {
        id: SYNTHESIS_PROMPT_ID.to_string(),
        title: "Citation-grounded synthesis".to_string(),
        api_version: "1.0".to_string(),
        created_by: "docqa".to_string(),
        required_variables: vec!["context".to_string(), "query".to_string()],
        template: SYNTHESIS_TEMPLATE.to_string(),
    }
}

/// Look up a built-in definition by ID.
pub fn builtin(prompt_id: &str) -> Option<PromptDefinition> {
    match prompt_id {
        SYNTHESIS_PROMPT_ID => Some(synthesis_prompt()),
        _ => None,
    }
}
