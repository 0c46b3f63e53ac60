use serde::Deserialize;

use super::ToolSpec;
use crate::models::ServiceInterval;

/// Characters of an utterance shown to the model during verification
pub const VERIFY_EXCERPT_CHARS: usize = 200;

pub const TERMS_SYSTEM_PROMPT: &str =
    "You are a legal historian specializing in the US Solicitor General's office. \
     Report only service you are confident about.";

pub const VERIFY_SYSTEM_PROMPT: &str = "You are a legal expert on the US Supreme Court.";

pub const TERMS_TOOL_NAME: &str = "submit_service_terms";
pub const VERIFY_TOOL_NAME: &str = "submit_verification";

/// Structured answer to a service-terms lookup
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceTermsAnswer {
    #[serde(default)]
    pub terms: Vec<ServiceInterval>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Structured answer to a corpus spot-check
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationAnswer {
    pub is_representing_us: bool,
    #[serde(default)]
    pub reasoning: String,
}

pub fn terms_tool() -> ToolSpec {
    ToolSpec {
        name: TERMS_TOOL_NAME.to_string(),
        description: "Submit the attorney's periods of service in the Office of the Solicitor General"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "terms": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "start_year": {"type": "integer"},
                            "end_year": {
                                "type": ["integer", "null"],
                                "description": "null if still serving"
                            }
                        },
                        "required": ["start_year", "end_year"]
                    }
                },
                "notes": {"type": "string", "description": "Brief details on roles held"}
            },
            "required": ["name", "terms"]
        }),
    }
}

pub fn verify_tool() -> ToolSpec {
    ToolSpec {
        name: VERIFY_TOOL_NAME.to_string(),
        description: "Submit whether the speaker argued for the United States in this case"
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "is_representing_us": {"type": "boolean"},
                "reasoning": {"type": "string", "description": "Brief explanation"}
            },
            "required": ["is_representing_us", "reasoning"]
        }),
    }
}

pub fn build_terms_prompt(name: &str) -> String {
    format!(
        "Provide the years of service for {name} in the Office of the Solicitor General (OSG) \
         of the United States.\n\
         Include any role (Solicitor General, Principal Deputy, Deputy, Assistant to the \
         Solicitor General, Counselor).\n\
         If they had multiple stints, list each one separately.\n\
         Use null for end_year if they are still serving.\n\
         Return an empty terms list if they never served in the office."
    )
}

pub fn build_verify_prompt(
    case_name: &str,
    year: i32,
    speaker_name: &str,
    utterance: &str,
) -> String {
    let excerpt: String = utterance.chars().take(VERIFY_EXCERPT_CHARS).collect();
    format!(
        "Case: {case_name} ({year})\n\
         Speaker: {speaker_name}\n\
         Excerpt: \"{excerpt}...\"\n\n\
         Question: Was {speaker_name} representing the United States (e.g., as Solicitor \
         General, Deputy SG, Assistant to the SG) in oral argument in this specific case?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_prompt_truncates_excerpt() {
        let utterance = "x".repeat(500);
        let prompt = build_verify_prompt("A v. B", 2010, "Jane Doe", &utterance);

        assert!(prompt.contains("Case: A v. B (2010)"));
        assert!(prompt.contains(&format!("\"{}...\"", "x".repeat(VERIFY_EXCERPT_CHARS))));
        assert!(!prompt.contains(&"x".repeat(VERIFY_EXCERPT_CHARS + 1)));
    }

    #[test]
    fn test_terms_answer_parsing() {
        let answer: ServiceTermsAnswer = serde_json::from_value(serde_json::json!({
            "name": "Elena Kagan",
            "terms": [{"start_year": 2009, "end_year": 2010}],
            "notes": "Solicitor General"
        }))
        .unwrap();

        assert_eq!(answer.terms, vec![ServiceInterval::closed(2009, 2010)]);
        assert_eq!(answer.notes.as_deref(), Some("Solicitor General"));
    }

    #[test]
    fn test_tool_names() {
        assert_eq!(terms_tool().name, TERMS_TOOL_NAME);
        assert_eq!(verify_tool().name, VERIFY_TOOL_NAME);
    }
}
