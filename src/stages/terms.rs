use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::llm::{
    build_terms_prompt, terms_tool, ServiceTermsAnswer, ToolClient, TERMS_SYSTEM_PROMPT,
};
use crate::roster::TenureRegistry;

/// Configuration for the service-terms lookup
#[derive(Debug, Clone)]
pub struct TermsConfig {
    /// Pause between requests
    pub delay_ms: u64,
}

impl Default for TermsConfig {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

/// Result of a service-terms lookup run
#[derive(Debug)]
pub struct TermsResult {
    pub registry: TenureRegistry,
    /// Names whose lookup failed
    pub failures: Vec<String>,
}

/// Read attorney names, one per line; blank lines and `#` comments are ignored
pub fn read_names_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read names file: {:?}", path))?;
    Ok(parse_names_list(&content))
}

/// Parse a names list into a sorted, de-duplicated vector
pub fn parse_names_list(content: &str) -> Vec<String> {
    let mut names: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Look up service terms for every name and build a registry from the answers
///
/// A failed lookup is logged and the name left out of the registry.
pub async fn execute_terms(
    client: &dyn ToolClient,
    names: &[String],
    config: &TermsConfig,
) -> TermsResult {
    let tool = terms_tool();
    let mut entries = Vec::with_capacity(names.len());
    let mut failures = Vec::new();

    info!("Querying service terms for {} names", names.len());

    for (i, name) in names.iter().enumerate() {
        if i > 0 && config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.delay_ms)).await;
        }

        let answer = client
            .call_tool(TERMS_SYSTEM_PROMPT, &build_terms_prompt(name), &tool)
            .await
            .and_then(|value| {
                serde_json::from_value::<ServiceTermsAnswer>(value)
                    .context("Malformed service terms answer")
            });

        match answer {
            Ok(answer) => {
                info!("{}: {} terms", name, answer.terms.len());
                if let Some(notes) = &answer.notes {
                    debug!("{}: {}", name, notes);
                }
                entries.push((name.clone(), answer.terms));
            }
            Err(e) => {
                warn!("Lookup failed for {}: {:#}", name, e);
                failures.push(name.clone());
            }
        }
    }

    TermsResult {
        registry: TenureRegistry::from_entries(entries),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::llm::client::ScriptedClient;
    use crate::models::ServiceInterval;

    #[test]
    fn test_parse_names_list() {
        let names = parse_names_list(
            "# Solicitors General\nSeth P. Waxman\n\n  Elena Kagan  \nSeth P. Waxman\n",
        );
        assert_eq!(names, vec!["Elena Kagan", "Seth P. Waxman"]);
    }

    #[tokio::test]
    async fn test_execute_terms_skips_failures() {
        let client = ScriptedClient::new(vec![
            Ok(json!({"name": "Elena Kagan", "terms": [{"start_year": 2009, "end_year": 2010}],
                      "notes": "Solicitor General"})),
            Err("rate limited".to_string()),
            Ok(json!({"terms": "not a list"})),
            Ok(json!({"name": "Sri Srinivasan",
                      "terms": [{"start_year": 2011, "end_year": 2013}]})),
        ]);
        let names: Vec<String> = [
            "Elena Kagan",
            "Noel J. Francisco",
            "Jeffrey B. Wall",
            "Sri Srinivasan",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let result = execute_terms(&client, &names, &TermsConfig { delay_ms: 0 }).await;

        assert_eq!(result.failures, vec!["Noel J. Francisco", "Jeffrey B. Wall"]);
        assert_eq!(result.registry.len(), 2);
        assert_eq!(
            result.registry.lookup("Elena Kagan"),
            &[ServiceInterval::closed(2009, 2010)]
        );
        assert!(client.prompts()[0].contains("Elena Kagan"));
    }
}
