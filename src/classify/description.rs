use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Affiliation, Side};

/// "for [the] <X>" where X runs to the next comma or end of string
static AFFILIATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfor\s+(?:the\s+)?([^,]+)").expect("valid regex"));

/// Spellings of the federal government folded into "United States"
const US_SYNONYMS: &[&str] = &["united states", "usa", "u.s."];

/// Substrings marking a description as federal-government counsel
const US_GOVERNMENT_MARKERS: &[&str] = &["united states", "solicitor general"];

/// Side keywords in precedence order; first hit wins
const SIDE_KEYWORDS: &[(&[&str], Side)] = &[
    (&["petitioner", "appellant"], Side::Petitioner),
    (&["respondent", "appellee"], Side::Respondent),
    (&["amicus"], Side::Amicus),
];

/// Signals extracted from a free-text advocate description
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DescriptionSignals {
    pub side: Side,
    pub affiliation: Affiliation,
    /// Looser than `affiliation`: any mention of the federal government
    pub mentions_us_government: bool,
}

impl Default for DescriptionSignals {
    fn default() -> Self {
        Self {
            side: Side::Unknown,
            affiliation: Affiliation::Unknown,
            mentions_us_government: false,
        }
    }
}

/// Parse an advocate description such as "for the United States, as amicus curiae"
pub fn parse_description(description: Option<&str>) -> DescriptionSignals {
    let description = match description.map(str::trim) {
        Some(d) if !d.is_empty() => d,
        _ => return DescriptionSignals::default(),
    };
    let lower = description.to_lowercase();

    DescriptionSignals {
        side: detect_side(&lower),
        affiliation: extract_affiliation(description),
        mentions_us_government: US_GOVERNMENT_MARKERS.iter().any(|m| lower.contains(m)),
    }
}

fn detect_side(lower: &str) -> Side {
    SIDE_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, side)| *side)
        .unwrap_or(Side::Unknown)
}

fn extract_affiliation(description: &str) -> Affiliation {
    let captured = AFFILIATION_PATTERN
        .captures(description)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty());

    match captured {
        Some(name) if US_SYNONYMS.iter().any(|s| name.eq_ignore_ascii_case(s)) => {
            Affiliation::Named("United States".to_string())
        }
        Some(name) => Affiliation::Named(name.to_string()),
        None => Affiliation::Unknown,
    }
}
