use std::sync::LazyLock;

use regex::Regex;

/// Audience-reaction annotations inserted by transcribers
static ANNOTATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[laughter\]|\[inaudible\]|\(applause\)").expect("valid regex")
});

static WHITESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strip annotations, collapse whitespace and trim; case is preserved
pub fn clean_text(text: &str) -> String {
    let without_annotations = ANNOTATION_PATTERN.replace_all(text, "");
    WHITESPACE_PATTERN
        .replace_all(&without_annotations, " ")
        .trim()
        .to_string()
}

/// Form stored in `utterance_text`
pub fn normalize_utterance(cleaned: &str) -> String {
    cleaned.to_lowercase()
}
