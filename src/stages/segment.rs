/// Configuration for rule-based sentence segmentation
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Lower-cased abbreviations (without the final period) that never end a sentence
    pub abbreviations: Vec<String>,
    /// Abbreviations that only suppress a break when a number follows ("No. 14-280")
    pub numeric_abbreviations: Vec<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        let to_strings =
            |words: &[&str]| -> Vec<String> { words.iter().map(|w| w.to_string()).collect() };
        Self {
            abbreviations: to_strings(&[
                "mr", "mrs", "ms", "dr", "jr", "sr", "st", "gen", "gov", "sen", "rep", "hon",
                "prof", "v", "vs", "u.s", "u.s.c", "e.g", "i.e", "etc", "cf", "id", "inc", "co",
                "corp", "ltd", "llc", "dept", "ct", "cir", "app", "supp", "stat", "rev", "fed",
                "jan", "feb", "mar", "apr", "aug", "sept", "oct", "nov", "dec",
            ]),
            numeric_abbreviations: to_strings(&["no", "nos", "art", "sec", "p", "pp", "vol"]),
        }
    }
}

const TERMINATORS: &[char] = &['.', '?', '!'];
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];
const OPENERS: &[char] = &['"', '\'', '(', '[', '\u{201c}', '\u{2018}'];

/// Split cleaned text into sentences
///
/// Expects whitespace already collapsed. A break happens after a token
/// ending in `.`, `?` or `!` (optionally followed by closing quotes or
/// brackets) when the next token starts with an uppercase letter, a digit
/// or an opening quote. Abbreviations and single-letter initials suppress
/// breaks after a period.
pub fn split_sentences(text: &str, config: &SegmenterConfig) -> Vec<String> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut sentences = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (i, token) in tokens.iter().enumerate() {
        current.push(token);

        let next = tokens.get(i + 1).copied();
        if is_sentence_end(token, next, config) {
            sentences.push(current.join(" "));
            current.clear();
        }
    }

    if !current.is_empty() {
        sentences.push(current.join(" "));
    }

    sentences
}

fn is_sentence_end(token: &str, next: Option<&str>, config: &SegmenterConfig) -> bool {
    let core = token.trim_end_matches(CLOSERS);
    let Some(last) = core.chars().last() else {
        return false;
    };
    if !TERMINATORS.contains(&last) {
        return false;
    }

    let Some(next) = next else {
        return true;
    };
    let next_core = next.trim_start_matches(OPENERS);
    let starts_sentence = next.starts_with(OPENERS)
        || next_core
            .chars()
            .next()
            .is_some_and(|c| c.is_uppercase() || c.is_ascii_digit());
    if !starts_sentence {
        return false;
    }

    if last != '.' || core.ends_with("..") {
        return true;
    }

    let word = core
        .trim_start_matches(OPENERS)
        .trim_end_matches('.')
        .to_lowercase();

    if is_initial(&word) || config.abbreviations.contains(&word) {
        return false;
    }

    let next_is_numeric = next_core.chars().next().is_some_and(|c| c.is_ascii_digit());
    !(next_is_numeric && config.numeric_abbreviations.contains(&word))
}

/// A single letter, as in "Michael R. Dreeben"
fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}
