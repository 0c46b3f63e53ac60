use std::collections::{BTreeMap, HashSet};

use crate::io::CorpusContents;
use crate::models::SpeakerType;

/// Summary counts over a corpus file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CorpusStats {
    /// Every line in the file, parseable or not
    pub total_utterances: usize,
    pub unique_cases: usize,
    pub malformed_lines: usize,
    pub sg_utterances: usize,
    pub other_utterances: usize,
    pub by_role: BTreeMap<String, usize>,
}

pub fn compute_stats(contents: &CorpusContents) -> CorpusStats {
    let mut stats = CorpusStats {
        total_utterances: contents.total_lines,
        malformed_lines: contents.malformed_lines,
        ..Default::default()
    };
    let mut dockets = HashSet::new();

    for record in &contents.records {
        dockets.insert(record.docket_number.as_str());
        match record.speaker_type {
            SpeakerType::Sg => stats.sg_utterances += 1,
            SpeakerType::Other => stats.other_utterances += 1,
        }
        *stats.by_role.entry(record.role.to_string()).or_insert(0) += 1;
    }

    stats.unique_cases = dockets.len();
    stats
}
