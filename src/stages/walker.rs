use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::{debug, info, warn};

use super::segment::{split_sentences, SegmenterConfig};
use super::text::{clean_text, normalize_utterance};
use crate::classify::RoleClassifier;
use crate::io::{
    discover_case_files, parse_case_file, parse_case_file_name, CaseFileName, CorpusRecord,
    CorpusWriter,
};
use crate::models::{OyezCase, SpeakerType};

const UNKNOWN_CASE_NAME: &str = "Unknown";
const UNKNOWN_SPEAKER_NAME: &str = "Unknown";

/// Configuration for a corpus build
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// First argument year to include
    pub start_year: i32,
    /// Last argument year to include
    pub end_year: i32,
    pub segmenter: SegmenterConfig,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            start_year: 2000,
            end_year: 2024,
            segmenter: SegmenterConfig::default(),
        }
    }
}

impl WalkerConfig {
    pub fn includes_year(&self, year: i32) -> bool {
        (self.start_year..=self.end_year).contains(&year)
    }
}

/// Summary of a corpus build
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkResult {
    pub files_seen: usize,
    pub cases_processed: usize,
    /// Files whose name, content or transcript was unusable
    pub cases_skipped: usize,
    pub out_of_range: usize,
    pub records_written: usize,
    pub sg_records: usize,
}

/// Walk every case file in `input_dir` and stream labeled turns to `writer`
///
/// One file is fully processed before the next. Bad files are logged and
/// skipped; only I/O errors on the output abort the run.
pub fn execute_walk<W: Write>(
    input_dir: &Path,
    writer: &mut CorpusWriter<W>,
    classifier: &RoleClassifier<'_>,
    config: &WalkerConfig,
) -> Result<WalkResult> {
    let files = discover_case_files(input_dir)?;
    let mut result = WalkResult {
        files_seen: files.len(),
        ..Default::default()
    };

    info!("Found {} case files in {:?}", files.len(), input_dir);

    for path in &files {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let case_file = match parse_case_file_name(&file_name) {
            Ok(parsed) => parsed,
            Err(e) => {
                debug!("Skipping {}: {}", file_name, e);
                result.cases_skipped += 1;
                continue;
            }
        };

        if !config.includes_year(case_file.year) {
            result.out_of_range += 1;
            continue;
        }

        let case = match parse_case_file(path) {
            Ok(case) => case,
            Err(e) => {
                warn!("Skipping {}: {}", file_name, e);
                result.cases_skipped += 1;
                continue;
            }
        };

        let records = extract_case_records(&case, &case_file, classifier, &config.segmenter);
        debug!("{}: {} turns", file_name, records.len());

        for record in &records {
            writer.write_record(record)?;
            if record.speaker_type == SpeakerType::Sg {
                result.sg_records += 1;
            }
        }
        result.records_written += records.len();
        result.cases_processed += 1;
    }

    info!(
        "Processed {} cases ({} skipped, {} outside {}-{}), {} turns ({} SG)",
        result.cases_processed,
        result.cases_skipped,
        result.out_of_range,
        config.start_year,
        config.end_year,
        result.records_written,
        result.sg_records
    );

    Ok(result)
}

/// Turn one case document into labeled corpus records
///
/// Justices, speakerless turns and turns with no text left after cleaning
/// are dropped. Turn indices count emitted records only.
pub fn extract_case_records(
    case: &OyezCase,
    case_file: &CaseFileName,
    classifier: &RoleClassifier<'_>,
    segmenter: &SegmenterConfig,
) -> Vec<CorpusRecord> {
    let Some(transcript) = &case.transcript else {
        return Vec::new();
    };

    let case_name = transcript
        .title
        .clone()
        .unwrap_or_else(|| UNKNOWN_CASE_NAME.to_string());
    let docket_number = case
        .docket_number
        .clone()
        .unwrap_or_else(|| case_file.docket.clone());
    let argument_date = argument_date(case);

    let mut records = Vec::new();

    for turn in transcript.sections.iter().flat_map(|s| s.turns.iter()) {
        let Some(speaker) = &turn.speaker else {
            continue;
        };
        if speaker.is_justice() {
            continue;
        }

        let cleaned = clean_text(&turn.joined_text());
        if cleaned.is_empty() {
            continue;
        }

        let classification = classifier.classify(
            speaker.name.as_deref(),
            speaker.id.as_deref(),
            &case.advocates,
            Some(case_file.year),
        );

        records.push(CorpusRecord {
            case_name: case_name.clone(),
            year: case_file.year,
            docket_number: docket_number.clone(),
            argument_date: argument_date.clone(),
            speaker_name: speaker
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_SPEAKER_NAME.to_string()),
            speaker_type: classification.speaker_type(),
            role: classification.role,
            case_side: classification.side,
            speaker_affiliation: classification.affiliation,
            speaking_turn_index: records.len(),
            sentence_list: split_sentences(&cleaned, segmenter),
            utterance_text: normalize_utterance(&cleaned),
        });
    }

    records
}

/// Explicit date string, else the argument timestamp as `YYYY-MM-DD`
fn argument_date(case: &OyezCase) -> Option<String> {
    case.argument_date.clone().or_else(|| {
        case.unix_timestamp
            .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
            .map(|dt| dt.format("%Y-%m-%d").to_string())
    })
}
