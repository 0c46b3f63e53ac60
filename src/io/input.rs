use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::OyezCase;

/// Reasons a single case file is skipped
#[derive(Debug, Error)]
pub enum CaseFileError {
    #[error("unrecognized case file name: {0}")]
    FileName(String),

    #[error("failed to read case file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse case JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("case file has no transcript")]
    NoTranscript,
}

/// Year and docket encoded in a case file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFileName {
    pub year: i32,
    pub docket: String,
}

/// Parse `{year}.{docket}[-tNN].json`
///
/// Range archives such as `1900_1940.*` are rejected.
pub fn parse_case_file_name(file_name: &str) -> Result<CaseFileName, CaseFileError> {
    let stem = file_name
        .strip_suffix(".json")
        .ok_or_else(|| CaseFileError::FileName(file_name.to_string()))?;
    let (year_part, rest) = stem.split_once('.').unwrap_or((stem, ""));

    if year_part.contains('_') {
        return Err(CaseFileError::FileName(file_name.to_string()));
    }
    let year = year_part
        .parse::<i32>()
        .map_err(|_| CaseFileError::FileName(file_name.to_string()))?;

    let docket = strip_transcript_suffix(rest).to_string();

    Ok(CaseFileName { year, docket })
}

/// Drop a trailing `-tNN` transcript marker from a docket
fn strip_transcript_suffix(docket: &str) -> &str {
    match docket.rsplit_once("-t") {
        Some((base, n)) if !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()) => base,
        _ => docket,
    }
}

/// List `*.json` files in `dir`, sorted by file name
pub fn discover_case_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read input directory: {:?}", dir))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();

    files.sort();
    Ok(files)
}

/// Parse an Oyez case JSON string; documents without a transcript are rejected
pub fn parse_case_json(json: &str) -> Result<OyezCase, CaseFileError> {
    let case: OyezCase = serde_json::from_str(json)?;
    if case.transcript.is_none() {
        return Err(CaseFileError::NoTranscript);
    }
    Ok(case)
}

pub fn parse_case_file(path: &Path) -> Result<OyezCase, CaseFileError> {
    let content = std::fs::read_to_string(path)?;
    parse_case_json(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_file_name() {
        assert_eq!(
            parse_case_file_name("2015.14-280-t01.json").unwrap(),
            CaseFileName {
                year: 2015,
                docket: "14-280".to_string()
            }
        );
        assert_eq!(
            parse_case_file_name("2020.19-123.json").unwrap(),
            CaseFileName {
                year: 2020,
                docket: "19-123".to_string()
            }
        );
        assert_eq!(parse_case_file_name("2003.02-1.json").unwrap().docket, "02-1");
    }

    #[test]
    fn test_rejected_file_names() {
        assert!(matches!(
            parse_case_file_name("1900_1940.123.json"),
            Err(CaseFileError::FileName(_))
        ));
        assert!(parse_case_file_name("README.json").is_err());
        assert!(parse_case_file_name("2015.14-280.txt").is_err());
    }

    #[test]
    fn test_missing_transcript_rejected() {
        assert!(matches!(
            parse_case_json(r#"{"transcript": null}"#),
            Err(CaseFileError::NoTranscript)
        ));
        assert!(matches!(
            parse_case_json(r#"{"advocates": []}"#),
            Err(CaseFileError::NoTranscript)
        ));
        assert!(matches!(parse_case_json("{not json"), Err(CaseFileError::Parse(_))));
        assert!(matches!(parse_case_json("null"), Err(CaseFileError::Parse(_))));
    }

    #[test]
    fn test_discover_case_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["2016.b.json", "2015.a.json", "notes.txt"] {
            std::fs::write(dir.path().join(name), "{}").unwrap();
        }

        let files = discover_case_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["2015.a.json", "2016.b.json"]);
    }
}
