use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{Affiliation, Role, Side, SpeakerType};

/// One labeled speaking turn, written as a single JSONL line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusRecord {
    pub case_name: String,
    pub year: i32,
    pub docket_number: String,
    pub argument_date: Option<String>,
    pub speaker_name: String,
    pub speaker_type: SpeakerType,
    pub role: Role,
    pub case_side: Side,
    pub speaker_affiliation: Affiliation,
    /// Position among the case's emitted turns, starting at zero
    pub speaking_turn_index: usize,
    /// Cleaned, lower-cased utterance
    pub utterance_text: String,
    pub sentence_list: Vec<String>,
}

/// Streaming JSONL writer for corpus records
pub struct CorpusWriter<W: Write> {
    writer: W,
    records_written: usize,
}

impl CorpusWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("Failed to create file: {:?}", path))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> CorpusWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            records_written: 0,
        }
    }

    pub fn write_record(&mut self, record: &CorpusRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record).context("Failed to serialize record")?;
        self.writer.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and hand back the underlying writer
    pub fn finish(mut self) -> Result<W> {
        self.writer.flush().context("Failed to flush corpus output")?;
        Ok(self.writer)
    }
}

/// Parsed corpus file; unparseable lines are counted, not fatal
#[derive(Debug, Default)]
pub struct CorpusContents {
    pub records: Vec<CorpusRecord>,
    pub total_lines: usize,
    pub malformed_lines: usize,
}

pub fn read_corpus(path: &Path) -> Result<CorpusContents> {
    let file = File::open(path).with_context(|| format!("Failed to open corpus: {:?}", path))?;
    read_corpus_from(BufReader::new(file))
}

pub fn read_corpus_from<R: BufRead>(reader: R) -> Result<CorpusContents> {
    let mut contents = CorpusContents::default();

    for line in reader.lines() {
        let line = line.context("Failed to read corpus line")?;
        contents.total_lines += 1;
        match serde_json::from_str::<CorpusRecord>(&line) {
            Ok(record) => contents.records.push(record),
            Err(_) => contents.malformed_lines += 1,
        }
    }

    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> CorpusRecord {
        CorpusRecord {
            case_name: "Smith v. Jones".to_string(),
            year: 2015,
            docket_number: "14-280".to_string(),
            argument_date: None,
            speaker_name: "Jane Doe".to_string(),
            speaker_type: SpeakerType::Other,
            role: Role::StateCounsel,
            case_side: Side::Unknown,
            speaker_affiliation: Affiliation::Named("State of Ohio".to_string()),
            speaking_turn_index: 0,
            utterance_text: "thank you.".to_string(),
            sentence_list: vec!["Thank you.".to_string()],
        }
    }

    #[test]
    fn test_record_json_shape() {
        let value = serde_json::to_value(record()).unwrap();

        assert_eq!(value["speaker_type"], "Other");
        assert_eq!(value["role"], "State Counsel");
        assert_eq!(value["case_side"], "Unknown");
        assert_eq!(value["speaker_affiliation"], "State of Ohio");
        assert!(value["argument_date"].is_null());
        assert_eq!(value["speaking_turn_index"], 0);
    }

    #[test]
    fn test_writer_emits_one_line_per_record() {
        let mut writer = CorpusWriter::new(Vec::new());
        writer.write_record(&record()).unwrap();
        writer.write_record(&record()).unwrap();
        assert_eq!(writer.records_written(), 2);

        let bytes = writer.finish().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_read_corpus_counts_malformed() {
        let line = serde_json::to_string(&record()).unwrap();
        let input = format!("{line}\nnot json\n{line}\n");

        let contents = read_corpus_from(input.as_bytes()).unwrap();
        assert_eq!(contents.total_lines, 3);
        assert_eq!(contents.malformed_lines, 1);
        assert_eq!(contents.records.len(), 2);
    }
}
