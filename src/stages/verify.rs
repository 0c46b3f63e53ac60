use std::time::Duration;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::io::CorpusRecord;
use crate::llm::{
    build_verify_prompt, verify_tool, ToolClient, VerificationAnswer, VERIFY_SYSTEM_PROMPT,
};
use crate::models::SpeakerType;

/// Configuration for the LLM spot-check
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Total records to check, split evenly between SG and Other
    pub sample_size: usize,
    /// Seed for reproducible samples
    pub seed: Option<u64>,
    /// Pause between requests
    pub delay_ms: u64,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            sample_size: 10,
            seed: None,
            delay_ms: 500,
        }
    }
}

/// A record where the corpus label and the model disagree
#[derive(Debug, Clone)]
pub struct Discrepancy {
    pub record: CorpusRecord,
    pub llm_says_us: bool,
    pub reasoning: String,
}

#[derive(Debug, Default)]
pub struct VerifyReport {
    pub sampled: usize,
    pub agreed: usize,
    pub failed_calls: usize,
    pub discrepancies: Vec<Discrepancy>,
}

impl VerifyReport {
    /// Agreement as a percentage of the sample; failed calls count against it
    pub fn agreement_rate(&self) -> f64 {
        if self.sampled == 0 {
            0.0
        } else {
            self.agreed as f64 / self.sampled as f64 * 100.0
        }
    }
}

/// Draw a balanced, shuffled sample of SG and Other records
pub fn sample_records<'a>(
    records: &'a [CorpusRecord],
    config: &VerifyConfig,
) -> Vec<&'a CorpusRecord> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let per_group = config.sample_size / 2;

    let (sg, other): (Vec<&CorpusRecord>, Vec<&CorpusRecord>) = records
        .iter()
        .partition(|r| r.speaker_type == SpeakerType::Sg);

    let mut sample: Vec<&CorpusRecord> = sg.choose_multiple(&mut rng, per_group).copied().collect();
    sample.extend(other.choose_multiple(&mut rng, per_group).copied());
    sample.shuffle(&mut rng);
    sample
}

/// Ask the model about each sampled record and compare with its label
pub async fn execute_verify(
    client: &dyn ToolClient,
    records: &[CorpusRecord],
    config: &VerifyConfig,
) -> VerifyReport {
    let sample = sample_records(records, config);
    let tool = verify_tool();
    let mut report = VerifyReport {
        sampled: sample.len(),
        ..Default::default()
    };

    info!("Verifying {} records", sample.len());

    for (i, record) in sample.into_iter().enumerate() {
        if i > 0 && config.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.delay_ms)).await;
        }

        let prompt = build_verify_prompt(
            &record.case_name,
            record.year,
            &record.speaker_name,
            &record.utterance_text,
        );
        let answer = client
            .call_tool(VERIFY_SYSTEM_PROMPT, &prompt, &tool)
            .await
            .and_then(|value| {
                serde_json::from_value::<VerificationAnswer>(value)
                    .context("Malformed verification answer")
            });

        let answer = match answer {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Verification failed for {}: {:#}", record.speaker_name, e);
                report.failed_calls += 1;
                continue;
            }
        };

        let labeled_sg = record.speaker_type == SpeakerType::Sg;
        if labeled_sg == answer.is_representing_us {
            report.agreed += 1;
        } else {
            report.discrepancies.push(Discrepancy {
                record: record.clone(),
                llm_says_us: answer.is_representing_us,
                reasoning: answer.reasoning,
            });
        }
    }

    report
}
