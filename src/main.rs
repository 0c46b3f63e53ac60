use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sgcorpus::io::parse_case_file_name;
use sgcorpus::{
    compute_stats, execute_terms, execute_verify, execute_walk, parse_case_file, read_corpus,
    read_names_file, AnthropicClient, AnthropicConfig, CorpusWriter, RoleClassifier,
    TenureRegistry, TermsConfig, VerifyConfig, WalkerConfig,
};

#[derive(Parser)]
#[command(name = "sgcorpus")]
#[command(author, version, long_about = None)]
#[command(about = "Supreme Court oral-argument corpus with Solicitor General labels")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the labeled corpus from a directory of Oyez case files
    Build {
        /// Directory of case JSON files
        #[arg(short, long, default_value = "oyez/cases")]
        input_dir: PathBuf,

        /// Output corpus file (JSON lines)
        #[arg(short, long, default_value = "scotus_corpus.jsonl")]
        output: PathBuf,

        /// Tenure registry file; a missing file runs with an empty registry
        #[arg(short, long, default_value = "sg_terms.json")]
        registry: PathBuf,

        /// First argument year to include
        #[arg(long, default_value = "2000")]
        start_year: i32,

        /// Last argument year to include
        #[arg(long, default_value = "2024")]
        end_year: i32,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Classify a single speaker in one case file
    Classify {
        /// Case JSON file
        #[arg(short, long)]
        case_file: PathBuf,

        /// Speaker name as it appears in the transcript
        #[arg(short, long)]
        speaker: String,

        /// Speaker identifier from the transcript
        #[arg(long)]
        speaker_id: Option<String>,

        /// Argument year; defaults to the year in the file name
        #[arg(long)]
        year: Option<i32>,

        /// Tenure registry file
        #[arg(short, long, default_value = "sg_terms.json")]
        registry: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Summarize a corpus file
    Stats {
        /// Corpus file (JSON lines)
        #[arg(short, long, default_value = "scotus_corpus.jsonl")]
        input: PathBuf,
    },

    /// Look up Solicitor General office service terms with an LLM
    Terms {
        /// Attorney names, one per line
        #[arg(short, long, default_value = "data/osg_attorneys.txt")]
        names: PathBuf,

        /// Registry file to write
        #[arg(short, long, default_value = "sg_terms.json")]
        output: PathBuf,

        /// Pause between requests in milliseconds
        #[arg(long, default_value = "500")]
        delay_ms: u64,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Spot-check corpus labels against an LLM
    Verify {
        /// Corpus file (JSON lines)
        #[arg(short, long, default_value = "scotus_corpus.jsonl")]
        input: PathBuf,

        /// Records to check, split evenly between SG and Other
        #[arg(long, default_value = "10")]
        sample_size: usize,

        /// Seed for a reproducible sample
        #[arg(long)]
        seed: Option<u64>,

        /// Pause between requests in milliseconds
        #[arg(long, default_value = "500")]
        delay_ms: u64,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input_dir,
            output,
            registry,
            start_year,
            end_year,
            verbose,
        } => {
            setup_logging(verbose);
            let config = WalkerConfig {
                start_year,
                end_year,
                ..Default::default()
            };
            build_corpus(&input_dir, &output, &registry, &config)
        }
        Commands::Classify {
            case_file,
            speaker,
            speaker_id,
            year,
            registry,
            verbose,
        } => {
            setup_logging(verbose);
            classify_speaker(&case_file, &speaker, speaker_id.as_deref(), year, &registry)
        }
        Commands::Stats { input } => {
            setup_logging(false);
            print_stats(&input)
        }
        Commands::Terms {
            names,
            output,
            delay_ms,
            verbose,
        } => {
            setup_logging(verbose);
            generate_terms(&names, &output, &TermsConfig { delay_ms }).await
        }
        Commands::Verify {
            input,
            sample_size,
            seed,
            delay_ms,
            verbose,
        } => {
            setup_logging(verbose);
            let config = VerifyConfig {
                sample_size,
                seed,
                delay_ms,
            };
            verify_corpus(&input, &config).await
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn build_corpus(
    input_dir: &Path,
    output: &Path,
    registry_path: &Path,
    config: &WalkerConfig,
) -> Result<()> {
    let registry = TenureRegistry::load_or_empty(registry_path);
    info!("Tenure registry: {} attorneys", registry.len());
    let classifier = RoleClassifier::new(&registry);

    let mut writer = CorpusWriter::create(output)?;
    let result = execute_walk(input_dir, &mut writer, &classifier, config)?;
    writer.finish()?;

    info!(
        "Wrote {} turns from {} cases to {:?}",
        result.records_written, result.cases_processed, output
    );
    Ok(())
}

fn classify_speaker(
    case_path: &Path,
    speaker: &str,
    speaker_id: Option<&str>,
    year: Option<i32>,
    registry_path: &Path,
) -> Result<()> {
    let registry = TenureRegistry::load_or_empty(registry_path);
    let case = parse_case_file(case_path)
        .with_context(|| format!("Failed to load case file: {:?}", case_path))?;

    let year = year.or_else(|| {
        case_path
            .file_name()
            .and_then(|n| parse_case_file_name(&n.to_string_lossy()).ok())
            .map(|parsed| parsed.year)
    });

    let classifier = RoleClassifier::new(&registry);
    let result = classifier.classify(Some(speaker), speaker_id, &case.advocates, year);
    let tenure = registry.lookup(speaker);

    println!("Speaker: {}", speaker);
    println!("Year: {}", year.map(|y| y.to_string()).unwrap_or_else(|| "unknown".to_string()));
    println!("Role: {}", result.role);
    println!("Side: {}", result.side);
    println!("Affiliation: {}", result.affiliation);
    println!("Speaker type: {}", result.speaker_type());
    println!("Tenure records: {}", tenure.len());
    println!(
        "Tenure active: {}",
        registry.is_active(Some(speaker), year)
    );

    Ok(())
}

fn print_stats(input: &Path) -> Result<()> {
    if !input.exists() {
        println!("File not found.");
        return Ok(());
    }

    let contents = read_corpus(input)?;
    let stats = compute_stats(&contents);

    println!("Total Utterances: {}", stats.total_utterances);
    println!("Unique Cases: {}", stats.unique_cases);
    if stats.malformed_lines > 0 {
        println!("Malformed Lines: {}", stats.malformed_lines);
    }
    println!("SG Utterances: {}", stats.sg_utterances);
    println!("Other Utterances: {}", stats.other_utterances);
    println!();
    println!("By Role");
    println!("-------");
    for (role, count) in &stats.by_role {
        println!("{}: {}", role, count);
    }

    Ok(())
}

async fn generate_terms(names_path: &Path, output: &Path, config: &TermsConfig) -> Result<()> {
    let names = read_names_file(names_path)?;
    let client = AnthropicClient::new(AnthropicConfig::from_env()?);

    let result = execute_terms(&client, &names, config).await;
    result
        .registry
        .write_file(output)
        .context("Failed to write tenure registry")?;

    info!(
        "Saved {} attorneys to {:?} ({} lookups failed)",
        result.registry.len(),
        output,
        result.failures.len()
    );
    Ok(())
}

async fn verify_corpus(input: &Path, config: &VerifyConfig) -> Result<()> {
    let client = AnthropicClient::new(AnthropicConfig::from_env()?);
    let contents = read_corpus(input)?;
    info!("Loaded {} corpus records", contents.records.len());

    let report = execute_verify(&client, &contents.records, config).await;

    println!("Verification Complete.");
    println!("Agreement Rate: {:.2}%", report.agreement_rate());
    if report.failed_calls > 0 {
        println!("Failed calls: {}", report.failed_calls);
    }

    if !report.discrepancies.is_empty() {
        println!();
        println!("Discrepancies found:");
        for d in &report.discrepancies {
            println!("- Case: {} ({})", d.record.case_name, d.record.year);
            println!("  Speaker: {}", d.record.speaker_name);
            println!("  Dataset: {}", d.record.speaker_type);
            println!("  LLM says representing US: {}", d.llm_says_us);
            println!("  Reasoning: {}", d.reasoning);
            println!("{}", "-".repeat(40));
        }
    }

    Ok(())
}
