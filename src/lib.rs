pub mod classify;
pub mod io;
pub mod llm;
pub mod models;
pub mod roster;
pub mod stages;

pub use classify::{parse_description, DescriptionSignals, RoleClassifier};
pub use io::{
    parse_case_file, read_corpus, CaseFileError, CorpusRecord, CorpusWriter,
};
pub use llm::{AnthropicClient, AnthropicConfig, ToolClient};
pub use models::{Affiliation, Classification, Role, ServiceInterval, Side, SpeakerType};
pub use roster::{normalize_name, RegistryError, TenureRegistry};
pub use stages::{
    compute_stats, execute_terms, execute_verify, execute_walk, read_names_file, TermsConfig,
    VerifyConfig, WalkerConfig,
};
