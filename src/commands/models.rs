use crate::utils::config::DEFAULT_TOP_K;
use std::path::PathBuf;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Leak log to analyze
    pub log_file: PathBuf,

    /// Number of clusters to rank
    pub top_k: usize,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Output path for the key -> trace mapping (optional)
    pub export_mapping: Option<PathBuf>,

    /// Include key -> count in the exported mapping
    pub with_counts: bool,

    /// Print the ranking table to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            log_file: PathBuf::new(),
            top_k: DEFAULT_TOP_K,
            output_json: None,
            export_mapping: None,
            with_counts: false,
            print_summary: true,
        }
    }
}
