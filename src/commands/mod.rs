//! CLI command implementations.
//!
//! Commands orchestrate the library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_args};
pub use models::AnalyzeArgs;
pub use utils::{display_header, display_version, lookup_stack, validate_report_file};
