//! Output writers for cluster data.
//!
//! This module handles:
//! - JSON mappings and reports
//! - Text summaries

pub mod json;
pub mod text;

// Re-export main functions
pub use json::{
    build_report, export_mapping, mapping_to_string, read_report, write_json, write_report,
    ClusterMapping, ClusterReport, ClusterSummary,
};
pub use text::ranking_table;

use crate::utils::error::OutputError;
use std::path::Path;

/// Common path validation for output files
pub fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path_empty() {
        assert!(validate_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_path_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(validate_path(temp_dir.path()).is_err());
    }
}
