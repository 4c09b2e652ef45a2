//! One-pass load: extraction plus full aggregation.
//!
//! Every analysis owns its `ClusterState`; nothing is shared between loads.

use crate::aggregator::ClusterState;
use crate::parser::{extract_records, read_document, HeaderRecord};
use crate::utils::error::{LoadError, RecordExtractionError};
use log::{info, warn};
use serde_json::Value;
use std::path::Path;

/// Records that could not be aggregated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipReport {
    pub errors: Vec<RecordExtractionError>,
}

impl SkipReport {
    pub fn count(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Document indices of the skipped records
    pub fn indices(&self) -> Vec<usize> {
        self.errors.iter().map(|e| e.index).collect()
    }
}

/// Result of loading one leak log
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub header: HeaderRecord,
    pub clusters: ClusterState,
    pub skipped: SkipReport,
}

/// Extract and aggregate every leak record of a parsed document
///
/// Bad records are skipped and listed in `skipped`; only a malformed
/// document aborts.
pub fn load(document: &Value) -> Result<LoadOutcome, LoadError> {
    let extraction = extract_records(document)?;

    let mut clusters = ClusterState::new();
    let mut skipped = SkipReport::default();

    for result in extraction.records {
        match result {
            Ok(raw_stack) => {
                clusters.record(raw_stack);
            }
            Err(e) => {
                warn!("{}", e);
                skipped.errors.push(e);
            }
        }
    }

    info!(
        "Aggregated {} records into {} clusters ({} skipped)",
        clusters.total_records(),
        clusters.distinct(),
        skipped.count()
    );

    Ok(LoadOutcome {
        header: extraction.header,
        clusters,
        skipped,
    })
}

/// Read a leak log from disk and load it
pub fn load_file(path: impl AsRef<Path>) -> Result<LoadOutcome, LoadError> {
    let document = read_document(path)?;
    load(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::StackKey;
    use crate::utils::error::ExtractionFailure;
    use serde_json::json;

    #[test]
    fn test_load_counts_and_skips() {
        let doc = json!([
            {"header": {"pid": 1}, "custom_long": [1, 2]},
            {"data": "t1\nfoo"},
            {"stack": "wrong field"},
            {"data": 12},
            {"data": "t2\nfoo"},
            {"trailer": true}
        ]);

        let outcome = load(&doc).unwrap();

        assert_eq!(outcome.clusters.total_records(), 2);
        assert_eq!(outcome.clusters.count(StackKey::of("foo")), 2);
        assert_eq!(outcome.skipped.count(), 2);
        assert_eq!(outcome.skipped.indices(), vec![2, 3]);
        assert_eq!(outcome.skipped.errors[1].reason, ExtractionFailure::NotText);
    }

    #[test]
    fn test_load_malformed() {
        assert!(matches!(load(&json!([])), Err(LoadError::Malformed(_))));
    }

    #[test]
    fn test_independent_loads() {
        let first = load(&json!([{}, {"data": "a\nx"}, {}])).unwrap();
        let second = load(&json!([{}, {"data": "a\ny"}, {}])).unwrap();

        assert_eq!(first.clusters.count(StackKey::of("y")), 0);
        assert_eq!(second.clusters.count(StackKey::of("y")), 1);
    }
}
