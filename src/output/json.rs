//! JSON export of cluster mappings and analysis reports.

use crate::aggregator::{rank, ClusterState, StackKey};
use crate::parser::HeaderRecord;
use crate::session::LoadOutcome;
use crate::utils::config::REPORT_SCHEMA_VERSION;
use crate::utils::error::{InvalidArgumentError, OutputError};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Serializable view of a cluster state
///
/// Keys are ordered so the same state always serializes the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_to_count: Option<BTreeMap<StackKey, u64>>,

    pub hash_to_stack: BTreeMap<StackKey, String>,
}

/// Build the exportable mapping, with per-key counts if requested
pub fn export_mapping(state: &ClusterState, include_counts: bool) -> ClusterMapping {
    let hash_to_stack = state
        .traces()
        .iter()
        .map(|(&key, trace)| (key, trace.clone()))
        .collect();

    let hash_to_count = include_counts.then(|| {
        state
            .counts()
            .iter()
            .map(|(&key, &count)| (key, count))
            .collect()
    });

    ClusterMapping {
        hash_to_count,
        hash_to_stack,
    }
}

/// Mapping as a compact JSON string
pub fn mapping_to_string(state: &ClusterState, include_counts: bool) -> Result<String, OutputError> {
    Ok(serde_json::to_string(&export_mapping(state, include_counts))?)
}

/// Full analysis report written by `analyze --output`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Log file the report was built from
    pub source: String,

    /// Records aggregated into clusters
    pub total_records: u64,

    pub distinct_clusters: usize,

    /// Document indices of records that were skipped
    pub skipped_records: Vec<usize>,

    /// Records merged under a key whose trace text differed
    pub collisions: u64,

    /// Header entry of the log, verbatim
    pub header: HeaderRecord,

    /// Top clusters, most frequent first
    pub top_clusters: Vec<ClusterSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<ClusterMapping>,

    /// Timestamp when report was generated
    pub generated_at: String,
}

/// One ranked cluster with its trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    pub key: StackKey,
    pub count: u64,

    /// Share of all aggregated records
    pub percentage: f64,
    pub trace: String,
}

/// Assemble a report from a loaded log
///
/// # Errors
/// * `InvalidArgumentError` - `top_k` is zero
pub fn build_report(
    source: &str,
    outcome: &LoadOutcome,
    top_k: usize,
    mapping: Option<ClusterMapping>,
) -> Result<ClusterReport, InvalidArgumentError> {
    let clusters = &outcome.clusters;
    let total = clusters.total_records();

    let top_clusters = rank(clusters, top_k)?
        .into_iter()
        .map(|entry| ClusterSummary {
            key: entry.key,
            count: entry.count,
            percentage: share(entry.count, total),
            trace: clusters.lookup_trace(entry.key).unwrap_or_default().to_string(),
        })
        .collect();

    Ok(ClusterReport {
        version: REPORT_SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        total_records: total,
        distinct_clusters: clusters.distinct(),
        skipped_records: outcome.skipped.indices(),
        collisions: clusters.collisions(),
        header: outcome.header.clone(),
        top_clusters,
        mapping,
        generated_at: Utc::now().to_rfc3339(),
    })
}

/// Percentage of `total`, 0.0 when there is nothing to divide by
pub fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64) * 100.0
    }
}

/// Write any serializable value as pretty JSON
///
/// Parent directories are created as needed.
///
/// # Errors
/// * `OutputError::InvalidPath` - path is empty, a directory, or its parent cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
pub fn write_json<T: Serialize>(value: &T, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing JSON to: {}", output_path.display());

    super::validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

pub fn write_report(report: &ClusterReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    write_json(report, output_path)
}

/// Read a report back, e.g. for validation
pub fn read_report(input_path: impl AsRef<Path>) -> Result<ClusterReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let report: ClusterReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::load;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::NamedTempFile;

    fn sample_outcome() -> LoadOutcome {
        load(&json!([
            {"header": {"app": "demo"}, "custom_long": [5]},
            {"data": "t1\nfoo\nbar"},
            {"data": "t2\nfoo\nbar"},
            {"data": "t3\nbaz"},
            {"trailer": true}
        ]))
        .unwrap()
    }

    #[test]
    fn test_export_stack_only() {
        let outcome = sample_outcome();
        let mapping = export_mapping(&outcome.clusters, false);

        assert!(mapping.hash_to_count.is_none());
        assert_eq!(mapping.hash_to_stack.len(), 2);
        assert_eq!(mapping.hash_to_stack[&StackKey::of("baz")], "baz");

        let value = serde_json::to_value(&mapping).unwrap();
        assert!(value.get("hash_to_count").is_none());
    }

    #[test]
    fn test_export_with_counts_uses_hex_keys() {
        let outcome = sample_outcome();
        let value: serde_json::Value =
            serde_json::from_str(&mapping_to_string(&outcome.clusters, true).unwrap()).unwrap();

        let key = StackKey::of("foo\nbar").to_string();
        assert_eq!(value["hash_to_count"][&key], 2);
        assert_eq!(value["hash_to_stack"][&key], "foo\nbar");
    }

    #[test]
    fn test_build_report() {
        let outcome = sample_outcome();
        let report = build_report("leak.log", &outcome, 1, None).unwrap();

        assert_eq!(report.total_records, 3);
        assert_eq!(report.distinct_clusters, 2);
        assert_eq!(report.top_clusters.len(), 1);
        assert_eq!(report.top_clusters[0].count, 2);
        assert_eq!(report.top_clusters[0].trace, "foo\nbar");
        assert!((report.top_clusters[0].percentage - 66.666).abs() < 0.01);
        assert!(build_report("leak.log", &outcome, 0, None).is_err());
        assert_eq!(
            build_report("leak.log", &outcome, usize::MAX, None).unwrap().top_clusters.len(),
            2
        );
    }

    #[test]
    fn test_write_and_read_report() {
        let outcome = sample_outcome();
        let mapping = export_mapping(&outcome.clusters, true);
        let report = build_report("leak.log", &outcome, 5, Some(mapping.clone())).unwrap();

        let temp_file = NamedTempFile::new().unwrap();
        write_report(&report, temp_file.path()).unwrap();
        let loaded = read_report(temp_file.path()).unwrap();

        let keys = |r: &ClusterReport| -> Vec<(StackKey, u64)> {
            r.top_clusters.iter().map(|c| (c.key, c.count)).collect()
        };
        assert_eq!(keys(&loaded), keys(&report));
        assert_eq!(loaded.mapping, Some(mapping));
        assert_eq!(loaded.header, outcome.header);
        assert_eq!(loaded.header.auxiliary_list().unwrap(), &json!([5]));
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/mapping.json");

        write_json(&export_mapping(&sample_outcome().clusters, false), &nested_path).unwrap();

        assert!(nested_path.exists());
    }

    #[test]
    fn test_share_zero_total() {
        assert_eq!(share(3, 0), 0.0);
        assert_eq!(share(1, 4), 25.0);
    }
}
