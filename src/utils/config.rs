//! Configuration and constants for the CLI.

/// Current report schema version
pub const REPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Number of clusters shown when no `--top` is given
pub const DEFAULT_TOP_K: usize = 5;
pub const MAX_TOP_K: usize = 10_000;

// Field names in the leak log
pub const HEADER_FIELD: &str = "header";
pub const AUX_LIST_FIELD: &str = "custom_long";
pub const DATA_FIELD: &str = "data";

/// Environment variable that can supply the log path
pub const LOG_PATH_ENV: &str = "FD_CLUSTER_LOG";

/// Shown by `lookup` when a key has no cluster
pub const STACK_NOT_PRESENT: &str = "STACK NOT PRESENT";
