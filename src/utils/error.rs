//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort loading a leak log
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Invalid log path: {}", .0.display())]
    InvalidPath(PathBuf),

    #[error("Failed to read log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse log JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed leak log: {0}")]
    Malformed(String),
}

/// Why a single leak record could not be used
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionFailure {
    #[error("record is not an object")]
    NotObject,

    #[error("record has no `data` field")]
    MissingData,

    #[error("`data` field is not text")]
    NotText,
}

/// A leak record that was skipped during extraction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("record {index} skipped: {reason}")]
pub struct RecordExtractionError {
    /// Position of the record in the log document
    pub index: usize,
    pub reason: ExtractionFailure,
}

/// A header sub-field was absent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing header field: {0}")]
pub struct MissingFieldError(pub &'static str);

/// Top-k was asked for zero entries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid argument: k must be at least 1, got {0}")]
pub struct InvalidArgumentError(pub usize);

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
