//! Leak log parsing.
//!
//! This module handles:
//! - Reading the JSON leak log
//! - Classifying header, leak records and trailer
//! - Exposing header metadata

pub mod leak_log;
pub mod schema;

// Re-export main types
pub use leak_log::{extract_records, parse_document, read_document, Extraction, LeakRecords};
pub use schema::{HeaderRecord, LeakRecord};
