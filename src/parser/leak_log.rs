//! Leak log reader and record extractor.
//!
//! Classifies the log's top-level entries by position and hands out the
//! raw stack text of every leak record.

use super::schema::{HeaderRecord, LeakRecord};
use crate::utils::error::{LoadError, RecordExtractionError};
use log::debug;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Header plus a lazy walk over the leak records
#[derive(Debug)]
pub struct Extraction<'a> {
    pub header: HeaderRecord,
    pub records: LeakRecords<'a>,
}

/// Iterator over the middle entries of a log document
///
/// Yields one `Result` per entry so a bad record never stops the walk.
#[derive(Debug, Clone)]
pub struct LeakRecords<'a> {
    entries: std::iter::Enumerate<std::slice::Iter<'a, Value>>,
}

impl<'a> Iterator for LeakRecords<'a> {
    type Item = Result<&'a str, RecordExtractionError>;

    fn next(&mut self) -> Option<Self::Item> {
        let (offset, raw) = self.entries.next()?;
        // Offset 0 of the middle slice is index 1 of the document
        let record = LeakRecord {
            index: offset + 1,
            raw,
        };
        Some(record.stack_text())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for LeakRecords<'_> {}

/// Read and parse a leak log from disk
///
/// # Errors
/// * `LoadError::InvalidPath` - the path does not exist
/// * `LoadError::Io` - the file could not be opened
/// * `LoadError::Json` - the file is not valid JSON
pub fn read_document(path: impl AsRef<Path>) -> Result<Value, LoadError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(LoadError::InvalidPath(path.to_path_buf()));
    }

    debug!("Reading leak log from: {}", path.display());

    let file = File::open(path)?;
    let document = serde_json::from_reader(BufReader::new(file))?;

    Ok(document)
}

/// Parse a leak log already held in memory
pub fn parse_document(text: &str) -> Result<Value, LoadError> {
    Ok(serde_json::from_str(text)?)
}

/// Split a log document into its header and leak records
///
/// The trailer (last entry) is dropped without inspection.
///
/// # Errors
/// * `LoadError::Malformed` - the document is not an array, or has fewer
///   than two entries
pub fn extract_records(document: &Value) -> Result<Extraction<'_>, LoadError> {
    let entries = match document {
        Value::Array(entries) => entries.as_slice(),
        Value::Null => {
            return Err(LoadError::Malformed("log document is empty".to_string()));
        }
        _ => {
            return Err(LoadError::Malformed(
                "log document must be a JSON array".to_string(),
            ));
        }
    };

    let [header, middle @ .., _trailer] = entries else {
        return Err(LoadError::Malformed(format!(
            "log needs a header and a trailer, found {} entries",
            entries.len()
        )));
    };

    debug!("Log has {} leak records", middle.len());

    Ok(Extraction {
        header: HeaderRecord::new(header.clone()),
        records: LeakRecords {
            entries: middle.iter().enumerate(),
        },
    })
}
