//! Typed views over the leak log's heterogeneous entries.
//!
//! The log is a JSON array: entry 0 is the header, the last entry is a
//! trailer, and everything in between is a leak record with a `data` field.

use crate::utils::config::{AUX_LIST_FIELD, DATA_FIELD, HEADER_FIELD};
use crate::utils::error::{ExtractionFailure, MissingFieldError, RecordExtractionError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The first entry of a leak log, kept verbatim for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderRecord(Value);

impl HeaderRecord {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Descriptive header block (`header` field)
    pub fn header(&self) -> Result<&Value, MissingFieldError> {
        self.field(HEADER_FIELD)
    }

    /// Auxiliary list attached to the header (`custom_long` field),
    /// usually the leaked descriptor numbers
    pub fn auxiliary_list(&self) -> Result<&Value, MissingFieldError> {
        self.field(AUX_LIST_FIELD)
    }

    /// The whole header entry as it appeared in the log
    pub fn raw(&self) -> &Value {
        &self.0
    }

    fn field(&self, name: &'static str) -> Result<&Value, MissingFieldError> {
        self.0.get(name).ok_or(MissingFieldError(name))
    }
}

/// A borrowed middle entry of the log
#[derive(Debug, Clone, Copy)]
pub struct LeakRecord<'a> {
    /// Position in the log document
    pub index: usize,
    pub raw: &'a Value,
}

impl<'a> LeakRecord<'a> {
    /// Raw stack text from the `data` field
    ///
    /// # Errors
    /// * `NotObject` - the entry is not a JSON object
    /// * `MissingData` - no `data` field
    /// * `NotText` - `data` is present but not a string
    pub fn stack_text(&self) -> Result<&'a str, RecordExtractionError> {
        let fail = |reason| RecordExtractionError {
            index: self.index,
            reason,
        };

        let obj = self.raw.as_object().ok_or(fail(ExtractionFailure::NotObject))?;
        let data = obj
            .get(DATA_FIELD)
            .ok_or(fail(ExtractionFailure::MissingData))?;
        data.as_str().ok_or(fail(ExtractionFailure::NotText))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_header_fields() {
        let header = HeaderRecord::new(json!({
            "header": {"pid": 42, "process": "com.example"},
            "custom_long": [3, 7]
        }));

        assert_eq!(header.header().unwrap()["pid"], 42);
        assert_eq!(header.auxiliary_list().unwrap(), &json!([3, 7]));
    }

    #[test]
    fn test_header_missing_fields_are_independent() {
        let header = HeaderRecord::new(json!({"custom_long": []}));

        assert_eq!(header.header(), Err(MissingFieldError("header")));
        assert!(header.auxiliary_list().is_ok());
    }

    #[test]
    fn test_header_not_an_object() {
        let header = HeaderRecord::new(json!("just a string"));
        assert!(header.header().is_err());
        assert!(header.auxiliary_list().is_err());
    }

    #[test]
    fn test_stack_text_failures() {
        let not_obj = json!(17);
        let no_data = json!({"other": "x"});
        let not_text = json!({"data": ["a", "b"]});

        let reason = |raw: &Value| {
            LeakRecord { index: 3, raw }
                .stack_text()
                .unwrap_err()
                .reason
        };

        assert_eq!(reason(&not_obj), ExtractionFailure::NotObject);
        assert_eq!(reason(&no_data), ExtractionFailure::MissingData);
        assert_eq!(reason(&not_text), ExtractionFailure::NotText);
    }

    #[test]
    fn test_stack_text_ok() {
        let raw = json!({"data": "t0\nframe"});
        let record = LeakRecord { index: 1, raw: &raw };
        assert_eq!(record.stack_text().unwrap(), "t0\nframe");
    }
}
