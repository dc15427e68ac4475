//! The import result contract shared by the local pipeline and the remote
//! preview service.

use serde::{Deserialize, Serialize};

use crate::mapping::ColumnMapping;
use crate::question::QuestionRecord;

/// A data row rejected during validation, preserved with its raw values so
/// the user can correct and re-import it. Created once during the row pass
/// and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidRow {
    /// 1-based row number; the header row is row 1, matching the line
    /// numbers a user sees in their file.
    pub row_index: usize,
    /// Human-readable rejection reason.
    pub reason: String,
    /// The raw tokenized fields of the rejected line.
    pub raw_values: Vec<String>,
}

impl InvalidRow {
    /// Create a new `InvalidRow`.
    pub const fn new(row_index: usize, reason: String, raw_values: Vec<String>) -> Self {
        Self {
            row_index,
            reason,
            raw_values,
        }
    }
}

/// Caller-visible state of a finished parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    /// Questions are available for preview, possibly alongside invalid rows
    /// and warnings. Partial success is by design.
    Previewable,
    /// Nothing importable; the user must go back to file selection.
    Fatal,
}

/// Aggregate outcome of one parse invocation.
///
/// Constructed once per invocation and handed to the caller; the pipeline
/// never observes post-parse edits. Every rejected unit of input is
/// accounted for in exactly one of `invalid_rows` (delimited path, raw
/// values preserved) or `warnings` (both paths).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    /// Survey title, when the source document carries one (JSON only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Survey description, when the source document carries one (JSON only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Accepted questions, in input order.
    #[serde(default)]
    pub questions: Vec<QuestionRecord>,
    /// Informational issues that never block import.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// Fatal conditions. Non-empty means nothing was importable.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Rejected rows with raw values preserved (delimited path only).
    #[serde(default)]
    pub invalid_rows: Vec<InvalidRow>,
    /// One mapping per header column (delimited path only).
    #[serde(default)]
    pub column_mappings: Vec<ColumnMapping>,
}

impl ImportResult {
    /// A fatal result carrying a single error and nothing else.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
            ..Self::default()
        }
    }

    /// The caller-visible status, derived from `errors`.
    pub fn status(&self) -> ImportStatus {
        if self.errors.is_empty() {
            ImportStatus::Previewable
        } else {
            ImportStatus::Fatal
        }
    }

    /// Returns true when nothing is importable.
    #[inline]
    pub fn is_fatal(&self) -> bool {
        self.status() == ImportStatus::Fatal
    }

    /// Returns true when questions can be previewed, even with warnings or
    /// invalid rows present.
    #[inline]
    pub fn is_previewable(&self) -> bool {
        self.status() == ImportStatus::Previewable
    }

    /// Render the rejected rows back to CSV for correction and re-import.
    ///
    /// The first record is the original header, reconstructed from the
    /// column mappings; each following record is one rejected row's raw
    /// values. Returns `None` when there are no invalid rows.
    pub fn invalid_rows_csv(&self) -> Option<String> {
        if self.invalid_rows.is_empty() {
            return None;
        }

        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(Vec::new());

        if !self.column_mappings.is_empty() {
            let header: Vec<&str> = self
                .column_mappings
                .iter()
                .map(|m| m.header_text.as_str())
                .collect();
            // the writer only fails on IO, which Vec<u8> cannot produce
            let _ = writer.write_record(&header);
        }
        for row in &self.invalid_rows {
            let _ = writer.write_record(&row.raw_values);
        }

        writer
            .into_inner()
            .ok()
            .and_then(|bytes| String::from_utf8(bytes).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_previewable_with_warnings() {
        let result = ImportResult {
            warnings: vec!["something soft".to_string()],
            invalid_rows: vec![InvalidRow::new(2, "Empty question text".to_string(), vec![])],
            ..ImportResult::default()
        };
        assert_eq!(result.status(), ImportStatus::Previewable);
        assert!(result.is_previewable());
    }

    #[test]
    fn test_status_fatal() {
        let result = ImportResult::fatal("no content");
        assert_eq!(result.status(), ImportStatus::Fatal);
        assert!(result.is_fatal());
        assert!(result.questions.is_empty());
    }

    #[test]
    fn test_invalid_rows_csv_roundtrips_raw_values() {
        let result = ImportResult {
            invalid_rows: vec![InvalidRow::new(
                3,
                "Empty question text".to_string(),
                vec!["".to_string(), "a, b".to_string()],
            )],
            ..ImportResult::default()
        };
        let csv = result.invalid_rows_csv().unwrap();
        assert_eq!(csv, ",\"a, b\"\n");
    }

    #[test]
    fn test_invalid_rows_csv_none_when_clean() {
        assert_eq!(ImportResult::default().invalid_rows_csv(), None);
    }
}
