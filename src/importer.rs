//! Pipeline entry points and the delimited-path orchestration.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::json::parse_json;
use crate::mapping::{TargetField, auto_map_columns, index_of};
use crate::normalize::normalize;
use crate::result::ImportResult;
use crate::row::build_questions;
use crate::sniffer::sniff_delimiter;
use crate::tokenizer::split_line;

/// Externally declared type of an uploaded file.
///
/// The pipeline never infers MIME types from bytes; the caller declares the
/// format (typically from the file extension).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// A JSON document with a top-level `questions` array.
    Json,
    /// Comma-separated values (delimiter still sniffed from the header).
    Csv,
    /// Tab-separated values, including spreadsheet text exports.
    Tsv,
}

impl SourceFormat {
    /// Map a file extension to a format, case-insensitively.
    pub fn from_extension(extension: &str) -> Option<SourceFormat> {
        match extension.to_ascii_lowercase().as_str() {
            "json" => Some(SourceFormat::Json),
            "csv" => Some(SourceFormat::Csv),
            "tsv" | "tab" | "txt" | "xls" => Some(SourceFormat::Tsv),
            _ => None,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceFormat::Json => write!(f, "json"),
            SourceFormat::Csv => write!(f, "csv"),
            SourceFormat::Tsv => write!(f, "tsv"),
        }
    }
}

/// Parse in-memory text into an [`ImportResult`].
///
/// This is a pure function: no I/O, no shared state, no suspension points.
/// Identical input text and format always produce a structurally identical
/// result (same question order, same ids, same mapping confidences), which
/// keeps the local pipeline interchangeable with the remote preview
/// producer. It never fails; fatal conditions are data in the result.
pub fn parse_str(text: &str, format: SourceFormat) -> ImportResult {
    match format {
        SourceFormat::Json => parse_json(text),
        SourceFormat::Csv | SourceFormat::Tsv => parse_delimited(text),
    }
}

/// Parse raw bytes, validating UTF-8 at the boundary.
///
/// The only error this returns is [`ImportError::Utf8`](crate::ImportError)
/// for input that is not text at all; callers with legacy-encoded uploads
/// should run [`decode_upload`](crate::decode_upload) first.
pub fn parse_bytes(data: &[u8], format: SourceFormat) -> Result<ImportResult> {
    let text = simdutf8::basic::from_utf8(data)?;
    Ok(parse_str(text, format))
}

fn parse_delimited(text: &str) -> ImportResult {
    let normalized = normalize(text);
    if normalized.lines.len() < 2 {
        return ImportResult::fatal("File must contain a header row and at least one data row");
    }

    let delimiter = sniff_delimiter(&normalized.lines[0]);
    log::debug!("sniffed {delimiter} delimiter from header");

    let headers = split_line(&normalized.lines[0], delimiter);
    let (mappings, mut warnings) = auto_map_columns(&headers);

    if index_of(&mappings, TargetField::Text).is_none() {
        return ImportResult {
            errors: vec!["No column could be identified as the question text".to_string()],
            warnings,
            column_mappings: mappings,
            ..ImportResult::default()
        };
    }

    let outcome = build_questions(&normalized.lines, delimiter, &mappings);
    warnings.extend(outcome.warnings);

    ImportResult {
        title: None,
        description: None,
        questions: outcome.accepted,
        warnings,
        errors: Vec::new(),
        invalid_rows: outcome.invalid,
        column_mappings: mappings,
    }
}
