//! Row validation and question building for the delimited (CSV/TSV) path.
//!
//! Each data row is validated independently and lands in exactly one of two
//! accumulators: accepted questions or invalid rows. One bad row never
//! affects any other row, and nothing is dropped silently.

use crate::mapping::{ColumnMapping, TargetField, index_of};
use crate::question::{QuestionRecord, QuestionType};
use crate::result::InvalidRow;
use crate::sniffer::Delimiter;
use crate::tokenizer::{split_line, unquote};

/// Outcome of the row pass: the two accumulators plus per-row warnings.
#[derive(Debug, Default)]
pub(crate) struct RowOutcome {
    pub accepted: Vec<QuestionRecord>,
    pub invalid: Vec<InvalidRow>,
    pub warnings: Vec<String>,
}

enum RowVerdict {
    Accepted(QuestionRecord),
    Rejected(InvalidRow),
}

/// Column positions resolved from the mapping, one lookup per target.
struct FieldIndexes {
    text: usize,
    question_type: Option<usize>,
    options: Option<usize>,
    required: Option<usize>,
    min_value: Option<usize>,
    max_value: Option<usize>,
    points: Option<usize>,
}

/// Build questions from every non-header line.
///
/// `lines` is the full normalized line list including the header at index
/// 0; row numbers in reports are 1-based with the header as row 1. The
/// caller has already verified that a header maps to [`TargetField::Text`].
pub(crate) fn build_questions(
    lines: &[String],
    delimiter: Delimiter,
    mappings: &[ColumnMapping],
) -> RowOutcome {
    let Some(text) = index_of(mappings, TargetField::Text) else {
        return RowOutcome::default();
    };
    let indexes = FieldIndexes {
        text,
        question_type: index_of(mappings, TargetField::Type),
        options: index_of(mappings, TargetField::Options),
        required: index_of(mappings, TargetField::Required),
        min_value: index_of(mappings, TargetField::MinValue),
        max_value: index_of(mappings, TargetField::MaxValue),
        points: index_of(mappings, TargetField::Points),
    };

    let mut outcome = lines.iter().skip(1).enumerate().fold(
        RowOutcome::default(),
        |mut acc, (i, line)| {
            let row_number = i + 2;
            let fields = split_line(line, delimiter);
            let next_id = acc.accepted.len() + 1;
            match build_row(row_number, fields, &indexes, next_id, &mut acc.warnings) {
                RowVerdict::Accepted(question) => acc.accepted.push(question),
                RowVerdict::Rejected(invalid) => acc.invalid.push(invalid),
            }
            acc
        },
    );

    if !outcome.invalid.is_empty() {
        outcome.warnings.push(format!(
            "Skipped {} invalid row(s); see the invalid rows for details",
            outcome.invalid.len()
        ));
    }

    log::debug!(
        "row pass: {} accepted, {} invalid",
        outcome.accepted.len(),
        outcome.invalid.len()
    );

    outcome
}

/// Resolve a mapped cell: index lookup plus quote stripping. Unmapped
/// targets and short rows both come back as `None`.
fn cell<'a>(fields: &'a [String], index: Option<usize>) -> Option<&'a str> {
    index.and_then(|i| fields.get(i)).map(|raw| unquote(raw))
}

fn build_row(
    row_number: usize,
    fields: Vec<String>,
    indexes: &FieldIndexes,
    next_id: usize,
    warnings: &mut Vec<String>,
) -> RowVerdict {
    let text = cell(&fields, Some(indexes.text)).unwrap_or_default();
    if text.is_empty() {
        return RowVerdict::Rejected(InvalidRow::new(
            row_number,
            "Empty question text".to_string(),
            fields,
        ));
    }
    let text = text.to_string();

    let question_type = match cell(&fields, indexes.question_type) {
        None => QuestionType::ShortText,
        Some("") => {
            warnings.push(format!(
                "Row {row_number}: missing question type; defaulting to short-text"
            ));
            QuestionType::ShortText
        }
        Some(raw) => QuestionType::parse(raw).unwrap_or_else(|| {
            warnings.push(format!(
                "Row {row_number}: unknown question type \"{raw}\"; defaulting to short-text"
            ));
            QuestionType::ShortText
        }),
    };

    let options = cell(&fields, indexes.options)
        .filter(|raw| !raw.is_empty())
        .map_or_else(Vec::new, parse_options);

    if question_type.requires_choices() && options.len() < 2 {
        return RowVerdict::Rejected(InvalidRow::new(
            row_number,
            format!("{question_type} questions need at least 2 options"),
            fields,
        ));
    }

    let required =
        cell(&fields, indexes.required).is_some_and(|raw| raw.to_lowercase() == "true");
    let min_value = cell(&fields, indexes.min_value).and_then(parse_numeric);
    let max_value = cell(&fields, indexes.max_value).and_then(parse_numeric);
    let points = cell(&fields, indexes.points)
        .and_then(parse_numeric)
        .filter(|v| *v >= 0.0)
        .map_or(0, |v| v as u32);

    RowVerdict::Accepted(QuestionRecord {
        id: format!("imported_{next_id}"),
        text,
        question_type,
        options,
        required,
        placeholder: None,
        min_value,
        max_value,
        points: Some(points),
    })
}

/// Parse an options cell: a `[`-prefixed value is tried as a JSON array of
/// strings first, falling back to pipe-delimited splitting; anything else
/// splits on `|` directly, trimmed with empties dropped.
fn parse_options(raw: &str) -> Vec<String> {
    if raw.starts_with('[')
        && let Ok(options) = serde_json::from_str::<Vec<String>>(raw)
    {
        return options;
    }
    raw.split('|')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_numeric(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
