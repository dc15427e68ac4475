//! JSON question building.
//!
//! The document is parsed once into an untyped `serde_json::Value` tree,
//! then a single validating conversion pass lifts each element into a
//! [`QuestionRecord`] or drops it with a warning. The JSON path has no row
//! numbers, so recoverable per-item issues live in `warnings` exclusively.

use serde_json::Value;

use crate::question::{QuestionRecord, QuestionType};
use crate::result::ImportResult;

pub(crate) fn parse_json(text: &str) -> ImportResult {
    let root: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => return ImportResult::fatal(format!("Invalid JSON: {e}")),
    };

    let Some(items) = root.get("questions").and_then(Value::as_array) else {
        return ImportResult::fatal("JSON must contain a top-level \"questions\" array");
    };

    let mut questions = Vec::with_capacity(items.len());
    let mut warnings = Vec::new();

    for (i, item) in items.iter().enumerate() {
        if let Some(question) = convert_item(i + 1, item, questions.len() + 1, &mut warnings) {
            questions.push(question);
        }
    }

    log::debug!("json pass: {} of {} items accepted", questions.len(), items.len());

    ImportResult {
        title: root.get("title").map(coerce_string),
        description: root.get("description").map(coerce_string),
        questions,
        warnings,
        ..ImportResult::default()
    }
}

/// Validate one `questions` element.
///
/// A non-object element carries no `text` key, so it falls out through the
/// missing-text warning like any other textless item.
fn convert_item(
    item_number: usize,
    item: &Value,
    next_id: usize,
    warnings: &mut Vec<String>,
) -> Option<QuestionRecord> {
    let text = item
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default();
    if text.is_empty() {
        warnings.push(format!(
            "Question {item_number}: missing question text; skipped"
        ));
        return None;
    }

    let question_type = match item.get("type") {
        None => QuestionType::ShortText,
        Some(value) => {
            let raw = value.as_str().unwrap_or_default();
            QuestionType::parse(raw).unwrap_or_else(|| {
                warnings.push(format!(
                    "Question {item_number}: unknown question type {value}; defaulting to short-text"
                ));
                QuestionType::ShortText
            })
        }
    };

    let options = item
        .get("options")
        .and_then(Value::as_array)
        .map_or_else(Vec::new, |values| {
            values.iter().map(coerce_string).collect()
        });

    if question_type.requires_choices() && options.len() < 2 {
        warnings.push(format!(
            "Question {item_number}: {question_type} questions need at least 2 options; skipped"
        ));
        return None;
    }

    Some(QuestionRecord {
        id: format!("imported_{next_id}"),
        text: text.to_string(),
        question_type,
        options,
        required: truthy(item.get("required")),
        placeholder: item
            .get("placeholder")
            .and_then(Value::as_str)
            .map(str::to_string),
        min_value: item.get("minValue").and_then(Value::as_f64),
        max_value: item.get("maxValue").and_then(Value::as_f64),
        points: item
            .get("points")
            .and_then(Value::as_f64)
            .map(|v| v.max(0.0) as u32),
    })
}

/// JavaScript-style truthiness: `false`, `0`, `""`, `null`, and absence are
/// false; everything else is true.
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Strings pass through verbatim; any other value is rendered as its JSON
/// text (`1` becomes `"1"`, `true` becomes `"true"`).
fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_questions_key_is_fatal() {
        let result = parse_json(r#"{"title": "no questions here"}"#);
        assert!(result.is_fatal());
        assert!(result.errors[0].contains("questions"));
        assert!(result.questions.is_empty());
    }

    #[test]
    fn test_questions_not_an_array_is_fatal() {
        let result = parse_json(r#"{"questions": "not a list"}"#);
        assert!(result.is_fatal());
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let result = parse_json("{not json");
        assert!(result.is_fatal());
        assert!(result.errors[0].contains("Invalid JSON"));
    }

    #[test]
    fn test_missing_text_drops_item_with_warning() {
        let result = parse_json(
            r#"{"questions": [{"type": "rating"}, {"text": "ok?"}, "not an object"]}"#,
        );
        assert!(result.is_previewable());
        assert_eq!(result.questions.len(), 1);
        assert_eq!(result.questions[0].id, "imported_1");
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("Question 1"));
        assert!(result.warnings[1].contains("Question 3"));
    }

    #[test]
    fn test_unknown_type_warns_and_defaults() {
        let result = parse_json(r#"{"questions": [{"text": "q?", "type": "matrix"}]}"#);
        assert_eq!(result.questions[0].question_type, QuestionType::ShortText);
        assert!(result.warnings[0].contains("matrix"));
    }

    #[test]
    fn test_options_coerced_elementwise() {
        let result = parse_json(
            r#"{"questions": [{"text": "q?", "type": "dropdown", "options": ["a", 1, true]}]}"#,
        );
        assert_eq!(result.questions[0].options, vec!["a", "1", "true"]);
    }

    #[test]
    fn test_choice_type_without_options_dropped() {
        let result = parse_json(
            r#"{"questions": [{"text": "q?", "type": "multi-choice", "options": ["only"]}]}"#,
        );
        assert!(result.questions.is_empty());
        assert!(result.warnings[0].contains("at least 2 options"));
    }

    #[test]
    fn test_required_truthiness() {
        let result = parse_json(
            r#"{"questions": [
                {"text": "a?", "required": true},
                {"text": "b?", "required": "yes"},
                {"text": "c?", "required": 0},
                {"text": "d?", "required": ""},
                {"text": "e?"}
            ]}"#,
        );
        let required: Vec<bool> = result.questions.iter().map(|q| q.required).collect();
        assert_eq!(required, vec![true, true, false, false, false]);
    }

    #[test]
    fn test_numeric_fields_pass_through_only_when_numeric() {
        let result = parse_json(
            r#"{"questions": [
                {"text": "a?", "minValue": 1, "maxValue": 5, "points": 10},
                {"text": "b?", "minValue": "1", "maxValue": "5", "points": "10"}
            ]}"#,
        );
        let a = &result.questions[0];
        assert_eq!(a.min_value, Some(1.0));
        assert_eq!(a.max_value, Some(5.0));
        assert_eq!(a.points, Some(10));
        let b = &result.questions[1];
        assert_eq!(b.min_value, None);
        assert_eq!(b.max_value, None);
        assert_eq!(b.points, None);
    }

    #[test]
    fn test_title_and_description_coerced() {
        let result = parse_json(r#"{"title": 42, "description": "d", "questions": []}"#);
        assert_eq!(result.title.as_deref(), Some("42"));
        assert_eq!(result.description.as_deref(), Some("d"));
    }

    #[test]
    fn test_placeholder_carried() {
        let result =
            parse_json(r#"{"questions": [{"text": "q?", "placeholder": "type here"}]}"#);
        assert_eq!(result.questions[0].placeholder.as_deref(), Some("type here"));
    }
}
