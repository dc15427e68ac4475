//! Question records and the closed question-type enum.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mapping::normalize_key;

/// The closed set of question types an import can produce.
///
/// Unknown type values are never rejected outright; both input paths coerce
/// them to [`QuestionType::ShortText`] with a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    /// Single-line free text (the fallback type).
    #[default]
    ShortText,
    /// Multi-line free text.
    Paragraph,
    /// Exactly one choice from a list.
    SingleChoice,
    /// Any number of choices from a list.
    MultiChoice,
    /// One choice from a dropdown list.
    Dropdown,
    /// Numeric rating on a scale.
    Rating,
    /// Yes/no answer.
    Boolean,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Free numeric answer.
    Number,
}

impl QuestionType {
    /// Parse a raw type value against the closed enum.
    ///
    /// Matching is tolerant of spelling variants: the value is lower-cased
    /// and stripped of non-alphanumerics, then checked against each type's
    /// accepted names (`"Multiple Choice"`, `multi_choice`, and `checkbox`
    /// all resolve to [`QuestionType::MultiChoice`]). Returns `None` for
    /// values outside the closed set; the caller decides the fallback.
    pub fn parse(raw: &str) -> Option<QuestionType> {
        match normalize_key(raw).as_str() {
            "shorttext" | "text" | "short" => Some(QuestionType::ShortText),
            "paragraph" | "longtext" | "textarea" | "essay" => Some(QuestionType::Paragraph),
            "singlechoice" | "radio" | "single" | "choice" => Some(QuestionType::SingleChoice),
            "multichoice" | "multiplechoice" | "checkbox" | "checkboxes" | "multi"
            | "multiselect" => Some(QuestionType::MultiChoice),
            "dropdown" | "select" | "combobox" => Some(QuestionType::Dropdown),
            "rating" | "scale" | "stars" => Some(QuestionType::Rating),
            "boolean" | "bool" | "yesno" | "truefalse" => Some(QuestionType::Boolean),
            "date" => Some(QuestionType::Date),
            "time" => Some(QuestionType::Time),
            "number" | "numeric" | "integer" | "int" | "float" | "decimal" => {
                Some(QuestionType::Number)
            }
            _ => None,
        }
    }

    /// Returns true for types that present a list of choices and therefore
    /// need at least two options.
    #[inline]
    pub fn requires_choices(self) -> bool {
        matches!(
            self,
            QuestionType::SingleChoice | QuestionType::MultiChoice | QuestionType::Dropdown
        )
    }

    /// Canonical name, as used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            QuestionType::ShortText => "short-text",
            QuestionType::Paragraph => "paragraph",
            QuestionType::SingleChoice => "single-choice",
            QuestionType::MultiChoice => "multi-choice",
            QuestionType::Dropdown => "dropdown",
            QuestionType::Rating => "rating",
            QuestionType::Boolean => "boolean",
            QuestionType::Date => "date",
            QuestionType::Time => "time",
            QuestionType::Number => "number",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One imported survey question.
///
/// The wire shape (camelCase field names, kebab-case type names) is shared
/// with the remote preview service so that both producers are
/// interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    /// Import-scoped id, `imported_<n>`, contiguous over accepted questions.
    pub id: String,
    /// The question prompt. Never empty.
    pub text: String,
    /// Question type.
    #[serde(rename = "type", default)]
    pub question_type: QuestionType,
    /// Choice options, empty unless the type requires choices.
    #[serde(default)]
    pub options: Vec<String>,
    /// Whether an answer is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Placeholder shown in empty answer fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Lower bound for rating/number answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Upper bound for rating/number answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    /// Score awarded for the question, when the survey is graded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}
