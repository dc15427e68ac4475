//! Mapping free-text column headers onto the closed set of target fields.

use std::fmt;
use std::sync::LazyLock;

use foldhash::{HashMap, HashMapExt};
use serde::{Deserialize, Serialize};

use crate::tokenizer::unquote;

/// Semantic slot a source column can be mapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TargetField {
    /// The question prompt. The only mandatory target.
    Text,
    /// Question type.
    Type,
    /// Choice options.
    Options,
    /// Mandatory-answer flag.
    Required,
    /// Lower numeric bound.
    MinValue,
    /// Upper numeric bound.
    MaxValue,
    /// Score awarded.
    Points,
}

impl TargetField {
    /// All target fields, in the fixed resolution order.
    pub const ALL: [TargetField; 7] = [
        TargetField::Text,
        TargetField::Type,
        TargetField::Options,
        TargetField::Required,
        TargetField::MinValue,
        TargetField::MaxValue,
        TargetField::Points,
    ];

    /// Wire name of the field.
    pub const fn as_str(self) -> &'static str {
        match self {
            TargetField::Text => "text",
            TargetField::Type => "type",
            TargetField::Options => "options",
            TargetField::Required => "required",
            TargetField::MinValue => "minValue",
            TargetField::MaxValue => "maxValue",
            TargetField::Points => "points",
        }
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength of a column mapping, ordered weakest to strongest.
///
/// Mappings below [`Confidence::High`] are surfaced in the result warnings
/// so the user can verify them before importing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Substring match only.
    Low,
    /// Exact match on an abbreviation.
    Medium,
    /// Exact match on a full synonym.
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::Low => write!(f, "low"),
            Confidence::Medium => write!(f, "medium"),
            Confidence::High => write!(f, "high"),
        }
    }
}

/// One header's resolved mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMapping {
    /// 0-based position in the header row.
    pub header_index: usize,
    /// The header exactly as tokenized.
    pub header_text: String,
    /// Resolved target, or `None` when unmapped.
    pub target_field: Option<TargetField>,
    /// Match strength. [`Confidence::Low`] for unmapped headers.
    pub confidence: Confidence,
}

/// Synonyms per target field, with the confidence an exact match earns.
///
/// Full words match at `High`; abbreviations and generic words (`pts`,
/// `min`, `max`, `value`, `kind`) match at `Medium` so they are flagged for
/// user verification. Table order is the containment-scan order.
const SYNONYMS: &[(TargetField, &[(&str, Confidence)])] = &[
    (
        TargetField::Text,
        &[
            ("text", Confidence::High),
            ("question", Confidence::High),
            ("questiontext", Confidence::High),
            ("prompt", Confidence::High),
        ],
    ),
    (
        TargetField::Type,
        &[
            ("type", Confidence::High),
            ("questiontype", Confidence::High),
            ("kind", Confidence::Medium),
        ],
    ),
    (
        TargetField::Options,
        &[
            ("options", Confidence::High),
            ("choices", Confidence::High),
            ("answers", Confidence::High),
        ],
    ),
    (
        TargetField::Required,
        &[
            ("required", Confidence::High),
            ("mandatory", Confidence::High),
        ],
    ),
    (
        TargetField::MinValue,
        &[
            ("minvalue", Confidence::High),
            ("min", Confidence::Medium),
        ],
    ),
    (
        TargetField::MaxValue,
        &[
            ("maxvalue", Confidence::High),
            ("max", Confidence::Medium),
        ],
    ),
    (
        TargetField::Points,
        &[
            ("points", Confidence::High),
            ("score", Confidence::High),
            ("pts", Confidence::Medium),
            ("value", Confidence::Medium),
        ],
    ),
];

/// Exact-match lookup over the synonym table.
static EXACT: LazyLock<HashMap<&'static str, (TargetField, Confidence)>> = LazyLock::new(|| {
    let mut map = HashMap::with_capacity(32);
    for &(field, synonyms) in SYNONYMS {
        for &(synonym, confidence) in synonyms {
            map.insert(synonym, (field, confidence));
        }
    }
    map
});

/// Containment matches need both sides to carry some signal; one- and
/// two-letter fragments claim targets by accident.
const MIN_CONTAINMENT_LEN: usize = 3;

/// Lowercase and strip non-alphanumerics, the comparison form for header
/// and type matching.
pub(crate) fn normalize_key(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn candidate_for(normalized: &str) -> Option<(TargetField, Confidence)> {
    if normalized.is_empty() {
        return None;
    }
    if let Some(&hit) = EXACT.get(normalized) {
        return Some(hit);
    }
    if normalized.len() < MIN_CONTAINMENT_LEN {
        return None;
    }
    for &(field, synonyms) in SYNONYMS {
        for &(synonym, _) in synonyms {
            if synonym.len() >= MIN_CONTAINMENT_LEN
                && (normalized.contains(synonym) || synonym.contains(normalized))
            {
                return Some((field, Confidence::Low));
            }
        }
    }
    None
}

/// Map tokenized header fields to target fields.
///
/// Each header gets at most one target and each target at most one header.
/// When several headers claim the same target, the highest confidence wins
/// and ties break toward the earlier header; losers are demoted to
/// unmapped. An equal-confidence tie and every winner below `High`
/// confidence produce a warning.
pub fn auto_map_columns(headers: &[String]) -> (Vec<ColumnMapping>, Vec<String>) {
    let mut warnings = Vec::new();

    let mut mappings: Vec<ColumnMapping> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            let candidate = candidate_for(&normalize_key(unquote(header)));
            ColumnMapping {
                header_index: index,
                header_text: header.clone(),
                target_field: candidate.map(|(field, _)| field),
                confidence: candidate.map_or(Confidence::Low, |(_, confidence)| confidence),
            }
        })
        .collect();

    for field in TargetField::ALL {
        let claimants: Vec<usize> = mappings
            .iter()
            .filter(|m| m.target_field == Some(field))
            .map(|m| m.header_index)
            .collect();
        if claimants.len() < 2 {
            continue;
        }

        let Some(winner) = claimants.iter().copied().max_by(|&a, &b| {
            mappings[a]
                .confidence
                .cmp(&mappings[b].confidence)
                .then_with(|| b.cmp(&a))
        }) else {
            continue;
        };

        for &loser in claimants.iter().filter(|&&i| i != winner) {
            if mappings[loser].confidence == mappings[winner].confidence {
                warnings.push(format!(
                    "Columns \"{}\" and \"{}\" both look like {}; using \"{}\"",
                    mappings[winner].header_text,
                    mappings[loser].header_text,
                    field,
                    mappings[winner].header_text,
                ));
            }
            mappings[loser].target_field = None;
        }
    }

    for mapping in &mappings {
        if let Some(field) = mapping.target_field
            && mapping.confidence < Confidence::High
        {
            warnings.push(format!(
                "Column \"{}\" was matched to {} with {} confidence; verify the mapping before importing",
                mapping.header_text, field, mapping.confidence,
            ));
        }
    }

    log::debug!(
        "mapped {} of {} headers",
        mappings.iter().filter(|m| m.target_field.is_some()).count(),
        mappings.len()
    );

    (mappings, warnings)
}

/// Header index mapped to the given target field, if any.
pub(crate) fn index_of(mappings: &[ColumnMapping], field: TargetField) -> Option<usize> {
    mappings
        .iter()
        .find(|m| m.target_field == Some(field))
        .map(|m| m.header_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_exact_full_word_is_high() {
        let (mappings, warnings) = auto_map_columns(&headers(&["Question Text"]));
        assert_eq!(mappings[0].target_field, Some(TargetField::Text));
        assert_eq!(mappings[0].confidence, Confidence::High);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_abbreviation_is_medium_and_warned() {
        let (mappings, warnings) = auto_map_columns(&headers(&["Pts"]));
        assert_eq!(mappings[0].target_field, Some(TargetField::Points));
        assert_eq!(mappings[0].confidence, Confidence::Medium);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Pts"));
        assert!(warnings[0].contains("medium"));
    }

    #[test]
    fn test_containment_is_low() {
        let (mappings, _) = auto_map_columns(&headers(&["the question we ask"]));
        assert_eq!(mappings[0].target_field, Some(TargetField::Text));
        assert_eq!(mappings[0].confidence, Confidence::Low);
    }

    #[test]
    fn test_unmapped_header() {
        let (mappings, warnings) = auto_map_columns(&headers(&["favourite color"]));
        assert_eq!(mappings[0].target_field, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_short_fragments_do_not_map() {
        let (mappings, _) = auto_map_columns(&headers(&["qt"]));
        assert_eq!(mappings[0].target_field, None);
    }

    #[test]
    fn test_conflict_higher_confidence_wins() {
        // "Pts" (medium) loses to "points" (high) regardless of position
        let (mappings, warnings) = auto_map_columns(&headers(&["Pts", "points"]));
        assert_eq!(mappings[0].target_field, None);
        assert_eq!(mappings[1].target_field, Some(TargetField::Points));
        // the silent demotion adds no tie warning
        assert!(warnings.iter().all(|w| !w.contains("both look like")));
    }

    #[test]
    fn test_conflict_equal_confidence_earlier_wins_with_warning() {
        let (mappings, warnings) = auto_map_columns(&headers(&["question", "text"]));
        assert_eq!(mappings[0].target_field, Some(TargetField::Text));
        assert_eq!(mappings[1].target_field, None);
        assert!(warnings.iter().any(|w| w.contains("both look like text")));
    }

    #[test]
    fn test_quoted_header_matches() {
        let (mappings, _) = auto_map_columns(&headers(&["\"required\""]));
        assert_eq!(mappings[0].target_field, Some(TargetField::Required));
        assert_eq!(mappings[0].confidence, Confidence::High);
    }

    #[test]
    fn test_full_sample_header_maps_all_high() {
        let names = ["text", "type", "options", "required", "minValue", "maxValue", "points"];
        let (mappings, warnings) = auto_map_columns(&headers(&names));
        let expected = TargetField::ALL;
        for (mapping, field) in mappings.iter().zip(expected) {
            assert_eq!(mapping.target_field, Some(field));
            assert_eq!(mapping.confidence, Confidence::High);
        }
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key("Question Text"), "questiontext");
        assert_eq!(normalize_key("min_value"), "minvalue");
        assert_eq!(normalize_key("  PTS!  "), "pts");
    }
}
