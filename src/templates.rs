//! Sample documents users can download as a starting point.
//!
//! These are static content; the pipeline never produces them. They double
//! as fixtures for the round-trip tests.

/// Sample JSON survey document.
pub const SAMPLE_JSON: &str = r#"{
  "title": "Customer Feedback",
  "description": "Tell us how we did.",
  "questions": [
    {
      "text": "How would you rate our service?",
      "type": "rating",
      "required": true,
      "minValue": 1,
      "maxValue": 5,
      "points": 10
    },
    {
      "text": "Which features do you use?",
      "type": "multi-choice",
      "options": ["Reports", "Dashboards", "Alerts"],
      "required": false
    },
    {
      "text": "Anything else we should know?",
      "type": "paragraph",
      "required": false,
      "placeholder": "Your comments"
    }
  ]
}
"#;

/// Sample CSV survey document.
pub const SAMPLE_CSV: &str = "\
text,type,options,required,minValue,maxValue,points
What is your full name?,short-text,,true,,,0
How would you rate our support?,rating,,true,1,5,10
Which plan are you on?,dropdown,Free|Pro|Enterprise,true,,,0
What could we improve?,paragraph,,false,,,0
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::{SourceFormat, parse_str};

    #[test]
    fn test_sample_json_parses_clean() {
        let result = parse_str(SAMPLE_JSON, SourceFormat::Json);
        assert!(result.is_previewable());
        assert!(result.warnings.is_empty());
        assert_eq!(result.questions.len(), 3);
    }

    #[test]
    fn test_sample_csv_parses_clean() {
        let result = parse_str(SAMPLE_CSV, SourceFormat::Csv);
        assert!(result.is_previewable());
        assert!(result.warnings.is_empty());
        assert!(result.invalid_rows.is_empty());
        assert_eq!(result.questions.len(), 4);
    }
}
