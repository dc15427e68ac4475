//! Quote-aware splitting of one delimited line into raw field strings.

use crate::sniffer::Delimiter;

/// Split a line into fields with a two-state (unquoted/quoted) machine.
///
/// A field enters quoted state only when its first character is `"`; the
/// opening quote is not part of the value. Inside a quoted region, `""`
/// emits one literal quote and a lone `"` exits the region. The delimiter
/// splits only outside quoted regions, and end of line ends the last field.
/// Unquoted values are trimmed of surrounding whitespace; quoted values are
/// kept verbatim beyond the quote removal.
///
/// The same splitter is applied to the header line and every data line,
/// using the delimiter sniffed once from the header.
pub fn split_line(line: &str, delimiter: Delimiter) -> Vec<String> {
    let delim = delimiter.as_char();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut was_quoted = false;
    let mut field_started = false;

    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        if !field_started && c == '"' {
            in_quotes = true;
            was_quoted = true;
            field_started = true;
            continue;
        }
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                current.push(c);
            }
            continue;
        }
        if c == delim {
            fields.push(finish_field(current, was_quoted));
            current = String::new();
            was_quoted = false;
            field_started = false;
        } else {
            field_started = true;
            current.push(c);
        }
    }
    fields.push(finish_field(current, was_quoted));

    fields
}

fn finish_field(value: String, was_quoted: bool) -> String {
    if was_quoted {
        value
    } else {
        value.trim().to_string()
    }
}

/// Trim a raw field and strip one surrounding quote pair if present.
///
/// Tokenized values can still carry quotes when the quote was not the first
/// character of the field; consumption points (header matching, question
/// text, options) strip them with this.
pub fn unquote(value: &str) -> &str {
    let trimmed = value.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('"') && trimmed.ends_with('"') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain() {
        assert_eq!(split_line("a,b,c", Delimiter::Comma), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_embedded_delimiter_inside_quotes() {
        assert_eq!(split_line("\"a, b\",c", Delimiter::Comma), vec!["a, b", "c"]);
    }

    #[test]
    fn test_escaped_quote() {
        assert_eq!(split_line("\"a\"\"b\",c", Delimiter::Comma), vec!["a\"b", "c"]);
    }

    #[test]
    fn test_unquoted_fields_trimmed() {
        assert_eq!(
            split_line("  a  ,\t b ", Delimiter::Comma),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_quoted_fields_not_trimmed() {
        assert_eq!(
            split_line("\"  a  \",b", Delimiter::Comma),
            vec!["  a  ", "b"]
        );
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(split_line("a,,c", Delimiter::Comma), vec!["a", "", "c"]);
        assert_eq!(split_line("a,b,", Delimiter::Comma), vec!["a", "b", ""]);
    }

    #[test]
    fn test_semicolon_and_tab() {
        assert_eq!(split_line("a;b", Delimiter::Semicolon), vec!["a", "b"]);
        assert_eq!(split_line("a\tb", Delimiter::Tab), vec!["a", "b"]);
    }

    #[test]
    fn test_quote_mid_field_is_literal() {
        // quoted state is only entered at the start of a field
        assert_eq!(split_line("a\"b,c", Delimiter::Comma), vec!["a\"b", "c"]);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote(" \"a b\" "), "a b");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("  padded  "), "padded");
        assert_eq!(unquote("\""), "\"");
    }
}
