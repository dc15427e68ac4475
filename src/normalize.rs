//! Text normalization ahead of delimiter sniffing and tokenization.

/// Normalized input text: line endings folded to LF, BOM stripped, and the
/// non-blank lines split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    /// The full normalized text, unsplit.
    pub text: String,
    /// Non-blank lines, in order. A line is dropped if it is empty after
    /// trimming; surviving lines are kept untrimmed for the tokenizer.
    pub lines: Vec<String>,
}

impl NormalizedText {
    /// Returns true if no non-blank lines survived normalization.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Normalize raw input text.
///
/// Drops a leading U+FEFF (the decoded UTF-8 BOM), folds `\r\n` and lone
/// `\r` to `\n`, and splits out non-blank lines. Never fails; an empty
/// result is the caller's fatal condition to report, not this module's.
pub fn normalize(input: &str) -> NormalizedText {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let text = fold_line_endings(input);

    let mut lines = Vec::with_capacity(bytecount::count(text.as_bytes(), b'\n') + 1);
    lines.extend(
        text.split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string),
    );

    NormalizedText { text, lines }
}

/// Fold `\r\n` and standalone `\r` to `\n` in a single pass.
fn fold_line_endings(input: &str) -> String {
    if !input.contains('\r') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}
