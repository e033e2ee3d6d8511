// inirs/src/filter.rs

//! Line normalization and classification.
//!
//! Every line read from an INI file goes through [`filter_line`] before the
//! parser looks at it. Spaces and tabs are removed from the whole line, not
//! only from its ends, so `key = some value` is read as `key=somevalue`.

use std::borrow::Cow;

/// Characters that start a comment line.
pub const COMMENT_CHARS: [char; 2] = [';', '#'];

/// What a line looks like after whitespace stripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Nothing left after stripping.
    Blank,
    /// Starts with `;` or `#`.
    Comment,
    /// Starts with `[`. The closing `]` may still be missing.
    SectionHeader,
    /// Contains `=`.
    KeyValue,
    /// Retained, but neither a header nor an assignment.
    Other,
}

/// A stripped line together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredLine {
    pub text: String,
    pub kind: LineKind,
}

impl FilteredLine {
    /// Whether the parser should look at this line at all.
    pub fn keep(&self) -> bool {
        !matches!(self.kind, LineKind::Blank | LineKind::Comment)
    }
}

/// Remove spaces and tabs from a section or key name, as the parser does.
///
/// Lookups go through this so that `server options` finds `[server options]`.
pub fn strip_blanks(name: &str) -> Cow<'_, str> {
    if name.contains(&[' ', '\t'][..]) {
        Cow::Owned(name.chars().filter(|&c| !matches!(c, ' ' | '\t')).collect())
    } else {
        Cow::Borrowed(name)
    }
}

/// Strip horizontal whitespace from `raw` and classify what remains.
///
/// Line terminators (`\n`, `\r\n`) are dropped as well.
pub fn filter_line(raw: &str) -> FilteredLine {
    let text = strip_blanks(raw.trim_end_matches(|c: char| c == '\n' || c == '\r')).into_owned();

    let kind = match text.chars().next() {
        None => LineKind::Blank,
        Some(c) if COMMENT_CHARS.contains(&c) => LineKind::Comment,
        Some('[') => LineKind::SectionHeader,
        Some(_) if text.contains('=') => LineKind::KeyValue,
        Some(_) => LineKind::Other,
    };

    FilteredLine { text, kind }
}

/// Whether `raw` is a comment line once whitespace is ignored.
pub fn is_comment(raw: &str) -> bool {
    filter_line(raw).kind == LineKind::Comment
}
