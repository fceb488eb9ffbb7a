//! Line classification and scanning primitives.
//!
//! Everything in this crate works on whole lines: a document is a list of
//! lines, and structure is derived from indentation alone. This module holds
//! the per-line helpers — classification, indent math, quote-aware comment
//! splitting, and key-token matching.

/// Width of one nesting level, in spaces.
pub const INDENT_STEP: usize = 2;

/// Coarse classification of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Only whitespace.
    Blank,
    /// First non-space character is `#`.
    Comment,
    /// Anything else.
    Content,
}

/// Classify a line as blank, comment, or content.
pub fn classify(text: &str) -> LineKind {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with('#') {
        LineKind::Comment
    } else {
        LineKind::Content
    }
}

/// Count of leading spaces. Tabs are not treated as indentation.
pub fn indent_width(text: &str) -> usize {
    text.len() - text.trim_start_matches(' ').len()
}

/// True for lines that carry structure (content, not blank or comment).
pub fn is_significant(text: &str) -> bool {
    classify(text) == LineKind::Content
}

/// Split a content line's value portion from its trailing comment.
///
/// Returns `(value, comment_suffix)` where the suffix includes the whitespace
/// run before the `#`. A `#` inside a single- or double-quoted region is not
/// a comment start; backslash escapes are honored only inside double quotes.
///
/// # Examples
///
/// ```
/// use gateway_conf::line::split_inline_comment;
///
/// assert_eq!(split_inline_comment("8080 # default"), ("8080", " # default"));
/// assert_eq!(split_inline_comment(r#""a # b""#), (r#""a # b""#, ""));
/// ```
pub fn split_inline_comment(text: &str) -> (&str, &str) {
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;
    for (i, ch) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_double => escaped = true,
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double => {
                let cut = text[..i].trim_end().len();
                return (&text[..cut], &text[cut..]);
            }
            _ => {}
        }
    }
    (text, "")
}

/// Match a key declaration: the exact token `key`, optional spaces, then `:`.
///
/// Returns the byte offset just past the colon, or `None` if the line does
/// not declare `key`. The colon requirement keeps a key from matching a
/// sibling whose name it merely prefixes.
pub fn match_key(text: &str, key: &str) -> Option<usize> {
    if key.is_empty() {
        return None;
    }
    let rest = text[indent_width(text)..].strip_prefix(key)?;
    let after = rest.trim_start_matches(' ');
    if after.starts_with(':') {
        Some(text.len() - after.len() + 1)
    } else {
        None
    }
}

/// Key token of a content line: the trimmed text before the first colon in
/// the value portion. `None` for comments, sequence items, and lines without
/// a colon.
pub fn key_token(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    if trimmed.starts_with('#') || trimmed.starts_with('-') {
        return None;
    }
    let (value, _) = split_inline_comment(trimmed);
    let colon = value.find(':')?;
    let token = value[..colon].trim();
    if token.is_empty() { None } else { Some(token) }
}

/// The text after a sequence item marker (`- `), or `None` if the line is
/// not an item. A bare `-` counts as an item with empty text.
pub fn sequence_item_rest(text: &str) -> Option<&str> {
    let rest = text.trim_start_matches(' ').strip_prefix('-')?;
    if rest.is_empty() {
        Some("")
    } else {
        rest.strip_prefix(' ')
    }
}

/// Strip repeated leading comment markers (`#` plus one optional space) from
/// the start of a line. Restores multiply-commented lines in one step.
pub fn strip_comment_markers(text: &str) -> &str {
    let mut rest = text;
    while let Some(stripped) = rest.strip_prefix('#') {
        rest = stripped.strip_prefix(' ').unwrap_or(stripped);
    }
    rest
}
