//! Unified Document type

use serde_json::{Map, Value};

use crate::error::Result;
use crate::patch::{Edit, OrderHints, Patch};
use crate::path::KeyPath;
use crate::{patch, query, template, toggle};

/// Newline convention of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Newline {
    Lf,
    CrLf,
}

impl Newline {
    pub fn as_str(self) -> &'static str {
        match self {
            Newline::Lf => "\n",
            Newline::CrLf => "\r\n",
        }
    }
}

/// A configuration document as an ordered list of lines.
///
/// Constructed once per call from the full input text and re-serialized with
/// [`render`](Document::render). The newline convention and the presence of a
/// trailing newline are detected at parse time and preserved on output; every
/// line not touched by an edit is emitted byte-identical, comments and key
/// order included.
///
/// Concurrent edit sessions against the same underlying text must be
/// serialized by the caller: two edits applied to diverging snapshots clobber
/// each other on save.
pub struct Document {
    original_source: String,
    pub(crate) lines: Vec<String>,
    newline: Newline,
    trailing_newline: bool,
}

impl Document {
    /// Parse content into the line model. Total: any text is accepted.
    ///
    /// CRLF is detected by presence anywhere in the input; a document with
    /// mixed endings is normalized to the detected style on render.
    pub fn parse(source: &str) -> Self {
        let newline = if source.contains("\r\n") {
            Newline::CrLf
        } else {
            Newline::Lf
        };
        let trailing_newline = source.is_empty() || source.ends_with('\n');
        let body = source
            .strip_suffix('\n')
            .map(|b| b.strip_suffix('\r').unwrap_or(b))
            .unwrap_or(source);
        let lines = if body.is_empty() && !source.ends_with('\n') {
            Vec::new()
        } else {
            body.split('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
                .collect()
        };
        Self {
            original_source: source.to_string(),
            lines,
            newline,
            trailing_newline,
        }
    }

    /// Re-serialize with the original newline convention and trailing-newline
    /// presence.
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join(self.newline.as_str());
        if self.trailing_newline {
            out.push_str(self.newline.as_str());
        }
        out
    }

    /// The text given to [`parse`](Document::parse).
    pub fn source(&self) -> &str {
        &self.original_source
    }

    /// Current lines, without line terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn newline(&self) -> Newline {
        self.newline
    }

    /// Check if the document has been modified since parse.
    pub fn is_modified(&self) -> bool {
        self.render() != self.original_source
    }

    /// Apply one patch at `path`, creating missing intermediate keys.
    ///
    /// Never fails: reads of malformed text degrade to insertion, and
    /// `Delete` of a missing path is a no-op. A scalar sitting where a nested
    /// block was expected is treated as not found at that depth, so the write
    /// creates a new sibling chain instead of overwriting it. No post-write
    /// validation is performed; callers needing a structural guarantee must
    /// re-parse the output independently.
    ///
    /// # Examples
    ///
    /// ```
    /// use gateway_conf::{Document, KeyPath, OrderHints, Patch};
    /// use serde_json::json;
    ///
    /// let mut doc = Document::parse("server:\n  port: 8080 # keep\n");
    /// let path = KeyPath::parse("server.port");
    /// doc.apply(&path, &Patch::Scalar(json!(9090)), &OrderHints::new());
    /// assert_eq!(doc.render(), "server:\n  port: 9090 # keep\n");
    /// ```
    pub fn apply(&mut self, path: &KeyPath, patch: &Patch, hints: &OrderHints) -> Edit {
        patch::apply(self, path, patch, hints)
    }

    /// Apply a batch of patches in order, returning one [`Edit`] per patch.
    pub fn apply_all(&mut self, patches: &[(KeyPath, Patch)], hints: &OrderHints) -> Vec<Edit> {
        patches
            .iter()
            .map(|(path, patch)| patch::apply(self, path, patch, hints))
            .collect()
    }

    /// Decode the scalar at `path`.
    ///
    /// Boolean and numeric literals become typed values; double-quoted text
    /// is unescaped JSON-style and single-quoted text honors doubled-quote
    /// escaping; anything else is the raw trimmed text. `None` on any path
    /// mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// use gateway_conf::{Document, KeyPath};
    /// use serde_json::json;
    ///
    /// let doc = Document::parse("server:\n  port: 8080 # default\n");
    /// assert_eq!(doc.get_scalar(&KeyPath::parse("server.port")), Some(json!(8080)));
    /// assert_eq!(doc.get_scalar(&KeyPath::parse("server.missing")), None);
    /// ```
    pub fn get_scalar(&self, path: &KeyPath) -> Option<Value> {
        query::get_scalar(self, path)
    }

    /// Decode the block sequence at `path` as strings.
    pub fn get_string_list(&self, path: &KeyPath) -> Option<Vec<String>> {
        query::get_string_list(self, path)
    }

    /// Decode the block sequence at `path` as flat objects.
    pub fn get_object_list(&self, path: &KeyPath) -> Option<Vec<Map<String, Value>>> {
        query::get_object_list(self, path)
    }

    /// Immediate child keys of the mapping at `path`, de-duplicated
    /// case-insensitively in first-seen order. The empty path enumerates the
    /// document's root keys.
    pub fn list_child_keys(&self, path: &KeyPath) -> Option<Vec<String>> {
        query::list_child_keys(self, path)
    }

    /// Replace or insert the whole top-level block for `root_key` from a
    /// free-form snippet.
    ///
    /// The snippet may already be rooted at `root_key:` or be a bare
    /// fragment; uniform comment markers and common indentation are stripped
    /// before it is placed. An existing block is replaced in place; otherwise
    /// a comment region delimited by `start_marker` (and optionally
    /// `end_marker`) is filled; otherwise the block is appended at
    /// end-of-document.
    pub fn merge_template(
        &mut self,
        root_key: &str,
        snippet: &str,
        start_marker: Option<&str>,
        end_marker: Option<&str>,
    ) -> Edit {
        template::merge_template(self, root_key, snippet, start_marker, end_marker)
    }

    /// Comment out the entry named `name` in the top-level sequence at
    /// `section_key`.
    ///
    /// Returns `Ok(true)` when lines were changed, `Ok(false)` when the entry
    /// is already disabled, and an error when the section or the name cannot
    /// be found in either state.
    pub fn disable_entry(&mut self, section_key: &str, name: &str) -> Result<bool> {
        toggle::disable_entry(self, section_key, name)
    }

    /// Uncomment the entry named `name`, restoring its lines in one step no
    /// matter how many times it was previously disabled.
    pub fn enable_entry(&mut self, section_key: &str, name: &str) -> Result<bool> {
        toggle::enable_entry(self, section_key, name)
    }

    /// True only if a commented entry named `name` exists and no active entry
    /// carries the same name.
    pub fn is_entry_commented(&self, section_key: &str, name: &str) -> bool {
        toggle::is_entry_commented(self, section_key, name)
    }

    /// Names of commented entries, excluding any name that also has an active
    /// counterpart.
    pub fn commented_entry_names(&self, section_key: &str) -> Vec<String> {
        toggle::commented_entry_names(self, section_key)
    }
}
