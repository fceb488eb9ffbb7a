//! Patch types and the path navigator / applier.
//!
//! Writes are total: any input text is accepted, missing key chains are
//! created, and `Delete` of a missing path is a no-op. The applier touches
//! only the matched declaration line or block — everything else in the
//! document is left byte-identical.

use std::collections::HashMap;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::block::{self, Block};
use crate::document::Document;
use crate::format;
use crate::line::{self, INDENT_STEP};
use crate::path::KeyPath;

/// A typed instruction to set, replace, or delete the value at a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Patch {
    /// Set a single-line value: string, bool, or number (enums are strings).
    Scalar(Value),
    /// Replace the value with a block sequence of quoted strings.
    StringList(Vec<String>),
    /// Replace the value with a sequence of flat objects.
    ObjectList {
        items: Vec<Map<String, Value>>,
        /// Canonical field order; remaining fields follow in first-seen order.
        key_order: Option<Vec<String>>,
    },
    /// Remove the key and its whole subtree.
    Delete,
}

/// Canonical sibling-key ordering, consulted only when inserting a key that
/// does not exist yet. Keyed by the dotted parent path; the root uses `""`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderHints {
    by_parent: HashMap<String, Vec<String>>,
}

impl OrderHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the canonical child order under `parent` (dotted, `""` = root).
    pub fn set<I, S>(&mut self, parent: impl Into<String>, keys: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.by_parent
            .insert(parent.into(), keys.into_iter().map(Into::into).collect());
    }

    pub fn get(&self, parent: &str) -> Option<&[String]> {
        self.by_parent.get(parent).map(Vec::as_slice)
    }
}

/// The kind of edit an apply call performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditKind {
    /// New lines were inserted.
    Inserted,
    /// An existing line or block was rewritten.
    Replaced,
    /// A block was removed.
    Removed,
    /// Nothing changed.
    Noop,
}

/// Record of what one apply call did, for caller-side audit plumbing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub kind: EditKind,
    /// Affected line range: in the output for inserts and replaces, in the
    /// input for removals.
    pub lines: Range<usize>,
}

impl Edit {
    fn noop() -> Self {
        Self {
            kind: EditKind::Noop,
            lines: 0..0,
        }
    }
}

/// Find a key declaration within `range` at exactly `indent` spaces.
pub(crate) fn find_key_at(
    lines: &[String],
    range: Range<usize>,
    indent: usize,
    key: &str,
) -> Option<usize> {
    lines[range.clone()]
        .iter()
        .position(|l| {
            line::is_significant(l)
                && line::indent_width(l) == indent
                && line::match_key(l, key).is_some()
        })
        .map(|p| range.start + p)
}

/// Walk `path` from the document root without mutating. Each segment must
/// match a key declaration at the expected child indent of the current
/// parent block; any mismatch — including a scalar where a nested block was
/// expected — yields `None`.
pub(crate) fn navigate(lines: &[String], path: &KeyPath) -> Option<Block> {
    let segments = path.segments();
    if segments.is_empty() {
        return None;
    }
    let mut range = 0..lines.len();
    let first = block::first_significant(lines, range.clone())?;
    let mut child_indent = line::indent_width(&lines[first]);
    for (depth, segment) in segments.iter().enumerate() {
        let idx = find_key_at(lines, range.clone(), child_indent, segment)?;
        let found = block::resolve(lines, idx);
        if depth + 1 == segments.len() {
            return Some(found);
        }
        child_indent = found.child_indent?;
        range = found.start..found.end;
    }
    None
}

/// Apply `patch` at `path`, creating missing intermediate keys.
pub(crate) fn apply(doc: &mut Document, path: &KeyPath, patch: &Patch, hints: &OrderHints) -> Edit {
    let segments = path.segments();
    if segments.is_empty() {
        return Edit::noop();
    }

    let mut range = 0..doc.lines.len();
    // Indent of keys at the current depth; None until the parent has a first
    // significant child to take it from.
    let mut child_indent =
        block::first_significant(&doc.lines, range.clone()).map(|i| line::indent_width(&doc.lines[i]));
    let mut insert_indent = child_indent.unwrap_or(0);
    let mut parent_dotted = String::new();

    for (depth, segment) in segments.iter().enumerate() {
        let found = child_indent.and_then(|ci| find_key_at(&doc.lines, range.clone(), ci, segment));
        match found {
            Some(idx) => {
                let found_block = block::resolve(&doc.lines, idx);
                if depth + 1 == segments.len() {
                    let edit = apply_at(doc, &found_block, segment, patch);
                    tracing::debug!(path = %path, kind = ?edit.kind, "Applied configuration patch");
                    return edit;
                }
                match found_block.child_indent {
                    Some(ci) => {
                        range = found_block.start..found_block.end;
                        child_indent = Some(ci);
                        insert_indent = ci;
                    }
                    None => {
                        let key_indent = line::indent_width(&doc.lines[idx]);
                        if declared_value(&doc.lines[idx], segment).is_empty() {
                            // Empty block: descend and place children one
                            // step below the declaration.
                            range = found_block.start..found_block.end;
                            child_indent = None;
                            insert_indent = key_indent + INDENT_STEP;
                        } else {
                            // A scalar occupies this segment. It is treated
                            // as not found: the remaining chain is created as
                            // a sibling rather than overwriting the value.
                            return insert_chain(
                                doc,
                                segments,
                                depth,
                                range,
                                insert_indent,
                                &parent_dotted,
                                patch,
                                hints,
                            );
                        }
                    }
                }
            }
            None => {
                if matches!(patch, Patch::Delete) {
                    return Edit::noop();
                }
                return insert_chain(
                    doc,
                    segments,
                    depth,
                    range,
                    insert_indent,
                    &parent_dotted,
                    patch,
                    hints,
                );
            }
        }
        if !parent_dotted.is_empty() {
            parent_dotted.push('.');
        }
        parent_dotted.push_str(segment);
    }
    Edit::noop()
}

/// Inline value text of a key declaration line, trailing comment excluded.
fn declared_value<'a>(text: &'a str, key: &str) -> &'a str {
    match line::match_key(text, key) {
        Some(colon) => line::split_inline_comment(&text[colon..]).0.trim(),
        None => "",
    }
}

fn apply_at(doc: &mut Document, found: &Block, key: &str, patch: &Patch) -> Edit {
    match patch {
        Patch::Delete => {
            let range = found.full_range();
            doc.lines.drain(range.clone());
            Edit {
                kind: EditKind::Removed,
                lines: range,
            }
        }
        Patch::Scalar(value) => {
            let idx = found.key_idx;
            let Some(colon) = line::match_key(&doc.lines[idx], key) else {
                return Edit::noop();
            };
            let new_line = {
                let old = &doc.lines[idx];
                let (_, comment) = line::split_inline_comment(&old[colon..]);
                format!("{} {}{}", &old[..colon], format::scalar_text(value), comment)
            };
            doc.lines[idx] = new_line;
            Edit {
                kind: EditKind::Replaced,
                lines: idx..idx + 1,
            }
        }
        Patch::StringList(_) | Patch::ObjectList { .. } => {
            let indent = line::indent_width(&doc.lines[found.key_idx]);
            let new_lines = format::render_patch(key, patch, indent);
            let count = new_lines.len();
            let start = found.key_idx;
            doc.lines.splice(found.full_range(), new_lines);
            Edit {
                kind: EditKind::Replaced,
                lines: start..start + count,
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn insert_chain(
    doc: &mut Document,
    segments: &[String],
    depth: usize,
    parent_range: Range<usize>,
    indent: usize,
    parent_dotted: &str,
    patch: &Patch,
    hints: &OrderHints,
) -> Edit {
    if matches!(patch, Patch::Delete) {
        return Edit::noop();
    }
    let position = insertion_index(
        &doc.lines,
        parent_range,
        indent,
        parent_dotted,
        &segments[depth],
        hints,
    );
    let mut new_lines = Vec::new();
    let mut ind = indent;
    for segment in &segments[depth..segments.len() - 1] {
        new_lines.push(format!("{}{}:", format::pad(ind), segment));
        ind += INDENT_STEP;
    }
    new_lines.extend(format::render_patch(&segments[segments.len() - 1], patch, ind));
    let count = new_lines.len();
    let chain = segments[depth..].join(".");
    doc.lines.splice(position..position, new_lines);
    tracing::debug!(key = %chain, line = position, "Inserted missing key chain");
    Edit {
        kind: EditKind::Inserted,
        lines: position..position + count,
    }
}

/// Insertion point for a key that does not exist yet: after the block of the
/// nearest preceding hinted sibling that does, else at the first significant
/// line of the parent range (or its end when it has none).
fn insertion_index(
    lines: &[String],
    parent_range: Range<usize>,
    child_indent: usize,
    parent_dotted: &str,
    key: &str,
    hints: &OrderHints,
) -> usize {
    if let Some(order) = hints.get(parent_dotted) {
        if let Some(position) = order.iter().position(|k| k == key) {
            for prior in order[..position].iter().rev() {
                if let Some(idx) = find_key_at(lines, parent_range.clone(), child_indent, prior) {
                    return block::resolve(lines, idx).end;
                }
            }
        }
    }
    block::first_significant(lines, parent_range.clone()).unwrap_or(parent_range.end)
}
