//! Block boundary resolution.
//!
//! A block is the contiguous line range holding a key's nested value. It is
//! defined purely by indentation ancestry and is recomputed on every call —
//! boundaries are never cached across edits.

use std::ops::Range;

use crate::line::{self, LineKind};

/// The resolved extent of a key's value subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Index of the key's declaration line.
    pub key_idx: usize,
    /// First line of the nested value; equals `key_idx + 1` even when empty.
    pub start: usize,
    /// Exclusive end of the nested value.
    pub end: usize,
    /// Indent of the first significant child line, `None` for a leaf.
    pub child_indent: Option<usize>,
}

impl Block {
    /// True when the key has no nested lines (scalar or empty value).
    pub fn is_leaf(&self) -> bool {
        self.child_indent.is_none()
    }

    /// Line range of the declaration plus its subtree.
    pub fn full_range(&self) -> Range<usize> {
        self.key_idx..self.end.max(self.key_idx + 1)
    }
}

/// Resolve the block declared at `key_idx`.
///
/// The first significant line after the key decides leafness: if its indent
/// is not strictly greater than the key's, the key is a leaf and the block is
/// the declaration line alone. Otherwise the block runs to the first
/// significant line at or above the key's indent, trimmed backward over
/// trailing blank lines and trailing comments at or below the child indent —
/// a trailing comment at the parent's own level stays with the parent.
pub fn resolve(lines: &[String], key_idx: usize) -> Block {
    let key_indent = line::indent_width(&lines[key_idx]);

    let first_child = lines
        .iter()
        .enumerate()
        .skip(key_idx + 1)
        .find(|(_, l)| line::is_significant(l))
        .filter(|(_, l)| line::indent_width(l) > key_indent);
    let Some((child_idx, child_line)) = first_child else {
        return Block {
            key_idx,
            start: key_idx + 1,
            end: key_idx + 1,
            child_indent: None,
        };
    };
    let child_indent = line::indent_width(child_line);

    let mut end = lines.len();
    for (i, l) in lines.iter().enumerate().skip(key_idx + 1) {
        if line::is_significant(l) && line::indent_width(l) <= key_indent {
            end = i;
            break;
        }
    }

    while end > child_idx + 1 {
        let trailing = &lines[end - 1];
        let excluded = match line::classify(trailing) {
            LineKind::Blank => true,
            LineKind::Comment => line::indent_width(trailing) <= child_indent,
            LineKind::Content => false,
        };
        if !excluded {
            break;
        }
        end -= 1;
    }

    Block {
        key_idx,
        start: key_idx + 1,
        end,
        child_indent: Some(child_indent),
    }
}

/// Index of the first significant line in `range`, if any.
pub(crate) fn first_significant(lines: &[String], range: Range<usize>) -> Option<usize> {
    lines[range.clone()]
        .iter()
        .position(|l| line::is_significant(l))
        .map(|p| range.start + p)
}
