//! Whole-block template merging.
//!
//! Takes a free-form snippet for one top-level key and lands it in the
//! document: replacing the existing block when there is one, filling a
//! marker-delimited comment region otherwise, or appending at the end.

use crate::block;
use crate::document::Document;
use crate::format;
use crate::line::{self, LineKind, INDENT_STEP};
use crate::patch::{Edit, EditKind};

/// Normalize a snippet into block lines rooted at `root_key:`.
///
/// Strips a uniform leading comment marker, removes the common indentation,
/// and wraps a bare fragment under a fresh `root_key:` declaration with one
/// extra indent step.
fn normalize_snippet(root_key: &str, snippet: &str) -> Vec<String> {
    let mut lines: Vec<String> = snippet
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l).to_string())
        .collect();

    while lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        return vec![format!("{root_key}:")];
    }

    let all_commented = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .all(|l| l.trim_start().starts_with('#'));
    if all_commented {
        for l in lines.iter_mut() {
            if let Some(hash) = l.find('#') {
                let tail = &l[hash + 1..];
                let tail = tail.strip_prefix(' ').unwrap_or(tail);
                *l = format!("{}{}", &l[..hash], tail);
            }
        }
    }

    let min_indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| line::indent_width(l))
        .min()
        .unwrap_or(0);
    if min_indent > 0 {
        for l in lines.iter_mut() {
            *l = l.get(min_indent..).unwrap_or("").to_string();
        }
    }

    let rooted = lines
        .first()
        .is_some_and(|l| line::indent_width(l) == 0 && line::match_key(l, root_key).is_some());
    if !rooted {
        let mut wrapped = Vec::with_capacity(lines.len() + 1);
        wrapped.push(format!("{root_key}:"));
        for l in &lines {
            if l.trim().is_empty() {
                wrapped.push(String::new());
            } else {
                wrapped.push(format!("{}{}", format::pad(INDENT_STEP), l));
            }
        }
        lines = wrapped;
    }
    lines
}

fn marker_line(marker: &str) -> String {
    if marker.trim_start().starts_with('#') {
        marker.to_string()
    } else {
        format!("# {marker}")
    }
}

pub(crate) fn merge_template(
    doc: &mut Document,
    root_key: &str,
    snippet: &str,
    start_marker: Option<&str>,
    end_marker: Option<&str>,
) -> Edit {
    let block_lines = normalize_snippet(root_key, snippet);

    // Replace an existing top-level block of the key.
    let existing = (0..doc.lines.len()).find(|&i| {
        let l = &doc.lines[i];
        line::classify(l) == LineKind::Content
            && line::indent_width(l) == 0
            && line::match_key(l, root_key).is_some()
    });
    if let Some(idx) = existing {
        let found = block::resolve(&doc.lines, idx);
        let range = found.full_range();
        let start = range.start;
        let count = block_lines.len();
        doc.lines.splice(range, block_lines);
        tracing::debug!(key = root_key, "Replaced existing block from template");
        return Edit {
            kind: EditKind::Replaced,
            lines: start..start + count,
        };
    }

    // Fill a marker-delimited commented region, keeping the start marker.
    if let Some(marker) = start_marker {
        let marked = doc
            .lines
            .iter()
            .position(|l| line::classify(l) == LineKind::Comment && l.contains(marker));
        if let Some(start_idx) = marked {
            let region_end = end_marker
                .and_then(|end| {
                    doc.lines
                        .iter()
                        .enumerate()
                        .skip(start_idx + 1)
                        .find(|(_, l)| line::classify(l) == LineKind::Comment && l.contains(end))
                        .map(|(i, _)| i + 1)
                })
                .unwrap_or_else(|| {
                    let mut i = start_idx + 1;
                    while i < doc.lines.len()
                        && line::classify(&doc.lines[i]) != LineKind::Content
                    {
                        i += 1;
                    }
                    i
                });
            let count = block_lines.len();
            doc.lines.splice(start_idx + 1..region_end, block_lines);
            tracing::debug!(key = root_key, "Filled marker region from template");
            return Edit {
                kind: EditKind::Replaced,
                lines: start_idx + 1..start_idx + 1 + count,
            };
        }
    }

    // Append at end-of-document with one blank separator line on both sides.
    while doc.lines.last().is_some_and(|l| l.trim().is_empty()) {
        doc.lines.pop();
    }
    let start = doc.lines.len();
    if start > 0 {
        doc.lines.push(String::new());
    }
    if let Some(marker) = start_marker {
        doc.lines.push(marker_line(marker));
    }
    doc.lines.extend(block_lines);
    doc.lines.push(String::new());
    let end = doc.lines.len();
    tracing::debug!(key = root_key, "Appended block from template");
    Edit {
        kind: EditKind::Inserted,
        lines: start..end,
    }
}
