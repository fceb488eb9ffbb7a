//! Enable and disable sequence entries by commenting their lines.
//!
//! Works on the same line model as the patch applier but in a different
//! domain: one top-level sequence (the section) whose items (entries) are
//! identified by an inner `name:` field. Disabling wraps an entry's lines in
//! comment markers; enabling unwraps them in one step.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::line::{self, LineKind, INDENT_STEP};

/// Pattern for a `name:` field and its raw value text.
static NAME_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^name\s*:\s*(.*)$").expect("Invalid name field regex"));

/// Line range of one top-level sequence's items.
struct Section {
    start: usize,
    end: usize,
    item_indent: usize,
}

/// One sequence item, with its extracted `name` value when present.
struct Entry {
    start: usize,
    end: usize,
    name: Option<String>,
}

impl Entry {
    fn matches(&self, target: &str) -> bool {
        self.name
            .as_deref()
            .is_some_and(|n| n.to_lowercase() == target)
    }
}

fn normalized(name: &str) -> String {
    name.trim().to_lowercase()
}

/// First uncommented top-level declaration of `key`, spanning until the next
/// uncommented content line at or below its indent.
fn find_section(lines: &[String], key: &str) -> Option<Section> {
    let key_idx = (0..lines.len()).find(|&i| {
        let l = &lines[i];
        line::classify(l) == LineKind::Content
            && line::indent_width(l) == 0
            && line::match_key(l, key).is_some()
    })?;
    let start = key_idx + 1;
    let mut end = lines.len();
    for (i, l) in lines.iter().enumerate().skip(start) {
        if line::classify(l) == LineKind::Content && line::indent_width(l) == 0 {
            end = i;
            break;
        }
    }
    Some(Section {
        start,
        end,
        item_indent: INDENT_STEP,
    })
}

fn active_marker(text: &str, item_indent: usize) -> bool {
    line::classify(text) == LineKind::Content
        && line::indent_width(text) == item_indent
        && line::sequence_item_rest(text).is_some()
}

fn commented_marker(text: &str, item_indent: usize) -> bool {
    if line::classify(text) != LineKind::Comment {
        return false;
    }
    let stripped = line::strip_comment_markers(text);
    line::indent_width(stripped) == item_indent && line::sequence_item_rest(stripped).is_some()
}

fn continues_active_entry(text: &str, item_indent: usize) -> bool {
    match line::classify(text) {
        LineKind::Blank => true,
        LineKind::Comment => !commented_marker(text, item_indent),
        LineKind::Content => line::indent_width(text) > item_indent,
    }
}

fn continues_commented_entry(text: &str, item_indent: usize) -> bool {
    match line::classify(text) {
        LineKind::Blank => true,
        LineKind::Comment => {
            let stripped = line::strip_comment_markers(text);
            if line::indent_width(stripped) == item_indent
                && line::sequence_item_rest(stripped).is_some()
            {
                return false;
            }
            line::indent_width(stripped) > item_indent || stripped.trim().is_empty()
        }
        LineKind::Content => false,
    }
}

/// Extract the entry's name from the inline field on the marker line or a
/// sibling `name:` one step deeper. Quoted and bare values are accepted;
/// inline comments are stopped at.
fn entry_name(entry_lines: &[String], item_indent: usize, stripped: bool) -> Option<String> {
    let field_indent = item_indent + INDENT_STEP;
    for (i, raw) in entry_lines.iter().enumerate() {
        let text = if stripped {
            line::strip_comment_markers(raw)
        } else {
            raw.as_str()
        };
        let field = if i == 0 {
            match line::sequence_item_rest(text) {
                Some(rest) => rest.trim_start(),
                None => continue,
            }
        } else if line::classify(text) == LineKind::Content
            && line::indent_width(text) == field_indent
        {
            text.trim_start()
        } else {
            continue;
        };
        if let Some(caps) = NAME_FIELD.captures(field) {
            let raw_value = caps.get(1).map_or("", |m| m.as_str());
            let (value, _) = line::split_inline_comment(raw_value);
            let name = unquote(value.trim());
            if !name.is_empty() {
                return Some(name);
            }
        }
    }
    None
}

fn unquote(value: &str) -> String {
    if value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')))
    {
        value[1..value.len() - 1].to_string()
    } else {
        value.to_string()
    }
}

fn collect_entries(
    lines: &[String],
    section: &Section,
    is_marker: fn(&str, usize) -> bool,
    continues: fn(&str, usize) -> bool,
    stripped: bool,
) -> Vec<Entry> {
    let mut entries = Vec::new();
    let mut i = section.start;
    while i < section.end {
        if !is_marker(&lines[i], section.item_indent) {
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        while i < section.end && continues(&lines[i], section.item_indent) {
            i += 1;
        }
        let name = entry_name(&lines[start..i], section.item_indent, stripped);
        entries.push(Entry { start, end: i, name });
    }
    entries
}

fn active_entries(lines: &[String], section: &Section) -> Vec<Entry> {
    collect_entries(lines, section, active_marker, continues_active_entry, false)
}

fn commented_entries(lines: &[String], section: &Section) -> Vec<Entry> {
    collect_entries(
        lines,
        section,
        commented_marker,
        continues_commented_entry,
        true,
    )
}

pub(crate) fn disable_entry(doc: &mut Document, section_key: &str, name: &str) -> Result<bool> {
    let section = find_section(&doc.lines, section_key).ok_or_else(|| Error::SectionNotFound {
        key: section_key.to_string(),
    })?;
    let target = normalized(name);
    let active = active_entries(&doc.lines, &section)
        .into_iter()
        .find(|e| e.matches(&target));
    if let Some(entry) = active {
        for i in entry.start..entry.end {
            if line::classify(&doc.lines[i]) == LineKind::Content {
                doc.lines[i] = format!("# {}", doc.lines[i]);
            }
        }
        tracing::debug!(section = section_key, name, line = entry.start, "Disabled entry");
        return Ok(true);
    }
    if commented_entries(&doc.lines, &section)
        .iter()
        .any(|e| e.matches(&target))
    {
        return Ok(false);
    }
    Err(Error::EntryNotFound {
        section: section_key.to_string(),
        name: name.to_string(),
    })
}

pub(crate) fn enable_entry(doc: &mut Document, section_key: &str, name: &str) -> Result<bool> {
    let section = find_section(&doc.lines, section_key).ok_or_else(|| Error::SectionNotFound {
        key: section_key.to_string(),
    })?;
    let target = normalized(name);
    let commented = commented_entries(&doc.lines, &section)
        .into_iter()
        .find(|e| e.matches(&target));
    if let Some(entry) = commented {
        for i in entry.start..entry.end {
            let restored = line::strip_comment_markers(&doc.lines[i]).to_string();
            doc.lines[i] = restored;
        }
        tracing::debug!(section = section_key, name, line = entry.start, "Enabled entry");
        return Ok(true);
    }
    if active_entries(&doc.lines, &section)
        .iter()
        .any(|e| e.matches(&target))
    {
        return Ok(false);
    }
    Err(Error::EntryNotFound {
        section: section_key.to_string(),
        name: name.to_string(),
    })
}

pub(crate) fn is_entry_commented(doc: &Document, section_key: &str, name: &str) -> bool {
    let Some(section) = find_section(&doc.lines, section_key) else {
        return false;
    };
    let target = normalized(name);
    commented_entries(&doc.lines, &section)
        .iter()
        .any(|e| e.matches(&target))
        && !active_entries(&doc.lines, &section)
            .iter()
            .any(|e| e.matches(&target))
}

pub(crate) fn commented_entry_names(doc: &Document, section_key: &str) -> Vec<String> {
    let Some(section) = find_section(&doc.lines, section_key) else {
        return Vec::new();
    };
    let active: HashSet<String> = active_entries(&doc.lines, &section)
        .into_iter()
        .filter_map(|e| e.name.map(|n| normalized(&n)))
        .collect();
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for entry in commented_entries(&doc.lines, &section) {
        if let Some(name) = entry.name {
            let norm = normalized(&name);
            if !active.contains(&norm) && seen.insert(norm) {
                names.push(name);
            }
        }
    }
    names
}
