//! Read-only accessors.
//!
//! Navigation is identical to the patch applier's; every accessor returns
//! `None` on any path mismatch instead of failing.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::block::{self, Block};
use crate::document::Document;
use crate::line;
use crate::patch;
use crate::path::KeyPath;

/// Decode scalar value text into a typed value.
///
/// Boolean and numeric literals first, then quoted strings (double quotes
/// unescape JSON-style, single quotes treat `''` as one quote), else the raw
/// trimmed text.
pub(crate) fn decode_scalar(text: &str) -> Value {
    if text == "true" {
        return Value::Bool(true);
    }
    if text == "false" {
        return Value::Bool(false);
    }
    if let Ok(i) = text.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = text.parse::<f64>() {
        if let Some(n) = serde_json::Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        if let Ok(s) = serde_json::from_str::<String>(text) {
            return Value::String(s);
        }
    }
    if text.len() >= 2 && text.starts_with('\'') && text.ends_with('\'') {
        return Value::String(text[1..text.len() - 1].replace("''", "'"));
    }
    Value::String(text.to_string())
}

fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Inline value text of the matched declaration line.
fn inline_value<'a>(lines: &'a [String], found: &Block, key: &str) -> Option<&'a str> {
    let text = &lines[found.key_idx];
    let colon = line::match_key(text, key)?;
    Some(line::split_inline_comment(&text[colon..]).0.trim())
}

pub(crate) fn get_scalar(doc: &Document, path: &KeyPath) -> Option<Value> {
    let found = patch::navigate(&doc.lines, path)?;
    let key = path.segments().last()?;
    let value = inline_value(&doc.lines, &found, key)?;
    Some(decode_scalar(value))
}

pub(crate) fn get_string_list(doc: &Document, path: &KeyPath) -> Option<Vec<String>> {
    let found = patch::navigate(&doc.lines, path)?;
    let key = path.segments().last()?;
    let Some(item_indent) = found.child_indent else {
        return match inline_value(&doc.lines, &found, key)? {
            "[]" => Some(Vec::new()),
            _ => None,
        };
    };
    let mut items = Vec::new();
    for text in &doc.lines[found.start..found.end] {
        if !line::is_significant(text) || line::indent_width(text) != item_indent {
            continue;
        }
        let Some(rest) = line::sequence_item_rest(text) else {
            continue;
        };
        let (value, _) = line::split_inline_comment(rest);
        items.push(scalar_to_string(decode_scalar(value.trim())));
    }
    Some(items)
}

pub(crate) fn get_object_list(doc: &Document, path: &KeyPath) -> Option<Vec<Map<String, Value>>> {
    let found = patch::navigate(&doc.lines, path)?;
    let key = path.segments().last()?;
    let Some(item_indent) = found.child_indent else {
        return match inline_value(&doc.lines, &found, key)? {
            "[]" => Some(Vec::new()),
            _ => None,
        };
    };
    let lines = &doc.lines;
    let mut items = Vec::new();
    let mut i = found.start;
    while i < found.end {
        let text = &lines[i];
        let is_marker = line::is_significant(text) && line::indent_width(text) == item_indent;
        let Some(rest) = (if is_marker { line::sequence_item_rest(text) } else { None }) else {
            i += 1;
            continue;
        };
        let mut item = Map::new();
        let (inline, _) = line::split_inline_comment(rest);
        if let Some((field, value)) = split_field(inline.trim()) {
            item.insert(field, value);
        }
        i += 1;
        // Accumulate sibling fields until the next item marker or a dedent.
        let mut field_indent = None;
        while i < found.end {
            let sibling = &lines[i];
            if line::is_significant(sibling) {
                let indent = line::indent_width(sibling);
                if indent <= item_indent {
                    break;
                }
                if indent == *field_indent.get_or_insert(indent) {
                    let (text, _) = line::split_inline_comment(sibling);
                    if let Some((field, value)) = split_field(text.trim()) {
                        item.insert(field, value);
                    }
                }
            }
            i += 1;
        }
        items.push(item);
    }
    Some(items)
}

fn split_field(text: &str) -> Option<(String, Value)> {
    let colon = text.find(':')?;
    let field = text[..colon].trim();
    if field.is_empty() {
        return None;
    }
    let value = text[colon + 1..].trim();
    Some((field.to_string(), decode_scalar(value)))
}

pub(crate) fn list_child_keys(doc: &Document, path: &KeyPath) -> Option<Vec<String>> {
    let (range, child_indent) = if path.is_empty() {
        let range = 0..doc.lines.len();
        match block::first_significant(&doc.lines, range.clone()) {
            Some(first) => (range, line::indent_width(&doc.lines[first])),
            None => return Some(Vec::new()),
        }
    } else {
        let found = patch::navigate(&doc.lines, path)?;
        match found.child_indent {
            Some(indent) => (found.start..found.end, indent),
            None => return Some(Vec::new()),
        }
    };
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for text in &doc.lines[range] {
        if !line::is_significant(text) || line::indent_width(text) != child_indent {
            continue;
        }
        if line::sequence_item_rest(text).is_some() {
            continue;
        }
        let Some(token) = line::key_token(text) else {
            continue;
        };
        if seen.insert(token.to_lowercase()) {
            keys.push(token.to_string());
        }
    }
    Some(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_scalar_literals() {
        assert_eq!(decode_scalar("true"), json!(true));
        assert_eq!(decode_scalar("false"), json!(false));
        assert_eq!(decode_scalar("42"), json!(42));
        assert_eq!(decode_scalar("2.5"), json!(2.5));
        assert_eq!(decode_scalar("bare text"), json!("bare text"));
    }

    #[test]
    fn test_decode_scalar_double_quoted() {
        assert_eq!(decode_scalar(r#""a \"b\" c""#), json!("a \"b\" c"));
        assert_eq!(decode_scalar(r#""line\nbreak""#), json!("line\nbreak"));
    }

    #[test]
    fn test_decode_scalar_single_quoted() {
        assert_eq!(decode_scalar("'it''s'"), json!("it's"));
        assert_eq!(decode_scalar("'plain'"), json!("plain"));
    }

    #[test]
    fn test_decode_scalar_non_finite_stays_text() {
        assert_eq!(decode_scalar("inf"), json!("inf"));
        assert_eq!(decode_scalar("NaN"), json!("NaN"));
    }
}
