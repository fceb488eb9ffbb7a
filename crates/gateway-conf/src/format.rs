//! Rendering of patch values into correctly indented lines.

use serde_json::{Map, Value};

use crate::line::INDENT_STEP;
use crate::patch::Patch;

pub(crate) fn pad(indent: usize) -> String {
    " ".repeat(indent)
}

/// Double-quoted, escaped string literal.
pub(crate) fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Single-line text for a scalar value. Strings are quoted; numbers render as
/// finite decimal text (`0` when non-finite); compound values fall back to
/// their JSON form, which stays readable inline.
pub(crate) fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => quote_string(s),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

fn number_text(n: &serde_json::Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => f.to_string(),
        _ => "0".to_string(),
    }
}

/// Lines declaring `key` with the patch's value, starting at `indent` spaces.
/// `Delete` renders no lines.
pub(crate) fn render_patch(key: &str, patch: &Patch, indent: usize) -> Vec<String> {
    let lead = pad(indent);
    match patch {
        Patch::Scalar(value) => vec![format!("{lead}{key}: {}", scalar_text(value))],
        Patch::StringList(items) if items.is_empty() => vec![format!("{lead}{key}: []")],
        Patch::StringList(items) => {
            let item_lead = pad(indent + INDENT_STEP);
            let mut lines = vec![format!("{lead}{key}:")];
            for item in items {
                lines.push(format!("{item_lead}- {}", quote_string(item)));
            }
            lines
        }
        Patch::ObjectList { items, .. } if items.is_empty() => {
            vec![format!("{lead}{key}: []")]
        }
        Patch::ObjectList { items, key_order } => {
            let mut lines = vec![format!("{lead}{key}:")];
            for item in items {
                object_item_lines(&mut lines, item, key_order.as_deref(), indent + INDENT_STEP);
            }
            lines
        }
        Patch::Delete => Vec::new(),
    }
}

/// One sequence item: the first populated field rides the item marker, the
/// rest become sibling lines one step deeper. Null fields are omitted.
fn object_item_lines(
    lines: &mut Vec<String>,
    item: &Map<String, Value>,
    key_order: Option<&[String]>,
    indent: usize,
) {
    let mut fields: Vec<(&str, &Value)> = Vec::new();
    if let Some(order) = key_order {
        for key in order {
            if let Some(value) = item.get(key) {
                if !value.is_null() {
                    fields.push((key.as_str(), value));
                }
            }
        }
        for (key, value) in item {
            if !order.contains(key) && !value.is_null() {
                fields.push((key.as_str(), value));
            }
        }
    } else {
        for (key, value) in item {
            if !value.is_null() {
                fields.push((key.as_str(), value));
            }
        }
    }

    let lead = pad(indent);
    match fields.split_first() {
        None => lines.push(format!("{lead}- {{}}")),
        Some(((first_key, first_value), rest)) => {
            lines.push(format!("{lead}- {first_key}: {}", scalar_text(first_value)));
            let field_lead = pad(indent + INDENT_STEP);
            for (key, value) in rest {
                lines.push(format!("{field_lead}{key}: {}", scalar_text(value)));
            }
        }
    }
}
