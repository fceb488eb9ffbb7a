//! Tests for read-only accessors

use gateway_conf::{Document, KeyPath};
use pretty_assertions::assert_eq;
use serde_json::json;

const SOURCE: &str = "\
# gateway configuration
server:
  host: \"example.com\"
  port: 8080 # default
  tls: true
  ratio: 0.5
  motto: 'it''s fine'
  empty:
models:
  - name: alpha
    kind: chat
  - name: \"beta\" # staging
    kind: embed
    priority: 2
tags:
  - \"prod\"
  - staging
  - 42
limits: []
";

#[test]
fn test_get_scalar_types() {
    let doc = Document::parse(SOURCE);
    assert_eq!(doc.get_scalar(&KeyPath::parse("server.host")), Some(json!("example.com")));
    assert_eq!(doc.get_scalar(&KeyPath::parse("server.port")), Some(json!(8080)));
    assert_eq!(doc.get_scalar(&KeyPath::parse("server.tls")), Some(json!(true)));
    assert_eq!(doc.get_scalar(&KeyPath::parse("server.ratio")), Some(json!(0.5)));
    assert_eq!(doc.get_scalar(&KeyPath::parse("server.motto")), Some(json!("it's fine")));
}

#[test]
fn test_get_scalar_ignores_inline_comment() {
    let doc = Document::parse("key: value # note\n");
    assert_eq!(doc.get_scalar(&KeyPath::parse("key")), Some(json!("value")));
}

#[test]
fn test_get_scalar_hash_inside_quotes() {
    let doc = Document::parse("key: \"a # b\" # real comment\n");
    assert_eq!(doc.get_scalar(&KeyPath::parse("key")), Some(json!("a # b")));
}

#[test]
fn test_get_scalar_empty_value() {
    let doc = Document::parse(SOURCE);
    assert_eq!(doc.get_scalar(&KeyPath::parse("server.empty")), Some(json!("")));
}

#[test]
fn test_get_scalar_missing_paths() {
    let doc = Document::parse(SOURCE);
    assert_eq!(doc.get_scalar(&KeyPath::parse("server.absent")), None);
    assert_eq!(doc.get_scalar(&KeyPath::parse("absent.key")), None);
    // A scalar where a nested block was expected reads as not found.
    assert_eq!(doc.get_scalar(&KeyPath::parse("server.port.deep")), None);
}

#[test]
fn test_get_string_list() {
    let doc = Document::parse(SOURCE);
    assert_eq!(
        doc.get_string_list(&KeyPath::parse("tags")),
        Some(vec!["prod".to_string(), "staging".to_string(), "42".to_string()])
    );
}

#[test]
fn test_get_string_list_empty_inline() {
    let doc = Document::parse(SOURCE);
    assert_eq!(doc.get_string_list(&KeyPath::parse("limits")), Some(Vec::new()));
}

#[test]
fn test_get_string_list_not_a_list() {
    let doc = Document::parse(SOURCE);
    assert_eq!(doc.get_string_list(&KeyPath::parse("server.port")), None);
    assert_eq!(doc.get_string_list(&KeyPath::parse("missing")), None);
}

#[test]
fn test_get_object_list() {
    let doc = Document::parse(SOURCE);
    let items = doc.get_object_list(&KeyPath::parse("models")).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get("name"), Some(&json!("alpha")));
    assert_eq!(items[0].get("kind"), Some(&json!("chat")));
    assert_eq!(items[1].get("name"), Some(&json!("beta")));
    assert_eq!(items[1].get("priority"), Some(&json!(2)));
}

#[test]
fn test_get_object_list_marker_without_inline_field() {
    let doc = Document::parse("m:\n  -\n    name: a\n  - name: b\n");
    let items = doc.get_object_list(&KeyPath::parse("m")).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].get("name"), Some(&json!("a")));
    assert_eq!(items[1].get("name"), Some(&json!("b")));
}

#[test]
fn test_get_object_list_stops_fields_at_dedent() {
    let doc = Document::parse("m:\n  - name: a\nother: 1\n");
    let items = doc.get_object_list(&KeyPath::parse("m")).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].len(), 1);
}

#[test]
fn test_list_child_keys_root() {
    let doc = Document::parse(SOURCE);
    assert_eq!(
        doc.list_child_keys(&KeyPath::default()),
        Some(vec![
            "server".to_string(),
            "models".to_string(),
            "tags".to_string(),
            "limits".to_string()
        ])
    );
}

#[test]
fn test_list_child_keys_nested() {
    let doc = Document::parse(SOURCE);
    assert_eq!(
        doc.list_child_keys(&KeyPath::parse("server")),
        Some(vec![
            "host".to_string(),
            "port".to_string(),
            "tls".to_string(),
            "ratio".to_string(),
            "motto".to_string(),
            "empty".to_string()
        ])
    );
}

#[test]
fn test_list_child_keys_skips_sequence_items() {
    let doc = Document::parse(SOURCE);
    assert_eq!(doc.list_child_keys(&KeyPath::parse("models")), Some(Vec::new()));
}

#[test]
fn test_list_child_keys_case_insensitive_dedup() {
    let doc = Document::parse("a:\n  Key: 1\n  key: 2\n  other: 3\n");
    assert_eq!(
        doc.list_child_keys(&KeyPath::parse("a")),
        Some(vec!["Key".to_string(), "other".to_string()])
    );
}

#[test]
fn test_list_child_keys_of_leaf_is_empty() {
    let doc = Document::parse("a: 1\n");
    assert_eq!(doc.list_child_keys(&KeyPath::parse("a")), Some(Vec::new()));
}

#[test]
fn test_query_does_not_modify() {
    let doc = Document::parse(SOURCE);
    let _ = doc.get_object_list(&KeyPath::parse("models"));
    let _ = doc.get_string_list(&KeyPath::parse("tags"));
    assert!(!doc.is_modified());
}
