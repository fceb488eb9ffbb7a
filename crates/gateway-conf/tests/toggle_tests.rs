//! Tests for the entry toggle engine

use gateway_conf::{Document, Error};
use pretty_assertions::assert_eq;

const SOURCE: &str = "\
models:
  - name: alpha
    kind: chat
  - name: \"beta\"
    kind: embed
limits:
  rate: 10
";

#[test]
fn test_disable_comments_every_entry_line() {
    let mut doc = Document::parse("items:\n  - name: foo\n    k: v\n");
    let changed = doc.disable_entry("items", "foo").unwrap();
    assert!(changed);
    assert_eq!(doc.render(), "items:\n#   - name: foo\n#     k: v\n");
    assert!(doc.is_entry_commented("items", "foo"));
}

#[test]
fn test_enable_restores_original_lines_exactly() {
    let source = "items:\n  - name: foo\n    k: v\n";
    let mut doc = Document::parse(source);
    doc.disable_entry("items", "foo").unwrap();
    let changed = doc.enable_entry("items", "foo").unwrap();
    assert!(changed);
    assert_eq!(doc.render(), source);
    assert!(!doc.is_entry_commented("items", "foo"));
}

#[test]
fn test_disable_targets_only_the_named_entry() {
    let mut doc = Document::parse(SOURCE);
    doc.disable_entry("models", "alpha").unwrap();
    assert_eq!(
        doc.render(),
        "models:\n#   - name: alpha\n#     kind: chat\n  - name: \"beta\"\n    kind: embed\nlimits:\n  rate: 10\n"
    );
}

#[test]
fn test_name_match_is_case_insensitive_and_unquoted() {
    let mut doc = Document::parse(SOURCE);
    doc.disable_entry("models", "BETA").unwrap();
    assert!(doc.is_entry_commented("models", "beta"));
}

#[test]
fn test_name_on_sibling_line() {
    let mut doc = Document::parse("models:\n  - kind: chat\n    name: gamma\n");
    doc.disable_entry("models", "gamma").unwrap();
    assert_eq!(doc.render(), "models:\n#   - kind: chat\n#     name: gamma\n");
}

#[test]
fn test_inline_comment_stopped_in_name_value() {
    let doc_text = "models:\n  - name: alpha # primary\n";
    let mut doc = Document::parse(doc_text);
    assert!(doc.disable_entry("models", "alpha").unwrap());
}

#[test]
fn test_disable_already_disabled_is_unchanged() {
    let mut doc = Document::parse(SOURCE);
    doc.disable_entry("models", "alpha").unwrap();
    let text = doc.render();
    assert!(!doc.disable_entry("models", "alpha").unwrap());
    assert_eq!(doc.render(), text);
}

#[test]
fn test_enable_already_active_is_unchanged() {
    let mut doc = Document::parse(SOURCE);
    assert!(!doc.enable_entry("models", "alpha").unwrap());
    assert_eq!(doc.render(), SOURCE);
}

#[test]
fn test_section_not_found() {
    let mut doc = Document::parse(SOURCE);
    let err = doc.disable_entry("providers", "alpha").unwrap_err();
    assert!(matches!(err, Error::SectionNotFound { .. }));
}

#[test]
fn test_entry_not_found() {
    let mut doc = Document::parse(SOURCE);
    let err = doc.disable_entry("models", "missing").unwrap_err();
    assert!(matches!(err, Error::EntryNotFound { .. }));
    let err = doc.enable_entry("models", "missing").unwrap_err();
    assert!(matches!(err, Error::EntryNotFound { .. }));
}

#[test]
fn test_section_bounded_by_next_top_level_key() {
    // `limits` follows the section; its lines must never be touched.
    let mut doc = Document::parse(SOURCE);
    doc.disable_entry("models", "beta").unwrap();
    assert!(doc.render().ends_with("limits:\n  rate: 10\n"));
}

#[test]
fn test_multiply_commented_entry_restored_in_one_step() {
    let source = "models:\n# #   - name: foo\n# #     k: v\n";
    let mut doc = Document::parse(source);
    assert!(doc.is_entry_commented("models", "foo"));
    doc.enable_entry("models", "foo").unwrap();
    assert_eq!(doc.render(), "models:\n  - name: foo\n    k: v\n");
}

#[test]
fn test_blank_line_inside_entry_survives_round_trip() {
    let source = "models:\n  - name: foo\n\n    k: v\n";
    let mut doc = Document::parse(source);
    doc.disable_entry("models", "foo").unwrap();
    assert_eq!(doc.render(), "models:\n#   - name: foo\n\n#     k: v\n");
    doc.enable_entry("models", "foo").unwrap();
    assert_eq!(doc.render(), source);
}

#[test]
fn test_comment_inside_entry_stays_a_comment() {
    let source = "models:\n  - name: foo\n    # internal note\n    k: v\n";
    let mut doc = Document::parse(source);
    doc.disable_entry("models", "foo").unwrap();
    assert_eq!(
        doc.render(),
        "models:\n#   - name: foo\n    # internal note\n#     k: v\n"
    );
    doc.enable_entry("models", "foo").unwrap();
    assert_eq!(doc.render(), source);
}

#[test]
fn test_is_entry_commented_false_when_active_counterpart_exists() {
    let source = "models:\n#   - name: alpha\n#     kind: old\n  - name: alpha\n    kind: chat\n";
    let doc = Document::parse(source);
    assert!(!doc.is_entry_commented("models", "alpha"));
}

#[test]
fn test_commented_entry_names_excludes_active_counterparts() {
    let source = "\
models:
#   - name: old-a
#     kind: chat
  - name: live
    kind: chat
#   - name: live
#     kind: embed
";
    let doc = Document::parse(source);
    assert_eq!(doc.commented_entry_names("models"), vec!["old-a".to_string()]);
}

#[test]
fn test_commented_entry_names_empty_for_missing_section() {
    let doc = Document::parse(SOURCE);
    assert!(doc.commented_entry_names("providers").is_empty());
}

#[test]
fn test_toggle_preserves_crlf() {
    let source = "models:\r\n  - name: foo\r\n    k: v\r\n";
    let mut doc = Document::parse(source);
    doc.disable_entry("models", "foo").unwrap();
    assert_eq!(doc.render(), "models:\r\n#   - name: foo\r\n#     k: v\r\n");
    doc.enable_entry("models", "foo").unwrap();
    assert_eq!(doc.render(), source);
}

#[test]
fn test_commented_section_declaration_is_ignored() {
    let source = "# models:\n#   - name: ghost\nmodels:\n  - name: real\n";
    let mut doc = Document::parse(source);
    doc.disable_entry("models", "real").unwrap();
    assert_eq!(doc.render(), "# models:\n#   - name: ghost\nmodels:\n#   - name: real\n");
}
