//! Edge case and stress tests for fos-html
//!
//! Malformed markup, attribute forms, entities and large inputs.

use fos_dom::{Document, NodeId};
use fos_html::parse;

fn first_element(doc: &Document) -> NodeId {
    doc.tree().element_children(doc.body())[0]
}

// ============================================================================
// EMPTY AND MINIMAL INPUT
// ============================================================================

#[test]
fn test_parse_empty() {
    let doc = parse("").unwrap();
    assert!(doc.body().is_valid());
    assert!(doc.tree().element_children(doc.body()).is_empty());
}

#[test]
fn test_parse_only_whitespace() {
    let doc = parse("   \t\n\r\n   ").unwrap();
    assert!(doc.tree().child_ids(doc.body()).is_empty());
}

#[test]
fn test_parse_only_doctype() {
    let doc = parse("<!DOCTYPE html>").unwrap();
    assert!(doc.document_element().is_valid());
}

// ============================================================================
// MALFORMED HTML
// ============================================================================

#[test]
fn test_parse_unclosed_tags() {
    let doc = parse("<div><p><span>text").unwrap();
    assert_eq!(doc.tree().text_content(doc.body()), "text");
}

#[test]
fn test_parse_mismatched_tags() {
    let doc = parse("<div><p></div></p>").unwrap();
    assert!(doc.tree().len() > 4);
}

#[test]
fn test_parse_orphan_closing_tag() {
    let doc = parse("</div>").unwrap();
    assert!(doc.tree().element_children(doc.body()).is_empty());
}

#[test]
fn test_parse_nested_paragraphs_are_split() {
    let doc = parse("<p>a<p>b").unwrap();
    assert_eq!(doc.tree().element_children(doc.body()).len(), 2);
}

// ============================================================================
// ATTRIBUTES
// ============================================================================

#[test]
fn test_attribute_forms() {
    let doc = parse(r#"<input disabled value="" name=plain title='single'>"#).unwrap();
    let input = doc.tree().element(first_element(&doc)).unwrap();
    assert_eq!(input.get_attr("disabled"), Some(""));
    assert_eq!(input.get_attr("value"), Some(""));
    assert_eq!(input.get_attr("name"), Some("plain"));
    assert_eq!(input.get_attr("title"), Some("single"));
}

#[test]
fn test_attribute_names_lowercased() {
    let doc = parse(r#"<div DATA-Item-Number="3" CLASS="A"></div>"#).unwrap();
    let div = doc.tree().element(first_element(&doc)).unwrap();
    assert_eq!(div.get_attr("data-item-number"), Some("3"));
    assert!(div.has_class("A"));
}

#[test]
fn test_duplicate_class_tokens() {
    let doc = parse(r#"<div class="a  b a"></div>"#).unwrap();
    let div = doc.tree().element(first_element(&doc)).unwrap();
    assert_eq!(div.class_list().length(), 2);
}

#[test]
fn test_json_data_attribute() {
    let doc = parse(r#"<div data-obj='{"a": [1, 2]}'></div>"#).unwrap();
    let div = doc.tree().element(first_element(&doc)).unwrap();
    assert_eq!(div.dataset().get("obj"), Some(r#"{"a": [1, 2]}"#));
}

// ============================================================================
// ENTITIES AND UNICODE
// ============================================================================

#[test]
fn test_entities_are_decoded() {
    let doc = parse("<p>&lt;b&gt; &amp; &#169; &#x263A;</p>").unwrap();
    assert_eq!(doc.tree().text_content(first_element(&doc)), "<b> & © ☺");
}

#[test]
fn test_unicode_content() {
    let doc = parse("<p>日本語 🎉 مرحبا</p>").unwrap();
    assert_eq!(doc.tree().text_content(first_element(&doc)), "日本語 🎉 مرحبا");
}

// ============================================================================
// STRESS TESTS
// ============================================================================

#[test]
fn test_deeply_nested() {
    let depth = 200;
    let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
    let doc = parse(&html).unwrap();
    assert_eq!(doc.tree().text_content(doc.body()), "x");
}

#[test]
fn test_many_siblings() {
    let html: String = (0..1000).map(|i| format!("<li data-n=\"{i}\">{i}</li>")).collect();
    let doc = parse(&format!("<ul>{html}</ul>")).unwrap();
    let ul = first_element(&doc);
    assert_eq!(doc.tree().element_children(ul).len(), 1000);
}
