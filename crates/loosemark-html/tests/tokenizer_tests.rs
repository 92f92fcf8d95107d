//! Integration tests for the tag tokenizer.

use loosemark_html::tokenizer::{Tag, tokenize_tag};
use loosemark_html::{ParseError, Property, PropertyValue};
use serde_json::json;

/// Helper to tokenize a tag body that is expected to be valid
fn tokenize(body: &str) -> Tag {
    tokenize_tag(body).expect("tag should tokenize")
}

/// Helper to build a string property
fn string_property(name: &str, value: &str) -> Property {
    Property::new(name, PropertyValue::from(value))
}

#[test]
fn test_plain_tag() {
    let tag = tokenize("div");
    assert_eq!(tag.name, "div");
    assert!(tag.properties.is_empty());
    assert!(!tag.self_closing);
    assert!(!tag.is_void());
}

#[test]
fn test_tag_name_is_lowercased() {
    assert_eq!(tokenize("DIV").name, "div");
    assert_eq!(tokenize("My-Element").name, "my-element");
}

#[test]
fn test_attribute_names_keep_case() {
    let tag = tokenize(r#"svg viewBox="0 0 1 1""#);
    assert_eq!(tag.properties, [string_property("viewBox", r#""0 0 1 1""#)]);
}

#[test]
fn test_attributes_in_source_order() {
    let tag = tokenize(r#"input type="text" name='q' data-id="7""#);
    assert_eq!(tag.name, "input");
    assert_eq!(
        tag.properties,
        [
            string_property("type", r#""text""#),
            string_property("name", "'q'"),
            string_property("data-id", r#""7""#),
        ]
    );
}

#[test]
fn test_empty_attribute_value() {
    let tag = tokenize(r#"option value="""#);
    assert_eq!(tag.properties, [string_property("value", r#""""#)]);
}

#[test]
fn test_bare_attributes_are_dropped() {
    let tag = tokenize(r#"input disabled checked="checked""#);
    assert_eq!(tag.properties, [string_property("checked", r#""checked""#)]);
}

#[test]
fn test_self_closing() {
    let tag = tokenize(r#"img src="a.png" /"#);
    assert!(tag.self_closing);
    assert!(tag.is_void());
    assert_eq!(tag.properties, [string_property("src", r#""a.png""#)]);
}

#[test]
fn test_br_is_void() {
    let tag = tokenize("BR");
    assert!(!tag.self_closing);
    assert!(tag.is_void());
}

#[test]
fn test_body_without_name() {
    let tag = tokenize("");
    assert_eq!(tag.name, "");
    assert!(tag.properties.is_empty());
}

#[test]
fn test_structured_empty_object() {
    let tag = tokenize(r#"widget config="{}" spaced="{ }""#);
    assert_eq!(
        tag.properties,
        [
            Property::new("config", PropertyValue::from(json!({}))),
            Property::new("spaced", PropertyValue::from(json!({}))),
        ]
    );
}

#[test]
fn test_single_quoted_braces_stay_strings() {
    let tag = tokenize("widget config='{not json}'");
    assert_eq!(tag.properties, [string_property("config", "'{not json}'")]);
}

#[test]
fn test_double_quote_ends_the_value() {
    // The value stops at the first `"`, so `"{"` is a plain string.
    let tag = tokenize(r#"widget config="{"a":1}""#);
    assert_eq!(tag.properties, [string_property("config", r#""{""#)]);
}

#[test]
fn test_values_keep_their_quotes() {
    let tag = tokenize(r#"a title=">" alt='it"s'"#);
    assert_eq!(
        tag.properties,
        [
            string_property("title", r#"">""#),
            string_property("alt", r#"'it"s'"#),
        ]
    );
}

#[test]
fn test_malformed_structured_value_is_an_error() {
    let error = tokenize_tag(r#"widget config="{a: 1}""#).unwrap_err();
    match error {
        ParseError::StructuredAttribute { attribute, .. } => assert_eq!(attribute, "config"),
        other => panic!("Expected StructuredAttribute, got {other:?}"),
    }
}

#[test]
fn test_structured_error_message_names_attribute() {
    let error = tokenize_tag(r#"x data="{,}""#).unwrap_err();
    assert!(error.to_string().contains("`data`"));
}
