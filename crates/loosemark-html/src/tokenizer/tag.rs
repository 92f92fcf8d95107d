//! Tag and attribute tokenizer.
//!
//! Turns the trimmed text between `<` and `>` into a tag name and an ordered
//! list of properties. Only `name="value"` and `name='value'` pairs (no
//! whitespace around `=`) are recognized; everything else in the tag body is
//! skipped, so bare boolean attributes are dropped.

use loosemark_dom::{Property, PropertyValue};

use super::helpers::{end_of_name, is_name_char};
use crate::error::ParseError;

/// The one tag name treated as void without a trailing `/`.
pub const VOID_TAG: &str = "br";

/// An opening tag split into its parts.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    /// Lowercased tag name. Empty when the body contains no name characters.
    pub name: String,
    /// Attributes in source order.
    pub properties: Vec<Property>,
    /// Whether the body ended in `/`.
    pub self_closing: bool,
}

impl Tag {
    /// Whether the element built from this tag can never receive children.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.self_closing || self.name == VOID_TAG
    }
}

/// Tokenize a trimmed tag body such as `div class="a" data-x='1' /`.
///
/// The tag name is the first run of name characters, lowercased. Attribute
/// values keep their surrounding quotes. A value shaped `"{...}"` is parsed
/// as JSON (without the quotes) and stored as [`PropertyValue::Structured`].
///
/// # Errors
///
/// Returns [`ParseError::StructuredAttribute`] if such a value is not valid
/// JSON.
pub fn tokenize_tag(body: &str) -> Result<Tag, ParseError> {
    let self_closing = body.ends_with('/');

    let Some(name_start) = body.bytes().position(is_name_char) else {
        return Ok(Tag {
            name: String::new(),
            properties: Vec::new(),
            self_closing,
        });
    };
    let name_end = end_of_name(body, name_start);
    let name = body[name_start..name_end].to_ascii_lowercase();

    let properties = RawAttributes::new(body[name_end..].trim_start())
        .map(RawAttribute::into_property)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Tag {
        name,
        properties,
        self_closing,
    })
}

/// One `name=<quoted value>` token before value conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawAttribute<'a> {
    /// Attribute name as written.
    pub name: &'a str,
    /// The value as written, including its opening and closing quote.
    pub value: &'a str,
}

impl<'a> RawAttribute<'a> {
    /// Whether the value should be read as an embedded JSON literal: a
    /// double-quoted value whose interior starts with `{` and ends with `}`.
    #[must_use]
    pub fn is_structured(&self) -> bool {
        self.value.starts_with("\"{") && self.value.ends_with("}\"")
    }

    /// The value without its surrounding quotes.
    #[must_use]
    pub fn interior(&self) -> &'a str {
        &self.value[1..self.value.len() - 1]
    }

    /// Convert into a [`Property`], parsing structured values.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::StructuredAttribute`] on malformed JSON.
    pub fn into_property(self) -> Result<Property, ParseError> {
        let value = if self.is_structured() {
            let parsed = serde_json::from_str(self.interior()).map_err(|source| {
                ParseError::StructuredAttribute {
                    attribute: self.name.to_string(),
                    source,
                }
            })?;
            PropertyValue::Structured(parsed)
        } else {
            PropertyValue::String(self.value.to_string())
        };
        Ok(Property::new(self.name, value))
    }
}

/// Iterator over the `name="..."` / `name='...'` tokens of an attribute
/// string, leftmost first and non-overlapping.
#[derive(Debug, Clone)]
pub struct RawAttributes<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> RawAttributes<'a> {
    /// Scan `input` from the start.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Try to read `="..."` or `='...'` right after a name ending at
    /// `name_end`. Returns the quoted value and the offset past the closing
    /// quote.
    fn quoted_value_after(&self, name_end: usize) -> Option<(&'a str, usize)> {
        let bytes = self.input.as_bytes();
        if bytes.get(name_end) != Some(&b'=') {
            return None;
        }
        let quote = match bytes.get(name_end + 1) {
            Some(b'"') => '"',
            Some(b'\'') => '\'',
            _ => return None,
        };
        let open = name_end + 1;
        let interior_len = self.input[open + 1..].find(quote)?;
        let close = open + 1 + interior_len;
        Some((&self.input[open..=close], close + 1))
    }
}

impl<'a> Iterator for RawAttributes<'a> {
    type Item = RawAttribute<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() {
            let start = self.pos;
            if !is_name_char(bytes[start]) {
                self.pos += 1;
                continue;
            }

            let name_end = end_of_name(self.input, start);
            if let Some((value, next)) = self.quoted_value_after(name_end) {
                self.pos = next;
                return Some(RawAttribute {
                    name: &self.input[start..name_end],
                    value,
                });
            }

            // A shorter suffix of the same name fails the same way.
            self.pos = name_end;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(input: &str) -> Vec<(&str, &str)> {
        RawAttributes::new(input)
            .map(|attr| (attr.name, attr.value))
            .collect()
    }

    #[test]
    fn test_raw_attributes_both_quotes() {
        assert_eq!(
            raw(r#"id="main" data-x='1'"#),
            [("id", r#""main""#), ("data-x", "'1'")]
        );
    }

    #[test]
    fn test_raw_attributes_skip_bare_and_spaced() {
        assert_eq!(raw(r#"disabled a = "1" b="2""#), [("b", r#""2""#)]);
    }

    #[test]
    fn test_raw_attributes_recover_after_unterminated_quote() {
        assert_eq!(raw(r#"a="foo b='x'"#), [("b", "'x'")]);
    }

    #[test]
    fn test_value_may_contain_other_quote() {
        assert_eq!(raw(r#"title="it's""#), [("title", r#""it's""#)]);
    }

    #[test]
    fn test_structured_detection() {
        let attr = RawAttribute {
            name: "x",
            value: r#""{}""#,
        };
        assert!(attr.is_structured());
        assert_eq!(attr.interior(), "{}");
        assert!(!RawAttribute { value: "'{}'", ..attr }.is_structured());
        assert!(!RawAttribute { value: r#""{""#, ..attr }.is_structured());
        assert!(!RawAttribute { value: r#""""#, ..attr }.is_structured());
    }
}
