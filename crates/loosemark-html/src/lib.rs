//! Permissive markup parser for the Loosemark toolkit.
//!
//! # Scope
//!
//! This crate turns a markup string into a forest of [`Node`]s without
//! validating it against any grammar:
//! - **Tag scanner**: finds each `<...>` boundary, ignoring `>` inside
//!   double-quoted attribute values, and recognizes `<!-- ... -->` comments
//! - **Tag tokenizer**: lowercased tag names and `name="value"` /
//!   `name='value'` attributes, with `"{...}"` values parsed as JSON
//! - **Entity decoder**: a fixed table of named references (basic escapes and
//!   the Latin-1 supplement) plus `&#38;`, matched against whole text runs
//! - **Tree builder**: an explicit stack of open elements; closing tags pop
//!   whatever is open, and `br` or `<... />` never take children
//!
//! Truncated input (a tag or comment without its terminator) ends the parse
//! quietly and returns everything built so far. The only fatal condition in
//! the default mode is a malformed JSON attribute.
//!
//! # Not Implemented
//!
//! - Raw-text elements (`script`, `style`)
//! - The full void-element table and implied end tags
//! - Numeric character references other than `&#38;`
//!
//! # Example
//!
//! ```ignore
//! use loosemark_html::{Node, parse};
//!
//! let nodes = parse(r#"a<p class="x">b</p>"#).unwrap();
//! assert_eq!(nodes.len(), 2);
//! assert_eq!(nodes[0], Node::text("a"));
//! assert_eq!(nodes[1].name(), "p");
//! assert_eq!(nodes[1].text_content(), "b");
//! ```

/// Parse errors.
pub mod error;
/// Tree builder.
pub mod parser;
/// Boundary scanner, tag tokenizer and entity decoder.
pub mod tokenizer;

pub use error::ParseError;
pub use loosemark_dom::{Element, Node, Property, PropertyValue};
pub use parser::{IssueKind, ParseIssue, Parser, ParserState};

/// Parse `markup` into top-level nodes.
///
/// Equivalent to `Parser::new(markup).run()`.
///
/// # Errors
///
/// Returns [`ParseError::StructuredAttribute`] if an attribute value shaped
/// like `"{...}"` is not valid JSON.
pub fn parse(markup: &str) -> Result<Vec<Node>, ParseError> {
    Parser::new(markup).run()
}
