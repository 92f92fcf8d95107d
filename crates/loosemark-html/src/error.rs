//! Errors surfaced by the parser.

use thiserror::Error;

/// A condition that aborts parsing.
///
/// In the default lenient mode only [`ParseError::StructuredAttribute`] can
/// occur; truncated tags and unbalanced closing tags are recovered and
/// reported as [`crate::ParseIssue`]s instead. Strict mode (see
/// [`crate::Parser::with_strict_mode`]) turns those recoveries into the
/// remaining variants.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A double-quoted attribute value shaped like `{...}` is not valid JSON.
    #[error("malformed structured value in attribute `{attribute}`: {source}")]
    StructuredAttribute {
        /// Name of the offending attribute.
        attribute: String,
        /// The JSON syntax error.
        #[source]
        source: serde_json::Error,
    },

    /// A `<` with no matching `>` outside double quotes.
    #[error("unterminated tag starting at byte {offset}")]
    UnterminatedTag {
        /// Byte offset of the `<`.
        offset: usize,
    },

    /// A `<!--` with no following `-->`.
    #[error("unterminated comment starting at byte {offset}")]
    UnterminatedComment {
        /// Byte offset of the `<!--`.
        offset: usize,
    },

    /// A closing tag encountered while no element was open.
    #[error("closing tag at byte {offset} has no open element")]
    UnbalancedClosingTag {
        /// Byte offset of the closing tag's `<`.
        offset: usize,
    },
}
