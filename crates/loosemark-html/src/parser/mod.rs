//! Tree builder.

/// Tree builder implementation.
pub mod core;

pub use self::core::{IssueKind, ParseIssue, Parser, ParserState};
