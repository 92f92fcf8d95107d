use strum_macros::Display;
use tracing::{debug, trace};

use loosemark_dom::{Element, Node};

use crate::error::ParseError;
use crate::tokenizer::helpers::{end_of_name, is_name_char};
use crate::tokenizer::{Boundary, TagScanner, decode, tokenize_tag};

/// State of the tree builder.
///
/// `Scanning` loops on itself for every text run and tag. `InComment` is held
/// while a comment node is inserted and returns to `Scanning` within the same
/// [`Parser::step`], so `step` never returns it. `Done` is reached on
/// exhausted input or an unterminated tag or comment. `Failed` is reached
/// only through a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ParserState {
    /// Looking for the next boundary.
    Scanning,
    /// Inserting a comment. Only held inside a single step.
    InComment,
    /// All input consumed or dropped.
    Done,
    /// Parsing aborted with an error.
    Failed,
}

/// Kind of a recovered [`ParseIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IssueKind {
    /// A `<` without a matching `>`; the rest of the input was dropped.
    UnterminatedTag,
    /// A `<!--` without `-->`; the rest of the input was dropped.
    UnterminatedComment,
    /// A closing tag with no open element; it was ignored.
    UnbalancedClosingTag,
    /// A closing tag whose name differs from the element it closed.
    MismatchedClosingTag,
}

/// A malformed-input condition the parser recovered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// What was recovered.
    pub kind: IssueKind,
    /// Human-readable description.
    pub message: String,
    /// Byte offset of the construct in the input.
    pub offset: usize,
}

/// Builds a node forest from markup with an explicit stack of open elements.
///
/// Elements are owned by the stack while open. When a closing tag pops an
/// element it is appended to the new top of the stack, or to the top-level
/// result when the stack is empty. Elements still open at the end of input
/// are unwound the same way, so truncated input keeps every node built so
/// far.
#[derive(Debug)]
pub struct Parser<'a> {
    state: ParserState,

    scanner: TagScanner<'a>,

    /// Elements whose closing tag has not been seen. The last one is the
    /// current insertion parent.
    stack_of_open_elements: Vec<Element>,

    /// Top-level nodes.
    result: Vec<Node>,

    /// Recovered conditions, in input order.
    issues: Vec<ParseIssue>,

    /// If true, recoverable conditions abort parsing with an error.
    strict_mode: bool,
}

impl<'a> Parser<'a> {
    /// Create a lenient parser over `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            state: ParserState::Scanning,
            scanner: TagScanner::new(input),
            stack_of_open_elements: Vec::new(),
            result: Vec::new(),
            issues: Vec::new(),
            strict_mode: false,
        }
    }

    /// Enable strict mode: truncated tags and comments, and closing tags with
    /// no open element, become errors instead of silent recoveries.
    ///
    /// Mismatched closing tag names are still accepted.
    #[must_use]
    pub const fn with_strict_mode(mut self) -> Self {
        self.strict_mode = true;
        self
    }

    /// Current state of the builder.
    #[must_use]
    pub const fn state(&self) -> ParserState {
        self.state
    }

    /// Issues recovered so far.
    #[must_use]
    pub fn issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Number of currently open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack_of_open_elements.len()
    }

    /// Run the parser and return the top-level nodes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::StructuredAttribute`] for a malformed `"{...}"`
    /// attribute, and in strict mode the truncation and unbalanced closing
    /// tag variants.
    pub fn run(self) -> Result<Vec<Node>, ParseError> {
        self.run_with_issues().map(|(nodes, _)| nodes)
    }

    /// Run the parser and return the top-level nodes with every recovered
    /// issue.
    ///
    /// # Errors
    ///
    /// Same as [`Parser::run`].
    pub fn run_with_issues(mut self) -> Result<(Vec<Node>, Vec<ParseIssue>), ParseError> {
        while self.state == ParserState::Scanning {
            let _ = self.step()?;
        }
        Ok(self.finish())
    }

    /// Process a single boundary and return the resulting state.
    ///
    /// Once the state is `Done` or `Failed` further calls do nothing.
    ///
    /// # Errors
    ///
    /// Same as [`Parser::run`]. The state is `Failed` afterwards.
    pub fn step(&mut self) -> Result<ParserState, ParseError> {
        if self.state != ParserState::Scanning {
            return Ok(self.state);
        }

        let Some(boundary) = self.scanner.next() else {
            self.state = ParserState::Done;
            return Ok(self.state);
        };
        trace!(?boundary, depth = self.depth(), "processing boundary");

        if let Err(error) = self.process_boundary(boundary) {
            self.state = ParserState::Failed;
            return Err(error);
        }
        Ok(self.state)
    }

    /// Unwind the stack of open elements and return the forest.
    fn finish(mut self) -> (Vec<Node>, Vec<ParseIssue>) {
        self.unwind_open_elements();
        (self.result, self.issues)
    }

    /// Attach every open element to its parent, innermost first.
    fn unwind_open_elements(&mut self) {
        while let Some(element) = self.stack_of_open_elements.pop() {
            self.insert_node(Node::Element(element));
        }
    }

    fn process_boundary(&mut self, boundary: Boundary<'_>) -> Result<(), ParseError> {
        match boundary {
            Boundary::Text { raw, .. } => {
                let text = decode(raw);
                if !text.is_empty() {
                    self.insert_node(Node::Text(text.into_owned()));
                }
            }
            Boundary::TrailingText { raw, .. } => {
                // The remainder always lands at the top level, after every
                // element still open.
                self.unwind_open_elements();
                let text = decode(raw);
                if !text.is_empty() {
                    self.result.push(Node::Text(text.into_owned()));
                }
            }
            Boundary::StartTag { body, .. } => {
                let tag = tokenize_tag(body)?;
                let is_void = tag.is_void();
                let element = Element::new(tag.name, tag.properties);
                if is_void {
                    self.insert_node(Node::Element(element));
                } else {
                    self.stack_of_open_elements.push(element);
                }
            }
            Boundary::EndTag { body, offset } => self.close_element(body, offset)?,
            Boundary::Comment { data, .. } => {
                self.state = ParserState::InComment;
                self.insert_node(Node::Comment(data.to_string()));
                self.state = ParserState::Scanning;
            }
            Boundary::UnterminatedTag { offset } => {
                if self.strict_mode {
                    return Err(ParseError::UnterminatedTag { offset });
                }
                self.parse_warning(
                    IssueKind::UnterminatedTag,
                    "tag is never closed; dropping the rest of the input",
                    offset,
                );
                self.state = ParserState::Done;
            }
            Boundary::UnterminatedComment { offset } => {
                if self.strict_mode {
                    return Err(ParseError::UnterminatedComment { offset });
                }
                self.parse_warning(
                    IssueKind::UnterminatedComment,
                    "comment is never closed; dropping the rest of the input",
                    offset,
                );
                self.state = ParserState::Done;
            }
        }
        Ok(())
    }

    /// Pop the current node regardless of the closing tag's name.
    fn close_element(&mut self, body: &str, offset: usize) -> Result<(), ParseError> {
        let Some(element) = self.stack_of_open_elements.pop() else {
            if self.strict_mode {
                return Err(ParseError::UnbalancedClosingTag { offset });
            }
            self.parse_warning(
                IssueKind::UnbalancedClosingTag,
                "closing tag with no open element ignored",
                offset,
            );
            return Ok(());
        };

        let closing_name = closing_tag_name(body);
        if closing_name != element.name {
            let message = format!("</{closing_name}> closed <{}>", element.name);
            self.parse_warning(IssueKind::MismatchedClosingTag, &message, offset);
        }

        self.insert_node(Node::Element(element));
        Ok(())
    }

    /// Append to the current node, or to the top level when nothing is open.
    fn insert_node(&mut self, node: Node) {
        match self.stack_of_open_elements.last_mut() {
            Some(parent) => parent.append_child(node),
            None => self.result.push(node),
        }
    }

    /// Record a recovered condition and log it.
    fn parse_warning(&mut self, kind: IssueKind, message: &str, offset: usize) {
        debug!(%kind, offset, "{message}");
        self.issues.push(ParseIssue {
            kind,
            message: message.to_string(),
            offset,
        });
    }
}

/// Lowercased name of a closing tag body such as `/P `.
fn closing_tag_name(body: &str) -> String {
    body.bytes()
        .position(is_name_char)
        .map(|start| body[start..end_of_name(body, start)].to_ascii_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_tag_name() {
        assert_eq!(closing_tag_name("/P"), "p");
        assert_eq!(closing_tag_name("/ my-el"), "my-el");
        assert_eq!(closing_tag_name("/"), "");
    }

    #[test]
    fn test_step_states() {
        let mut parser = Parser::new("<p>x</p>");
        assert_eq!(parser.step().unwrap(), ParserState::Scanning);
        assert_eq!(parser.depth(), 1);
        assert_eq!(parser.step().unwrap(), ParserState::Scanning);
        assert_eq!(parser.step().unwrap(), ParserState::Scanning);
        assert_eq!(parser.depth(), 0);
        assert_eq!(parser.step().unwrap(), ParserState::Done);
        assert_eq!(parser.step().unwrap(), ParserState::Done);
    }

    #[test]
    fn test_comment_step_returns_to_scanning() {
        let mut parser = Parser::new("<!--c--><p>");
        assert_eq!(parser.step().unwrap(), ParserState::Scanning);
        assert_eq!(parser.state(), ParserState::Scanning);
    }

    #[test]
    fn test_trailing_text_closes_open_elements() {
        let mut parser = Parser::new("<div><p>tail");
        let _ = parser.step().unwrap();
        let _ = parser.step().unwrap();
        assert_eq!(parser.depth(), 2);
        assert_eq!(parser.step().unwrap(), ParserState::Scanning);
        assert_eq!(parser.depth(), 0);
        assert_eq!(parser.step().unwrap(), ParserState::Done);
    }

    #[test]
    fn test_step_failure_is_sticky() {
        let mut parser = Parser::new(r#"<a data="{oops}">"#);
        assert!(parser.step().is_err());
        assert_eq!(parser.state(), ParserState::Failed);
        assert_eq!(parser.step().unwrap(), ParserState::Failed);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(ParserState::InComment.to_string(), "InComment");
        assert_eq!(IssueKind::UnterminatedTag.to_string(), "UnterminatedTag");
    }
}
