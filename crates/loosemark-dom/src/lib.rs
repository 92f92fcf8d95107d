//! Node tree produced by the Loosemark parser.
//!
//! # Design
//!
//! The tree is plain owned data: an element owns its children directly and
//! nodes carry no parent back-reference. The only notion of a "current
//! parent" lives in the parser's stack of open elements while parsing is in
//! progress; once [`Node`]s are handed to the caller they are immutable
//! results.
//!
//! Every type serializes (via `serde`) to the same shape the parser's callers
//! consume: `{ "name": "text" | "comment", "value": ... }` for leaves and
//! `{ "name", "properties", "children" }` for elements.

use core::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Name reported by [`Node::name`] for text leaves.
pub const TEXT_NODE_NAME: &str = "text";

/// Name reported by [`Node::name`] for comment leaves.
pub const COMMENT_NODE_NAME: &str = "comment";

/// A single entry in the parsed tree.
///
/// Only [`Node::Element`] can own children. Text and comment nodes are
/// leaves.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An entity-decoded run of text between two tag boundaries.
    Text(String),
    /// The raw interior of a `<!-- ... -->` comment. Never entity-decoded.
    Comment(String),
    /// An element created from an opening tag.
    Element(Element),
}

impl Node {
    /// Create a text leaf.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Create a comment leaf.
    #[must_use]
    pub fn comment(value: impl Into<String>) -> Self {
        Self::Comment(value.into())
    }

    /// The node's name: `"text"`, `"comment"`, or the lowercased tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Text(_) => TEXT_NODE_NAME,
            Self::Comment(_) => COMMENT_NODE_NAME,
            Self::Element(element) => &element.name,
        }
    }

    /// Element data if this node is an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Text value if this node is a text leaf.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Comment interior if this node is a comment leaf.
    #[must_use]
    pub fn as_comment(&self) -> Option<&str> {
        match self {
            Self::Comment(value) => Some(value),
            _ => None,
        }
    }

    /// Children of an element. Leaves have none.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Element(element) => &element.children,
            _ => &[],
        }
    }

    /// Iterate over every node below this one in document order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self.children())
    }

    /// Concatenated value of this node's text, or of every text descendant.
    ///
    /// Comments do not contribute.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Comment(_) => String::new(),
            Self::Element(_) => self.descendants().filter_map(Self::as_text).collect(),
        }
    }

    fn write_outline(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Text(value) => {
                let display = value.replace('\n', "\\n");
                writeln!(f, "{prefix}\"{display}\"")
            }
            Self::Comment(value) => writeln!(f, "{prefix}<!--{value}-->"),
            Self::Element(element) => {
                write!(f, "{prefix}<{}", element.name)?;
                for property in &element.properties {
                    write!(f, " {}=\"{}\"", property.name, property.value)?;
                }
                writeln!(f, ">")?;
                for child in &element.children {
                    child.write_outline(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Node {
    /// Indented outline of the subtree, one node per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_outline(f, 0)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(value) | Self::Comment(value) => {
                let mut state = serializer.serialize_struct("TextNode", 2)?;
                state.serialize_field("name", self.name())?;
                state.serialize_field("value", value)?;
                state.end()
            }
            Self::Element(element) => element.serialize(serializer),
        }
    }
}

/// An element: lowercased tag name, attributes in source order, and the
/// children appended while it was open.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Element {
    /// Lowercased tag name.
    pub name: String,
    /// Attributes in the order they appeared in the tag.
    pub properties: Vec<Property>,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element with no children.
    #[must_use]
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            properties,
            children: Vec::new(),
        }
    }

    /// First property with the given name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| &property.value)
    }

    /// Append a child node.
    pub fn append_child(&mut self, child: Node) {
        self.children.push(child);
    }
}

/// A `name="value"` pair taken from a tag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    /// Attribute name exactly as written.
    pub name: String,
    /// Attribute value.
    pub value: PropertyValue,
}

impl Property {
    /// Create a property.
    #[must_use]
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Value of a [`Property`].
///
/// Double-quoted values shaped like `"{...}"` carry structured JSON data
/// instead of a string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// The text between the quotes.
    String(String),
    /// A JSON literal embedded in the attribute.
    Structured(serde_json::Value),
}

impl PropertyValue {
    /// The string value, if this is not a structured value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::Structured(_) => None,
        }
    }

    /// The structured value, if any.
    #[must_use]
    pub const fn as_structured(&self) -> Option<&serde_json::Value> {
        match self {
            Self::String(_) => None,
            Self::Structured(value) => Some(value),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Structured(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<serde_json::Value> for PropertyValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Structured(value)
    }
}

/// Pre-order iterator over a forest of nodes.
///
/// Uses an explicit stack so deep trees do not recurse.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Descendants<'a> {
    /// Iterate over `nodes` and everything below them, in document order.
    #[must_use]
    pub fn new(nodes: &'a [Node]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// First element named `name` in a forest, depth-first.
#[must_use]
pub fn find_element<'a>(nodes: &'a [Node], name: &str) -> Option<&'a Element> {
    Descendants::new(nodes)
        .filter_map(Node::as_element)
        .find(|element| element.name == name)
}

/// Print an outline of a parsed forest for debugging.
pub fn print_tree(nodes: &[Node]) {
    for node in nodes {
        print!("{node}");
    }
}
