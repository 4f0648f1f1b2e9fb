//! Pre-parsed markup tree.
//!
//! The host parses its templates; this crate only walks the resulting tree.
//! Text nodes hold already-encoded markup and are emitted verbatim.

use crate::directive::{AttrValue, Attributes, TagMode};

/// A node in a pre-parsed markup tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Encoded markup, emitted verbatim.
    Text(String),
    /// An element, possibly carrying directive attributes.
    Element(Element),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element with its attributes and children.
///
/// # Example
///
/// ```
/// use tagkit::{Element, Node};
///
/// let card = Element::new("div")
///     .attr("class", "card")
///     .attr("include-if", true)
///     .text("Hello");
///
/// assert_eq!(card.name(), "div");
/// assert_eq!(card.children(), &[Node::text("Hello")]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    name: String,
    attributes: Attributes,
    children: Vec<Node>,
    mode: TagMode,
}

impl Element {
    /// Create an element with a start and end tag and no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
            mode: TagMode::StartTagAndEndTag,
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.push(name, value);
        self
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Add a text child.
    #[must_use]
    pub fn text(self, s: impl Into<String>) -> Self {
        self.child(Node::text(s))
    }

    /// Write the element as `<name />`.
    #[must_use]
    pub fn self_closing(mut self) -> Self {
        self.mode = TagMode::SelfClosing;
        self
    }

    /// Write the element as a start tag only (void elements such as `<br>`).
    #[must_use]
    pub fn start_tag_only(mut self) -> Self {
        self.mode = TagMode::StartTagOnly;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[must_use]
    pub fn mode(&self) -> TagMode {
        self.mode
    }
}
