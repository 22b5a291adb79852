//! Owned HTML tree for note content.
//!
//! Note HTML is parsed with `html5ever` into an `RcDom`, then copied into a
//! plain owned tree: every [`Element`] owns its children outright and there
//! are no parent pointers. Renderers pass whatever context they need
//! downward instead of walking back up.

mod parse;

use std::collections::BTreeMap;

pub use parse::{NestingTooDeep, parse_fragment};

/// Whether an element is rendered as a block or inline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagType {
    Block,
    Inline,
}

impl TagType {
    /// Classifies a (lowercase) tag name.
    pub fn of(tag: &str) -> Self {
        const BLOCK_TAGS: &[&str] = &[
            "address", "article", "aside", "blockquote", "body", "dd", "details", "dialog", "div",
            "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
            "h4", "h5", "h6", "header", "hr", "html", "li", "main", "nav", "ol", "p", "pre",
            "section", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
        ];

        if BLOCK_TAGS.contains(&tag) {
            TagType::Block
        } else {
            TagType::Inline
        }
    }
}

/// A node in the note's HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Returns the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Returns the text, if this node is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An HTML element with its attributes and owned children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an element with no attributes or children.
    ///
    /// Tag names are stored lowercase.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing any previous value for the same key.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Appends a child node.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends a text child.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::Text(text.into()))
    }

    pub(crate) fn push_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn set_attr(&mut self, key: String, value: String) {
        self.attributes.insert(key, value);
    }

    /// Returns the lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the block/inline classification of this element.
    pub fn tag_type(&self) -> TagType {
        TagType::of(&self.tag)
    }

    /// Returns an attribute value.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Returns all attributes.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Returns true if the `class` attribute contains `needle` as a substring.
    pub fn class_contains(&self, needle: &str) -> bool {
        self.attr("class").is_some_and(|class| class.contains(needle))
    }

    /// Returns the child nodes in document order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Iterates over the direct text children.
    pub fn text_children(&self) -> impl Iterator<Item = &str> {
        self.children.iter().filter_map(Node::as_text)
    }

    /// Concatenates all descendant text in document order.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(self, &mut text);
        text
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(inner) => collect_text(inner, out),
        }
    }
}
