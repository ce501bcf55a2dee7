//! Owned HTML element trees
//!
//! Rendered markdown is parsed into a small owned tree of [`Node`]s so the
//! export pipeline can walk, clone and rewrite it without a browser.
//!
//! # Architecture
//!
//! - `mod.rs` - `Node` / `Element` types, attribute access and traversal
//! - `parse.rs` - HTML5 fragment parsing via html5ever
//! - `serialize.rs` - `outer_html` / `inner_html` serialization

mod parse;
mod serialize;

pub use parse::parse_fragment;

// ─────────────────────────────────────────────────────────────────────────────
// Node Types
// ─────────────────────────────────────────────────────────────────────────────

/// A node in an element subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    /// Convenience constructor for a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Get the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An element: a tag, an ordered attribute list and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase local tag name
    pub tag: String,
    /// Attributes in source order
    pub attrs: Vec<(String, String)>,
    /// Child nodes in document order
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element that owns the given children.
    ///
    /// Used to give a parsed fragment a single export root.
    pub fn wrap(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::new(tag)
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    /// Get an attribute value by (case-insensitive) name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Check whether an attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, overwriting an existing value in place.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self
            .attrs
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .attrs
                .push((name.to_ascii_lowercase(), value.to_string())),
        }
    }

    /// Remove an attribute. Returns the old value if it was present.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self
            .attrs
            .iter()
            .position(|(key, _)| key.eq_ignore_ascii_case(name))?;
        Some(self.attrs.remove(index).1)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// Iterate over child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Iterate over this element and every descendant element in document order.
    ///
    /// The root comes first, followed by descendants in pre-order. The export
    /// pipeline relies on this order being identical for a tree and its clone.
    pub fn elements(&self) -> Elements<'_> {
        Elements { stack: vec![self] }
    }

    /// Number of elements in the subtree, root included.
    pub fn element_count(&self) -> usize {
        self.elements().count()
    }

    /// Concatenated text of every descendant text node, ignoring markup.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
            Node::Comment(_) => {}
        }
    }
}

/// Pre-order iterator over an element subtree.
pub struct Elements<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        // Push in reverse so the first child is visited next
        self.stack.extend(element.child_elements().rev());
        Some(element)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
