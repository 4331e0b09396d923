//! Owned XML tree representation.
//!
//! Stanzas are trees of [`XmlNode`]: either an [`Element`] (name, ordered
//! attributes, ordered children) or a text node. Children live in an owned
//! `Vec` and are addressed by index; nothing in the tree is shared or
//! reference-counted, so a cursor into the tree is a path of indices rather
//! than a pointer (see [`crate::builder::StanzaBuilder`]).
//!
//! Attributes keep insertion order, which is also serialization order. Keys
//! are unique: setting an existing attribute overwrites it in place.
//!
//! # Serialization
//!
//! [`Element`] implements `Display`, producing compact wire-format XML with
//! single-quoted attributes and self-closing tags for childless elements:
//!
//! ```
//! use xmpp_bosh_http::xml::Element;
//!
//! let mut presence = Element::new("presence");
//! presence.set_attr("type", "unavailable");
//! assert_eq!(presence.to_string(), "<presence type='unavailable'/>");
//! ```

use std::fmt;

/// A node in an XML document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// An element with a name, attributes, and children.
    Element(Element),
    /// Character data (unescaped form; escaping happens at serialization).
    Text(String),
}

impl XmlNode {
    /// Borrow this node as an element, if it is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        }
    }

    /// Mutably borrow this node as an element, if it is one.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        }
    }

    /// Whether this node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self, XmlNode::Element(_))
    }
}

impl From<Element> for XmlNode {
    fn from(element: Element) -> Self {
        XmlNode::Element(element)
    }
}

/// An XML element: tag name, insertion-ordered attributes, ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Create an element with the given attributes, in iteration order.
    pub fn with_attrs<'a, I>(name: impl Into<String>, attrs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut element = Element::new(name);
        for (key, value) in attrs {
            element.set_attr(key, value);
        }
        element
    }

    /// Tag name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up an attribute value by qualified name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, overwriting in place if the key already exists so
    /// the original position in serialization order is kept.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        for (key, existing) in &mut self.attributes {
            if key == name {
                *existing = value.to_string();
                return;
            }
        }
        self.attributes.push((name.to_string(), value.to_string()));
    }

    /// Remove an attribute by qualified name. Returns `true` if it existed.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attributes.len();
        self.attributes.retain(|(key, _)| key != name);
        self.attributes.len() < before
    }

    /// All attributes as `(name, value)` pairs in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// All child nodes.
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// Mutable access to the child list.
    pub fn children_mut(&mut self) -> &mut Vec<XmlNode> {
        &mut self.children
    }

    /// Iterator over child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|e| e.name == name)
    }

    /// Append a child node.
    pub fn push(&mut self, node: impl Into<XmlNode>) {
        self.children.push(node.into());
    }

    /// Append a text child.
    pub fn push_text(&mut self, text: impl Into<String>) {
        self.children.push(XmlNode::Text(text.into()));
    }

    /// First direct text child, if any.
    pub fn text(&self) -> Option<&str> {
        self.children.iter().find_map(|node| match node {
            XmlNode::Text(s) => Some(s.as_str()),
            XmlNode::Element(_) => None,
        })
    }

    /// Concatenation of all direct text children.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            if let XmlNode::Text(s) = node {
                out.push_str(s);
            }
        }
        out
    }

    /// Whether this element has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn serialize(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("='");
            escape_attr(value, out);
            out.push('\'');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            match child {
                XmlNode::Element(e) => e.serialize(out),
                XmlNode::Text(t) => escape_text(t, out),
            }
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.serialize(&mut out);
        f.write_str(&out)
    }
}

impl fmt::Display for XmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            XmlNode::Element(e) => fmt::Display::fmt(e, f),
            XmlNode::Text(t) => {
                let mut out = String::new();
                escape_text(t, &mut out);
                f.write_str(&out)
            }
        }
    }
}

/// Escape character data for element content.
pub fn escape_text(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// Escape an attribute value for a single-quoted attribute.
pub fn escape_attr(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
