//! Fluent stanza construction.
//!
//! [`StanzaBuilder`] assembles protocol stanzas (`<iq>`, `<message>`,
//! `<presence>`, and arbitrary children) as an owned [`Element`] tree. The
//! "current element" is tracked as a cursor: a path of child indices from
//! the root, re-resolved against the tree on every operation. Because the
//! tree is an owned, index-addressed structure, mutating it can never leave
//! the cursor dangling; a path that no longer resolves indicates a caller
//! sequencing bug and panics.
//!
//! # Examples
//!
//! ```
//! use xmpp_bosh_http::builder::StanzaBuilder;
//!
//! let mut builder = StanzaBuilder::iq(&[("to", "you"), ("type", "get"), ("id", "1")]);
//! builder
//!     .c("query", &[("xmlns", "jabber:iq:roster")], None)
//!     .up()
//!     .attrs(&[("from", Some("me"))]);
//!
//! assert_eq!(
//!     builder.serialize(),
//!     "<iq to='you' type='get' id='1' xmlns='jabber:client' from='me'>\
//!      <query xmlns='jabber:iq:roster'/></iq>"
//! );
//! ```
//!
//! # Cursor Rules
//!
//! | Operation | Cursor after |
//! |-----------|--------------|
//! | [`c`](StanzaBuilder::c) / [`cnode`](StanzaBuilder::cnode) | the new child |
//! | [`t`](StanzaBuilder::t) / [`h`](StanzaBuilder::h) / [`attrs`](StanzaBuilder::attrs) | unchanged |
//! | [`up`](StanzaBuilder::up) | parent (no-op at the root) |
//! | [`root`](StanzaBuilder::root) | the root element |

use crate::error::Result;
use crate::protocol;
use crate::xml::{self, Element, XmlNode};
use std::fmt;

/// Fluent builder for XMPP stanzas.
///
/// Created via [`StanzaBuilder::new`] or the [`iq`](StanzaBuilder::iq),
/// [`message`](StanzaBuilder::message), and
/// [`presence`](StanzaBuilder::presence) shorthands. Roots of those three
/// kinds receive `xmlns='jabber:client'` unless the caller supplied an
/// explicit `xmlns`; every stanza put on the wire must be namespaced.
///
/// The builder stays usable after [`serialize`](StanzaBuilder::serialize);
/// callers typically finish with [`into_tree`](StanzaBuilder::into_tree) to
/// hand the element to a [`crate::transport::Request`].
#[derive(Debug, Clone)]
pub struct StanzaBuilder {
    tree: Element,
    path: Vec<usize>,
}

impl StanzaBuilder {
    /// Create a builder rooted at a `name` element carrying `attrs` in order.
    ///
    /// If `name` is `iq`, `message`, or `presence` and `attrs` carries no
    /// `xmlns`, the client namespace is appended as a default attribute.
    /// The cursor starts at the root.
    pub fn new(name: &str, attrs: &[(&str, &str)]) -> Self {
        let mut tree = Element::with_attrs(name, attrs.iter().copied());
        if protocol::is_stanza_kind(name) && tree.attr("xmlns").is_none() {
            tree.set_attr("xmlns", protocol::ns::CLIENT);
        }
        StanzaBuilder {
            tree,
            path: Vec::new(),
        }
    }

    /// Shorthand for an `<iq/>` stanza.
    pub fn iq(attrs: &[(&str, &str)]) -> Self {
        StanzaBuilder::new("iq", attrs)
    }

    /// Shorthand for a `<message/>` stanza.
    pub fn message(attrs: &[(&str, &str)]) -> Self {
        StanzaBuilder::new("message", attrs)
    }

    /// Shorthand for a `<presence/>` stanza.
    pub fn presence(attrs: &[(&str, &str)]) -> Self {
        StanzaBuilder::new("presence", attrs)
    }

    /// Append a child element under the cursor and descend into it.
    ///
    /// When `text` is `Some` and non-empty, the child gets a single text
    /// node; `None` and `Some("")` add no text.
    pub fn c(&mut self, name: &str, attrs: &[(&str, &str)], text: Option<&str>) -> &mut Self {
        let mut child = Element::with_attrs(name, attrs.iter().copied());
        match text {
            Some(t) if !t.is_empty() => child.push_text(t),
            _ => {}
        }
        self.append_and_descend(child)
    }

    /// Append a deep copy of a pre-built element under the cursor and
    /// descend into it. Grafting a copy keeps the caller's fragment free to
    /// be reused without aliasing into this tree.
    pub fn cnode(&mut self, node: &Element) -> &mut Self {
        self.append_and_descend(node.clone())
    }

    /// Append a text node under the cursor. The cursor does not move; text
    /// nodes are leaves and never become the current element.
    pub fn t(&mut self, text: &str) -> &mut Self {
        self.current_mut().push_text(text);
        self
    }

    /// Append a raw HTML block under the cursor.
    ///
    /// The fragment is wrapped in a synthetic `<body>`, run through
    /// [`normalize_html`], and its normalized children are copied under the
    /// current element. The cursor does not move.
    ///
    /// # Errors
    ///
    /// Propagates the normalizer's parse error when `html` cannot be turned
    /// into well-formed XML.
    pub fn h(&mut self, html: &str) -> Result<&mut Self> {
        let body = normalize_html(html)?;
        let current = self.current_mut();
        for child in body.children() {
            current.push(child.clone());
        }
        Ok(self)
    }

    /// Move the cursor to the current element's parent. A no-op when the
    /// cursor is already at the root; the cursor never escapes the tree.
    pub fn up(&mut self) -> &mut Self {
        self.path.pop();
        self
    }

    /// Move the cursor back to the root element.
    pub fn root(&mut self) -> &mut Self {
        self.path.clear();
        self
    }

    /// Apply attribute changes to the current element, in input order.
    ///
    /// A value of `None` or `Some("")` removes the attribute if present;
    /// anything else inserts or overwrites it. Later duplicates win. The
    /// cursor does not move.
    pub fn attrs(&mut self, pairs: &[(&str, Option<&str>)]) -> &mut Self {
        let current = self.current_mut();
        for &(key, value) in pairs {
            match value {
                Some(v) if !v.is_empty() => current.set_attr(key, v),
                _ => {
                    current.remove_attr(key);
                }
            }
        }
        self
    }

    /// Serialize the whole tree to wire-format XML.
    pub fn serialize(&self) -> String {
        self.tree.to_string()
    }

    /// The element the cursor currently addresses. Never a text node.
    pub fn current(&self) -> &Element {
        resolve(&self.tree, &self.path)
    }

    /// The root element of the tree under construction.
    pub fn tree(&self) -> &Element {
        &self.tree
    }

    /// Consume the builder and take the built tree.
    pub fn into_tree(self) -> Element {
        self.tree
    }

    fn append_and_descend(&mut self, child: Element) -> &mut Self {
        let current = self.current_mut();
        let index = current.children().len();
        current.push(child);
        self.path.push(index);
        self
    }

    fn current_mut(&mut self) -> &mut Element {
        resolve_mut(&mut self.tree, &self.path)
    }
}

impl fmt::Display for StanzaBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}

// resolve and resolve_mut are the single definition of what a cursor path
// means; every builder operation goes through one of them. They mirror each
// other exactly and differ only in mutability.

fn resolve<'a>(root: &'a Element, path: &[usize]) -> &'a Element {
    let mut node = root;
    for (depth, &index) in path.iter().enumerate() {
        node = step(node, depth, index);
    }
    node
}

fn resolve_mut<'a>(root: &'a mut Element, path: &[usize]) -> &'a mut Element {
    let mut node = root;
    for (depth, &index) in path.iter().enumerate() {
        // Bounds and node-kind checks live in the shared immutable step.
        step(node, depth, index);
        node = match node.children_mut().get_mut(index) {
            Some(XmlNode::Element(e)) => e,
            _ => unreachable!("validated by step"),
        };
    }
    node
}

fn step<'a>(node: &'a Element, depth: usize, index: usize) -> &'a Element {
    let child = node.children().get(index).unwrap_or_else(|| {
        panic!(
            "cursor path step {depth} indexes child {index} of <{}>, which has {} children",
            node.name(),
            node.children().len()
        )
    });
    child.as_element().unwrap_or_else(|| {
        panic!(
            "cursor path step {depth} addresses a text node inside <{}>",
            node.name()
        )
    })
}

/// Normalize a raw HTML fragment into a well-formed XML `<body>` element.
///
/// This is the seam for HTML-to-XML normalization: [`StanzaBuilder::h`]
/// accepts whatever this returns. The built-in implementation wraps the
/// fragment in `<body>…</body>` and parses it as XML, which accepts the
/// XHTML-IM payloads XMPP messages actually carry and rejects tag soup.
///
/// # Errors
///
/// Returns [`crate::error::BoshError::XmlParse`] when the wrapped fragment
/// is not well-formed.
pub fn normalize_html(html: &str) -> Result<Element> {
    xml::parse(&format!("<body>{html}</body>"))
}
