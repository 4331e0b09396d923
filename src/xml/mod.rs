//! XML document model: owned node tree, serialization, and parsing.
//!
//! # Module Organization
//!
//! ```text
//! xml/
//! ├── node   - XmlNode/Element tree, escaping, Display serialization
//! └── parser - quick-xml based parse() into the owned tree
//! ```

mod node;
mod parser;

pub use node::{escape_attr, escape_text, Element, XmlNode};
pub use parser::parse;
