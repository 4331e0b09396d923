#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # BOSH transport core for XMPP clients
//!
//! This crate implements the two cooperating pieces at the bottom of an XMPP
//! client's BOSH (XMPP over HTTP) transport layer:
//!
//! 1. **Stanza building** - a fluent XML builder whose cursor walks the tree
//!    under construction, producing wire-ready `<iq>`, `<message>`, and
//!    `<presence>` stanzas
//! 2. **Request bookkeeping** - a record of one outgoing BOSH exchange:
//!    process-unique id, BOSH `rid`, send/death timing, abort flag, and
//!    response decoding
//!
//! The connection manager, SASL negotiation, and the HTTP transport itself
//! are external collaborators: they consume the builder's serialized output
//! and the request's lifecycle fields, but are not part of this crate.
//!
//! ## Building a stanza
//!
//! ```
//! use xmpp_bosh_http::StanzaBuilder;
//!
//! let mut builder = StanzaBuilder::iq(&[("to", "you"), ("type", "get"), ("id", "1")]);
//! builder.c("query", &[("xmlns", "jabber:iq:roster")], None);
//!
//! assert_eq!(
//!     builder.serialize(),
//!     "<iq to='you' type='get' id='1' xmlns='jabber:client'>\
//!      <query xmlns='jabber:iq:roster'/></iq>"
//! );
//! ```
//!
//! ## Queueing a request
//!
//! ```
//! use xmpp_bosh_http::{Request, StanzaBuilder};
//!
//! let stanza = StanzaBuilder::presence(&[]).into_tree();
//! let mut request = Request::new(stanza, Box::new(|_| {}), "1573741820");
//!
//! request.mark_sent();
//! assert_eq!(request.sends(), 1);
//!
//! let response = request.decode_response("<body xmlns='http://jabber.org/protocol/httpbind'/>")?;
//! assert_eq!(response.name(), "body");
//! # Ok::<(), xmpp_bosh_http::BoshError>(())
//! ```
//!
//! ## Module Structure
//!
//! - **[xml]** - Owned XML node tree, serialization, and parsing
//! - **[builder]** - Cursor-based stanza construction
//! - **[transport]** - BOSH request record and id sequence
//! - **[protocol]** - XMPP namespace constants
//! - **[error]** - Error types and result handling

pub mod builder;
pub mod error;
pub mod protocol;
pub mod transport;
pub mod xml;

pub use builder::StanzaBuilder;
pub use error::{BoshError, Result};
pub use transport::{Request, StateHandler};
pub use xml::{Element, XmlNode};
