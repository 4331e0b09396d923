//! Protocol constants for XMPP over BOSH.
//!
//! Centralizes the namespace URIs the rest of the crate (and its callers)
//! need so that no stanza-building code carries string literals.
//!
//! # Examples
//!
//! ```
//! use xmpp_bosh_http::protocol::ns;
//!
//! assert_eq!(ns::CLIENT, "jabber:client");
//! assert_eq!(ns::HTTPBIND, "http://jabber.org/protocol/httpbind");
//! ```

/// XMPP namespace URIs.
pub mod ns {
    /// BOSH HTTP binding (`<body/>` wrapper elements).
    pub const HTTPBIND: &str = "http://jabber.org/protocol/httpbind";
    /// XEP-0206 BOSH extensions to the HTTP binding.
    pub const BOSH: &str = "urn:xmpp:xbosh";
    /// Default namespace of client-to-server stanzas.
    pub const CLIENT: &str = "jabber:client";
    /// Legacy jabber:iq:auth authentication.
    pub const AUTH: &str = "jabber:iq:auth";
    /// Roster management.
    pub const ROSTER: &str = "jabber:iq:roster";
    /// Service discovery: entity information.
    pub const DISCO_INFO: &str = "http://jabber.org/protocol/disco#info";
    /// Service discovery: entity items.
    pub const DISCO_ITEMS: &str = "http://jabber.org/protocol/disco#items";
    /// Multi-user chat.
    pub const MUC: &str = "http://jabber.org/protocol/muc";
    /// SASL authentication exchanges.
    pub const SASL: &str = "urn:ietf:params:xml:ns:xmpp-sasl";
    /// XML stream root element.
    pub const STREAM: &str = "http://etherx.jabber.org/streams";
    /// Resource binding.
    pub const BIND: &str = "urn:ietf:params:xml:ns:xmpp-bind";
    /// Session establishment.
    pub const SESSION: &str = "urn:ietf:params:xml:ns:xmpp-session";
    /// Software version queries.
    pub const VERSION: &str = "jabber:iq:version";
    /// Stanza error conditions.
    pub const STANZAS: &str = "urn:ietf:params:xml:ns:xmpp-stanzas";
    /// XHTML-IM rich-text message bodies.
    pub const XHTML_IM: &str = "http://jabber.org/protocol/xhtml-im";
    /// XHTML itself, used inside XHTML-IM payloads.
    pub const XHTML: &str = "http://www.w3.org/1999/xhtml";
}

/// The three top-level stanza kinds that receive the client namespace by
/// default when built without an explicit `xmlns`.
pub const STANZA_KINDS: [&str; 3] = ["iq", "message", "presence"];

/// Whether `name` is one of the top-level stanza kinds (`iq`, `message`,
/// `presence`).
pub fn is_stanza_kind(name: &str) -> bool {
    STANZA_KINDS.contains(&name)
}
