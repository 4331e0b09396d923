//! Error types and result handling.
//!
//! All fallible operations in this crate return [`Result`], an alias over
//! [`BoshError`]. The only recoverable failure class is a parse error:
//! a response body or HTML fragment that is not well-formed XML. Parse
//! errors carry the raw input so the caller (or a diagnostics sink) can log
//! exactly what the server sent.
//!
//! Builder cursor misuse is deliberately *not* represented here: walking the
//! cursor out of the tree is a caller sequencing bug and panics rather than
//! returning an error (see [`crate::builder::StanzaBuilder`]).

use thiserror::Error;

/// Errors produced by the BOSH transport core.
#[derive(Debug, Error)]
pub enum BoshError {
    /// The input was not well-formed XML, or contained no root element.
    ///
    /// `body` is the raw text that failed to parse, kept verbatim for
    /// logging; it is intentionally excluded from the display string so a
    /// multi-kilobyte response body does not end up inside error chains.
    #[error("xml parse error: {message}")]
    XmlParse {
        /// Description of what went wrong, including the parser diagnostic.
        message: String,
        /// The raw input that failed to parse.
        body: String,
    },
}

impl BoshError {
    /// Build an [`BoshError::XmlParse`] from a diagnostic and the offending input.
    pub fn xml_parse(message: impl Into<String>, body: impl Into<String>) -> Self {
        BoshError::XmlParse {
            message: message.into(),
            body: body.into(),
        }
    }

    /// The raw input attached to a parse error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            BoshError::XmlParse { body, .. } => Some(body),
        }
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, BoshError>;
