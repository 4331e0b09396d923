//! Parsing raw XML text into the owned [`Element`] tree.
//!
//! Built on the `quick-xml` event reader: events are folded onto an explicit
//! element stack, so the output is the crate's own owned tree rather than a
//! borrowed view into the input. Comments, processing instructions, and the
//! XML declaration are dropped; character data inside elements is kept
//! verbatim (entity-decoded).
//!
//! The first complete root element wins. Input that yields no root element
//! at all (e.g. plain text) fails with [`BoshError::XmlParse`].

use crate::error::{BoshError, Result};
use crate::xml::{Element, XmlNode};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse `text` into the document's root element.
///
/// # Errors
///
/// Returns [`BoshError::XmlParse`] when the input is not well-formed XML or
/// contains no root element. The error carries the full raw input.
///
/// # Examples
///
/// ```
/// use xmpp_bosh_http::xml;
///
/// let root = xml::parse("<iq type='result' id='1'/>").unwrap();
/// assert_eq!(root.name(), "iq");
/// assert_eq!(root.attr("type"), Some("result"));
///
/// assert!(xml::parse("not xml").is_err());
/// ```
pub fn parse(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| BoshError::xml_parse(e.to_string(), text))?;

        match event {
            Event::Start(start) => {
                stack.push(element_from_start(&start, text)?);
            }
            Event::Empty(start) => {
                let element = element_from_start(&start, text)?;
                match stack.last_mut() {
                    Some(parent) => parent.push(element),
                    None => return Ok(element),
                }
            }
            Event::End(_) => {
                // quick-xml has already validated the closing name.
                let element = stack
                    .pop()
                    .ok_or_else(|| BoshError::xml_parse("unexpected closing tag", text))?;
                match stack.last_mut() {
                    Some(parent) => parent.push(element),
                    None => return Ok(element),
                }
            }
            Event::Text(t) => {
                let decoded = t
                    .unescape()
                    .map_err(|e| BoshError::xml_parse(e.to_string(), text))?;
                if let Some(parent) = stack.last_mut() {
                    parent.push(XmlNode::Text(decoded.into_owned()));
                }
                // Text outside any element is padding around the root;
                // either it precedes a root (skip it) or no root ever
                // arrives and Eof reports the failure.
            }
            Event::CData(c) => {
                let decoded = String::from_utf8(c.into_inner().into_owned())
                    .map_err(|e| BoshError::xml_parse(e.to_string(), text))?;
                if let Some(parent) = stack.last_mut() {
                    parent.push(XmlNode::Text(decoded));
                }
            }
            Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => {
                return Err(if stack.is_empty() {
                    BoshError::xml_parse("no root element", text)
                } else {
                    BoshError::xml_parse("unexpected end of input inside element", text)
                });
            }
        }
    }
}

fn element_from_start(start: &BytesStart<'_>, raw: &str) -> Result<Element> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| BoshError::xml_parse(e.to_string(), raw))?
        .to_string();

    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| BoshError::xml_parse(e.to_string(), raw))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| BoshError::xml_parse(e.to_string(), raw))?;
        let value = attr
            .unescape_value()
            .map_err(|e| BoshError::xml_parse(e.to_string(), raw))?;
        element.set_attr(key, &value);
    }
    Ok(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_element() {
        let root = parse("<iq type='result' id='1'/>").unwrap();
        assert_eq!(root.name(), "iq");
        assert_eq!(root.attr("type"), Some("result"));
        assert_eq!(root.attr("id"), Some("1"));
        assert!(root.is_empty());
    }

    #[test]
    fn test_parse_nested_elements() {
        let root = parse("<iq><query xmlns='jabber:iq:roster'><item jid='a@b'/></query></iq>")
            .unwrap();
        let query = root.child("query").unwrap();
        assert_eq!(query.attr("xmlns"), Some("jabber:iq:roster"));
        assert_eq!(query.child("item").unwrap().attr("jid"), Some("a@b"));
    }

    #[test]
    fn test_parse_text_content() {
        let root = parse("<message><body>hello &amp; goodbye</body></message>").unwrap();
        assert_eq!(root.child("body").unwrap().text(), Some("hello & goodbye"));
    }

    #[test]
    fn test_parse_cdata() {
        let root = parse("<body><![CDATA[1 < 2]]></body>").unwrap();
        assert_eq!(root.text(), Some("1 < 2"));
    }

    #[test]
    fn test_parse_skips_declaration_and_comments() {
        let root = parse("<?xml version='1.0'?><!-- hi --><presence/>").unwrap();
        assert_eq!(root.name(), "presence");
    }

    #[test]
    fn test_parse_not_xml_fails() {
        let err = parse("not xml").unwrap_err();
        assert_eq!(err.body(), Some("not xml"));
    }

    #[test]
    fn test_parse_empty_input_fails() {
        assert!(parse("").is_err());
        assert!(parse("   \n ").is_err());
    }

    #[test]
    fn test_parse_truncated_input_fails() {
        assert!(parse("<iq><query").is_err());
        assert!(parse("<iq>").is_err());
    }

    #[test]
    fn test_parse_mismatched_tags_fail() {
        assert!(parse("<iq></query>").is_err());
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let source = "<iq to='you' type='get'><query xmlns='strophe:example'>text<example/></query></iq>";
        let root = parse(source).unwrap();
        assert_eq!(root.to_string(), source);
    }
}
