//! End-to-end stanza construction and serialization tests.

use xmpp_bosh_http::{protocol, xml, Element, StanzaBuilder};

#[test]
fn builds_exact_wire_format() {
    let mut builder =
        StanzaBuilder::iq(&[("to", "you"), ("from", "me"), ("type", "get"), ("id", "1")]);
    builder
        .c("query", &[("xmlns", "strophe:example")], None)
        .c("example", &[], None);

    assert_eq!(
        builder.serialize(),
        "<iq to='you' from='me' type='get' id='1' xmlns='jabber:client'>\
         <query xmlns='strophe:example'><example/></query></iq>"
    );
}

#[test]
fn serialized_stanza_round_trips() {
    let mut builder = StanzaBuilder::message(&[("to", "you"), ("type", "chat")]);
    builder
        .c("body", &[], Some("hello & <goodbye>"))
        .up()
        .c("active", &[("xmlns", "http://jabber.org/protocol/chatstates")], None);

    let wire = builder.serialize();
    let reparsed = xml::parse(&wire).unwrap();
    let original = builder.tree();

    assert_eq!(reparsed.name(), original.name());
    assert_eq!(reparsed.attributes(), original.attributes());
    assert_eq!(reparsed.children().len(), original.children().len());
    assert_eq!(reparsed, *original);
}

#[test]
fn default_namespace_applies_to_all_three_stanza_kinds() {
    for kind in ["iq", "message", "presence"] {
        let builder = StanzaBuilder::new(kind, &[("id", "x")]);
        assert_eq!(builder.tree().attr("xmlns"), Some(protocol::ns::CLIENT));
    }
    let builder = StanzaBuilder::new("body", &[("rid", "1")]);
    assert_eq!(builder.tree().attr("xmlns"), None);
}

#[test]
fn caller_namespace_wins_over_default() {
    let builder = StanzaBuilder::presence(&[("xmlns", "jabber:server")]);
    assert_eq!(builder.tree().attr("xmlns"), Some("jabber:server"));
}

#[test]
fn child_then_up_restores_previous_current_element() {
    let mut builder = StanzaBuilder::iq(&[]);
    builder.c("pubsub", &[("xmlns", "http://jabber.org/protocol/pubsub")], None);
    let before = builder.current().name().to_string();

    builder.c("publish", &[("node", "urn:test")], None).up();
    assert_eq!(builder.current().name(), before);
}

#[test]
fn grafted_fragment_is_independent_of_source() {
    let mut template = Element::new("field");
    template.set_attr("var", "FORM_TYPE");

    let mut builder = StanzaBuilder::message(&[]);
    builder
        .c("x", &[("xmlns", "jabber:x:data")], None)
        .cnode(&template)
        .root();

    template.set_attr("var", "changed");
    let x = builder.tree().child("x").unwrap();
    assert_eq!(x.child("field").unwrap().attr("var"), Some("FORM_TYPE"));
}

#[test]
fn html_block_lands_under_current_element() {
    let mut builder = StanzaBuilder::message(&[("to", "you")]);
    builder
        .c("html", &[("xmlns", protocol::ns::XHTML_IM)], None)
        .c("body", &[("xmlns", protocol::ns::XHTML)], None)
        .h("<p>bold claim: <strong>it works</strong></p>")
        .unwrap()
        .t(" and plain text");

    let wire = builder.serialize();
    assert!(wire.contains("<strong>it works</strong>"));
    assert!(wire.contains("and plain text"));
    // Cursor stayed on <body> through h() and t().
    assert_eq!(builder.current().name(), "body");
}

#[test]
fn attribute_edits_round_trip_through_serialization() {
    let mut builder = StanzaBuilder::presence(&[("to", "room@muc/me")]);
    builder.attrs(&[("to", Some("other@muc/me")), ("id", Some("p1")), ("id", None)]);

    let reparsed = xml::parse(&builder.serialize()).unwrap();
    assert_eq!(reparsed.attr("to"), Some("other@muc/me"));
    assert_eq!(reparsed.attr("id"), None);
}
