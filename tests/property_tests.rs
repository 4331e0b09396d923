//! Property tests for the builder cursor.
//!
//! Drives the builder with arbitrary operation scripts and checks the
//! cursor invariants: the current node is always an element, `up()` at the
//! root never escapes the tree, and serialization always round-trips.

use proptest::prelude::*;
use xmpp_bosh_http::{xml, StanzaBuilder};

#[derive(Debug, Clone)]
enum Op {
    Child(String),
    Text(String),
    Up,
    Root,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        "[a-z]{1,8}".prop_map(Op::Child),
        "[ a-z0-9]{0,12}".prop_map(Op::Text),
        Just(Op::Up),
        Just(Op::Root),
    ]
}

proptest! {
    #[test]
    fn cursor_survives_any_script(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let mut builder = StanzaBuilder::iq(&[("type", "set")]);
        let mut depth = 0usize;

        for op in ops {
            match op {
                Op::Child(name) => {
                    builder.c(&name, &[], None);
                    depth += 1;
                }
                Op::Text(text) => {
                    builder.t(&text);
                }
                Op::Up => {
                    builder.up();
                    depth = depth.saturating_sub(1);
                }
                Op::Root => {
                    builder.root();
                    depth = 0;
                }
            }

            // Resolving the cursor must always succeed and land on an
            // element; text nodes never become current.
            let current = builder.current();
            prop_assert!(!current.name().is_empty());
            if depth == 0 {
                prop_assert_eq!(current.name(), "iq");
            }
        }
    }

    #[test]
    fn child_then_up_is_identity_on_the_cursor(
        prefix in proptest::collection::vec("[a-z]{1,6}", 0..8),
        name in "[a-z]{1,6}",
    ) {
        let mut builder = StanzaBuilder::message(&[]);
        for child in &prefix {
            builder.c(child, &[], None);
        }
        let before = builder.current().name().to_string();

        builder.c(&name, &[], None).up();
        prop_assert_eq!(builder.current().name(), before);
    }

    #[test]
    fn built_trees_always_round_trip(
        names in proptest::collection::vec("[a-z]{1,8}", 1..10),
        text in "[ a-zA-Z0-9&<>']{1,20}",
    ) {
        let mut builder = StanzaBuilder::iq(&[("id", "rt")]);
        for (i, name) in names.iter().enumerate() {
            builder.c(name, &[], None);
            if i % 2 == 0 {
                builder.t(&text);
            }
        }

        let wire = builder.serialize();
        let reparsed = xml::parse(&wire).unwrap();
        prop_assert_eq!(&reparsed, builder.tree());
    }
}
