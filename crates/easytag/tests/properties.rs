//! Property-based tests for the block engine using proptest.

use easytag::tag::{EndTag, Signature, TagDefinition};
use easytag::template::{Library, Template};
use easytag::Context;
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Default)]
struct Counter {
    seen: usize,
}

/// `{% seq %}{% item 'x' %}..{% endseq %}` numbering every item it renders.
fn library() -> Library {
    let seq = TagDefinition::<Counter>::builder()
        .name("seq")
        .intermediate(["item"])
        .end_tag(EndTag::Derived)
        .handler("seq", Signature::new(), |inv| inv.render_content())
        .handler("item", Signature::new().required("label"), |inv| {
            inv.state.seen += 1;
            let label = inv.args.string("label")?;
            let body = inv.render_content()?;
            Ok(format!("{}:{}{};", inv.state.seen, label, body))
        })
        .build()
        .unwrap();

    let mut library = Library::new();
    library.register(seq);
    library
}

fn source(items: &[(String, String)]) -> String {
    let mut source = String::from("{% seq %}");
    for (label, body) in items {
        source.push_str(&format!("{{% item '{label}' %}}{body}"));
    }
    source.push_str("{% endseq %}");
    source
}

fn expected(items: &[(String, String)]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, (label, body))| format!("{}:{}{};", i + 1, label, body))
        .collect()
}

fn items_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-z]{1,8}", "[a-z ]{0,12}"), 0..20)
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Output is the concatenation of every segment, in document order.
    #[test]
    fn output_preserves_marker_order(items in items_strategy()) {
        let template = Template::new(&source(&items), &library()).unwrap();
        let out = template.render(&mut Context::new()).unwrap();
        prop_assert_eq!(out, expected(&items));
    }

    /// Re-rendering never carries per-pass state over.
    #[test]
    fn rerender_is_idempotent(items in items_strategy(), passes in 2usize..5) {
        let template = Template::new(&source(&items), &library()).unwrap();
        let mut ctx = Context::new();
        let first = template.render(&mut ctx).unwrap();
        for _ in 1..passes {
            prop_assert_eq!(&template.render(&mut ctx).unwrap(), &first);
        }
    }

    /// Any marker missing its required argument fails compilation.
    #[test]
    fn missing_argument_anywhere_fails(
        items in prop::collection::vec(("[a-z]{1,8}", "[a-z ]{0,12}"), 1..10),
        broken in any::<prop::sample::Index>(),
    ) {
        let idx = broken.index(items.len());
        let mut source = String::from("{% seq %}");
        for (i, (label, body)) in items.iter().enumerate() {
            if i == idx {
                source.push_str(&format!("{{% item %}}{body}"));
            } else {
                source.push_str(&format!("{{% item '{label}' %}}{body}"));
            }
        }
        source.push_str("{% endseq %}");

        let err = Template::new(&source, &library()).unwrap_err();
        let is_missing = matches!(err, easytag::CompileError::MissingArguments { .. });
        prop_assert!(is_missing);
    }
}
