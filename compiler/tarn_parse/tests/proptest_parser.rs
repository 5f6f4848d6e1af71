//! Property-based tests for the parser.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use tarn_ir::{ExprKind, StringInterner};
use tarn_parse::parse_source;

fn arb_ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}".prop_filter("keywords are not identifiers", |s| {
        !matches!(
            s.as_str(),
            "for" | "foreach" | "if" | "else" | "var" | "true" | "false" | "null" | "in"
        )
    })
}

fn arb_simple_expr() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i64..1000).prop_map(|n| n.to_string()),
        "[a-zA-Z0-9 ]{0,10}".prop_map(|s| format!("\"{s}\"")),
        Just("true".to_owned()),
        Just("null".to_owned()),
        arb_ident(),
    ]
}

fn arb_source_expr() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_simple_expr(),
        prop::collection::vec(arb_simple_expr(), 0..5)
            .prop_map(|elems| format!("[{}]", elems.join(", "))),
        (arb_ident(), arb_ident()).prop_map(|(recv, method)| format!("{recv}.{method}()")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn never_panics(source in "\\PC{0,64}") {
        let interner = StringInterner::new();
        let _ = parse_source(&source, &interner);
    }

    #[test]
    fn spellings_are_equivalent(
        binding in arb_ident(),
        source in arb_source_expr(),
        body in arb_simple_expr(),
    ) {
        let interner = StringInterner::new();
        let colon = parse_source(&format!("for ({binding} : {source}) {body}"), &interner).unwrap();
        let in_form = parse_source(&format!("foreach ({binding} in {source}) {body}"), &interner).unwrap();

        let colon_root = colon.arena.get_expr(colon.arena.get_expr_list(colon.body)[0]).kind;
        let in_root = in_form.arena.get_expr(in_form.arena.get_expr_list(in_form.body)[0]).kind;

        let (ExprKind::ForEach { binding: b1, source: s1, body: y1 },
             ExprKind::ForEach { binding: b2, source: s2, body: y2 }) = (colon_root, in_root) else {
            panic!("expected loop nodes, got {colon_root:?} and {in_root:?}");
        };
        prop_assert_eq!(b1, b2);
        prop_assert_eq!(interner.lookup(b1), binding.as_str());
        prop_assert_eq!(colon.arena.get_expr(s1).kind, in_form.arena.get_expr(s2).kind);
        prop_assert_eq!(colon.arena.get_expr(y1).kind, in_form.arena.get_expr(y2).kind);
        prop_assert_eq!(colon.arena.expr_count(), in_form.arena.expr_count());
    }
}
