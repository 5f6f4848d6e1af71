#![allow(clippy::unwrap_used, clippy::expect_used)]

use tarn_ir::{ExprId, ExprKind, Span};
use tarn_lexer::TokenKind;

use super::*;

/// Render a parsed script as an s-expression for shape comparisons.
fn sexpr(source: &str) -> String {
    let interner = StringInterner::new();
    let script = parse_source(source, &interner).expect("parse failed");
    let parts: Vec<String> = script
        .arena
        .get_expr_list(script.body)
        .iter()
        .map(|id| render(&script.arena, &interner, *id))
        .collect();
    parts.join(" ")
}

fn render(arena: &ExprArena, interner: &StringInterner, id: ExprId) -> String {
    let list = |range: ExprRange| -> Vec<String> {
        arena
            .get_expr_list(range)
            .iter()
            .map(|id| render(arena, interner, *id))
            .collect()
    };
    match arena.get_expr(id).kind {
        ExprKind::Null => "null".into(),
        ExprKind::Bool(b) => b.to_string(),
        ExprKind::Int(n) => n.to_string(),
        ExprKind::Float(bits) => f64::from_bits(bits).to_string(),
        ExprKind::Str(name) => format!("{:?}", interner.lookup(name)),
        ExprKind::Ident(name) => interner.lookup(name).to_owned(),
        ExprKind::Array(range) => format!("[{}]", list(range).join(" ")),
        ExprKind::Map(range) => {
            let entries: Vec<String> = arena
                .get_map_entries(range)
                .iter()
                .map(|e| {
                    format!(
                        "{}:{}",
                        interner.lookup(e.key),
                        render(arena, interner, e.value)
                    )
                })
                .collect();
            format!("{{{}}}", entries.join(" "))
        }
        ExprKind::Binary { op, left, right } => format!(
            "({op} {} {})",
            render(arena, interner, left),
            render(arena, interner, right)
        ),
        ExprKind::Unary { op, operand } => format!("({op} {})", render(arena, interner, operand)),
        ExprKind::Assign { target, value } => format!(
            "(= {} {})",
            interner.lookup(target),
            render(arena, interner, value)
        ),
        ExprKind::Field { receiver, field } => format!(
            "(. {} {})",
            render(arena, interner, receiver),
            interner.lookup(field)
        ),
        ExprKind::MethodCall {
            receiver,
            method,
            args,
        } => format!(
            "(call {} {} [{}])",
            render(arena, interner, receiver),
            interner.lookup(method),
            list(args).join(" ")
        ),
        ExprKind::Index { receiver, index } => format!(
            "(index {} {})",
            render(arena, interner, receiver),
            render(arena, interner, index)
        ),
        ExprKind::Block(range) => format!("(block {})", list(range).join(" ")),
        ExprKind::Empty => ";".into(),
        ExprKind::Var { name, init } => match init {
            Some(init) => format!(
                "(var {} {})",
                interner.lookup(name),
                render(arena, interner, init)
            ),
            None => format!("(var {})", interner.lookup(name)),
        },
        ExprKind::If {
            cond,
            then_branch,
            else_branch,
        } => {
            let else_part = else_branch
                .map(|e| format!(" {}", render(arena, interner, e)))
                .unwrap_or_default();
            format!(
                "(if {} {}{else_part})",
                render(arena, interner, cond),
                render(arena, interner, then_branch)
            )
        }
        ExprKind::ForEach {
            binding,
            source,
            body,
        } => format!(
            "(foreach {} {} {})",
            interner.lookup(binding),
            render(arena, interner, source),
            render(arena, interner, body)
        ),
    }
}

fn parse_err(source: &str) -> ParseError {
    let interner = StringInterner::new();
    parse_source(source, &interner).expect_err("expected a parse error")
}

mod loops {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn both_spellings_produce_the_same_node() {
        let colon = sexpr("for (item : list) item");
        let in_form = sexpr("foreach (item in list) item");
        assert_eq!(colon, "(foreach item list item)");
        assert_eq!(colon, in_form);
    }

    #[test]
    fn block_body_and_method_source() {
        assert_eq!(
            sexpr("for (item : foo.getCheeseList()) { x = x + item; }"),
            "(foreach item (call foo getCheeseList []) (block (= x (+ x item))))"
        );
    }

    #[test]
    fn empty_statement_body() {
        assert_eq!(sexpr("for (item : list) ;"), "(foreach item list ;)");
    }

    #[test]
    fn literal_source() {
        assert_eq!(
            sexpr(r#"for(item : ["Hello", "World"]) item"#),
            r#"(foreach item ["Hello" "World"] item)"#
        );
    }

    #[test]
    fn nested_loops() {
        assert_eq!(
            sexpr("for (a : xs) foreach (b in a) b"),
            "(foreach a xs (foreach b a b))"
        );
    }

    #[test]
    fn in_is_an_ordinary_identifier_elsewhere() {
        assert_eq!(sexpr("in = 1; in"), "(= in 1) in");
    }

    #[test]
    fn foreach_requires_in() {
        let err = parse_err("foreach (item : list) item");
        assert_eq!(err.context, Some(ErrorContext::ForLoop));
        assert!(matches!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                expected: "`in`",
                found: TokenKind::Colon
            }
        ));
    }

    #[test]
    fn for_requires_colon() {
        let interner = StringInterner::new();
        let err = parse_source("for (item in list) item", &interner).unwrap_err();
        assert_eq!(err.context, Some(ErrorContext::ForLoop));
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
    }

    #[test]
    fn loop_span_covers_keyword_to_body() {
        let interner = StringInterner::new();
        let script = parse_source("  for (x : l) x", &interner).unwrap();
        let root = script.arena.get_expr_list(script.body)[0];
        assert_eq!(script.arena.get_expr(root).span, Span::new(2, 15));
    }
}

mod statements {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn var_declarations() {
        assert_eq!(sexpr("var x = 1; var y;"), "(var x 1) (var y)");
    }

    #[test]
    fn if_else() {
        assert_eq!(
            sexpr("if (x > 1) y = 1; else y = 2;"),
            "(if (> x 1) (= y 1) (= y 2))"
        );
    }

    #[test]
    fn blocks_and_empty_statements() {
        assert_eq!(sexpr("{ 1; ; 2 } ;"), "(block 1 ; 2) ;");
    }

    #[test]
    fn unterminated_block() {
        let err = parse_err("{ x = 1;");
        assert_eq!(err.kind, ParseErrorKind::UnterminatedBlock);
        assert_eq!(err.span, Span::new(0, 8));
        assert_eq!(err.context, Some(ErrorContext::Block));
    }

    #[test]
    fn empty_script() {
        assert_eq!(sexpr(""), "");
        assert_eq!(sexpr("// only a comment"), "");
    }
}

mod expressions {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn precedence() {
        assert_eq!(sexpr("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(sexpr("a || b && c == d"), "(|| a (&& b (== c d)))");
        assert_eq!(sexpr("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(sexpr("(1 + 2) * 3"), "(* (+ 1 2) 3)");
        assert_eq!(sexpr("-x < !y"), "(< (- x) (! y))");
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(sexpr("a = b = 2"), "(= a (= b 2))");
    }

    #[test]
    fn invalid_assignment_target() {
        let err = parse_err("a.b = 1");
        assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);
    }

    #[test]
    fn postfix_chains() {
        assert_eq!(
            sexpr("map.keySet().size()"),
            "(call (call map keySet []) size [])"
        );
        assert_eq!(sexpr("foo.cheezy[0]"), "(index (. foo cheezy) 0)");
        assert_eq!(sexpr("m.get('a', 2)"), r#"(call m get ["a" 2])"#);
    }

    #[test]
    fn literals() {
        assert_eq!(
            sexpr("[1, 2.5, 'a', true, null,]"),
            r#"[1 2.5 "a" true null]"#
        );
        assert_eq!(sexpr("x = { 'a': 1, b: [2] }"), "(= x {a:1 b:[2]})");
        assert_eq!(sexpr("x = {}"), "(= x {})");
    }

    #[test]
    fn invalid_token() {
        let err = parse_err("x = @");
        assert_eq!(err.kind, ParseErrorKind::InvalidToken);
        assert_eq!(err.span, Span::new(4, 5));
    }

    #[test]
    fn missing_operand() {
        let err = parse_err("1 +");
        assert_eq!(
            err.kind,
            ParseErrorKind::UnexpectedToken {
                expected: "expression",
                found: TokenKind::Eof
            }
        );
    }

    #[test]
    fn deeply_nested_parens() {
        let depth = 5_000;
        let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(sexpr(&source), "1");
    }
}

#[test]
fn error_display_mentions_context() {
    let err = parse_err("for (x : [1, 2) x");
    let message = err.to_string();
    assert!(message.contains("while parsing an array literal"), "{message}");
}
