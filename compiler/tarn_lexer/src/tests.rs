use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str, interner: &StringInterner) -> Vec<TokenKind> {
    lex(source, interner).tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn both_loop_spellings() {
    let interner = StringInterner::new();
    let item = interner.intern("item");
    let list = interner.intern("list");
    let in_kw = interner.intern("in");

    assert_eq!(
        kinds("for (item : list) item", &interner),
        vec![
            TokenKind::For,
            TokenKind::LParen,
            TokenKind::Ident(item),
            TokenKind::Colon,
            TokenKind::Ident(list),
            TokenKind::RParen,
            TokenKind::Ident(item),
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        kinds("foreach (item in list) item", &interner),
        vec![
            TokenKind::Foreach,
            TokenKind::LParen,
            TokenKind::Ident(item),
            TokenKind::Ident(in_kw),
            TokenKind::Ident(list),
            TokenKind::RParen,
            TokenKind::Ident(item),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keyword_prefixes_are_identifiers() {
    let interner = StringInterner::new();
    let format = interner.intern("format");
    let foreachx = interner.intern("foreachx");
    let inside = interner.intern("inside");
    assert_eq!(
        kinds("format foreachx inside", &interner),
        vec![
            TokenKind::Ident(format),
            TokenKind::Ident(foreachx),
            TokenKind::Ident(inside),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn literals() {
    let interner = StringInterner::new();
    let hello = interner.intern("Hello");
    let world = interner.intern("World");
    assert_eq!(
        kinds(r#"42 2.5 "Hello" 'World' true false null"#, &interner),
        vec![
            TokenKind::Int(42),
            TokenKind::Float(2.5f64.to_bits()),
            TokenKind::Str(hello),
            TokenKind::Str(world),
            TokenKind::True,
            TokenKind::False,
            TokenKind::Null,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn string_escapes() {
    let interner = StringInterner::new();
    let expected = interner.intern("a\"b\n'c");
    assert_eq!(
        kinds(r#""a\"b\n\'c""#, &interner),
        vec![TokenKind::Str(expected), TokenKind::Eof]
    );
}

#[test]
fn comments_are_skipped() {
    let interner = StringInterner::new();
    let source = "1 // line\n## hash line\n/* block\n * more */ 2 /** starred **/ 3";
    assert_eq!(
        kinds(source, &interner),
        vec![
            TokenKind::Int(1),
            TokenKind::Int(2),
            TokenKind::Int(3),
            TokenKind::Eof
        ]
    );
}

#[test]
fn block_comment_stops_at_first_close() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds("/* a */ 4 */", &interner),
        vec![TokenKind::Int(4), TokenKind::Star, TokenKind::Slash, TokenKind::Eof]
    );
    assert_eq!(kinds("2 / 3", &interner)[1], TokenKind::Slash);
}

#[test]
fn unterminated_block_comment_is_an_error() {
    let interner = StringInterner::new();
    let tokens = lex("1 /* open * ended", &interner);
    let kinds: Vec<_> = tokens.tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::Int(1), TokenKind::Error, TokenKind::Eof]
    );
    assert_eq!(tokens.tokens[1].span, Span::new(2, 17));
}

#[test]
fn operators() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds("= == != < <= > >= + - * / % ! && ||", &interner),
        vec![
            TokenKind::Eq,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::Lt,
            TokenKind::LtEq,
            TokenKind::Gt,
            TokenKind::GtEq,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Bang,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn invalid_input_becomes_error_token() {
    let interner = StringInterner::new();
    assert_eq!(
        kinds("1 @ 2", &interner),
        vec![
            TokenKind::Int(1),
            TokenKind::Error,
            TokenKind::Int(2),
            TokenKind::Eof
        ]
    );
    // Out-of-range integer literal.
    assert_eq!(
        kinds("99999999999999999999999", &interner),
        vec![TokenKind::Error, TokenKind::Eof]
    );
}

#[test]
fn spans_and_eof() {
    let interner = StringInterner::new();
    let tokens = lex("x = 10;", &interner);
    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens.tokens[2].span, Span::new(4, 6));
    assert_eq!(tokens.get(100).kind, TokenKind::Eof);
    assert_eq!(tokens.get(100).span, Span::point(7));
}

#[test]
fn unescape_unknown_keeps_char() {
    assert_eq!(unescape(r"\q\\"), "q\\");
    assert_eq!(unescape(r"tab\there"), "tab\there");
}
