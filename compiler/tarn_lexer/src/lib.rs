//! Lexer for Tarn scripts using logos with string interning.
//!
//! Whitespace and comments (`//`, `##`, `/* */`) are skipped; identifiers and
//! string literals are interned; both loop keywords are produced as
//! distinct tokens so the parser can accept either spelling.

mod token;

use logos::Logos;
use tarn_ir::{Span, StringInterner};

pub use token::{Token, TokenKind, TokenList};

/// Raw token from logos (before interning).
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"//[^\n]*")]
#[logos(skip r"##[^\n]*")]
enum RawToken {
    #[token("for")]
    For,
    #[token("foreach")]
    Foreach,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("var")]
    Var,
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("null")]
    Null,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,

    #[token("==")]
    EqEq,
    #[token("=")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LtEq,
    #[token("<")]
    Lt,
    #[token(">=")]
    GtEq,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,

    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Int(i64),

    #[regex(r"[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    #[regex(r#""([^"\\]|\\.)*""#)]
    #[regex(r"'([^'\\]|\\.)*'")]
    Str,

    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    /// `/* ... */`, dropped by `lex_all`. Unterminated comments lex as errors.
    #[token("/*", block_comment)]
    BlockComment,
}

fn block_comment(lex: &mut logos::Lexer<RawToken>) -> bool {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            true
        }
        None => {
            lex.bump(lex.remainder().len());
            false
        }
    }
}

/// Lexer that produces interned tokens.
pub struct Lexer<'src, 'i> {
    source: &'src str,
    interner: &'i StringInterner,
}

impl<'src, 'i> Lexer<'src, 'i> {
    pub fn new(source: &'src str, interner: &'i StringInterner) -> Self {
        Lexer { source, interner }
    }

    /// Lex the whole source. Never fails: bad input becomes `TokenKind::Error`.
    pub fn lex_all(&self) -> TokenList {
        let mut result = TokenList::new();
        let mut logos = RawToken::lexer(self.source);

        while let Some(token_result) = logos.next() {
            let span = Span::try_from_range(logos.span()).unwrap_or(Span::DUMMY);
            let kind = match token_result {
                Ok(raw) => match self.convert_token(raw, logos.slice()) {
                    Some(kind) => kind,
                    None => continue,
                },
                Err(()) => TokenKind::Error,
            };
            result.tokens.push(Token::new(kind, span));
        }

        let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
        result.tokens.push(Token::new(TokenKind::Eof, Span::point(end)));
        result
    }

    /// `None` for tokens that never reach the parser.
    fn convert_token(&self, raw: RawToken, slice: &str) -> Option<TokenKind> {
        let kind = match raw {
            RawToken::BlockComment => return None,
            RawToken::Int(n) => TokenKind::Int(n),
            RawToken::Float(f) => TokenKind::Float(f.to_bits()),
            RawToken::Str => {
                let content = slice.get(1..slice.len() - 1).unwrap_or("");
                TokenKind::Str(self.interner.intern(&unescape(content)))
            }
            RawToken::Ident => TokenKind::Ident(self.interner.intern(slice)),

            RawToken::For => TokenKind::For,
            RawToken::Foreach => TokenKind::Foreach,
            RawToken::If => TokenKind::If,
            RawToken::Else => TokenKind::Else,
            RawToken::Var => TokenKind::Var,
            RawToken::True => TokenKind::True,
            RawToken::False => TokenKind::False,
            RawToken::Null => TokenKind::Null,

            RawToken::LParen => TokenKind::LParen,
            RawToken::RParen => TokenKind::RParen,
            RawToken::LBrace => TokenKind::LBrace,
            RawToken::RBrace => TokenKind::RBrace,
            RawToken::LBracket => TokenKind::LBracket,
            RawToken::RBracket => TokenKind::RBracket,
            RawToken::Colon => TokenKind::Colon,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Dot => TokenKind::Dot,
            RawToken::Semicolon => TokenKind::Semicolon,

            RawToken::EqEq => TokenKind::EqEq,
            RawToken::Eq => TokenKind::Eq,
            RawToken::NotEq => TokenKind::NotEq,
            RawToken::LtEq => TokenKind::LtEq,
            RawToken::Lt => TokenKind::Lt,
            RawToken::GtEq => TokenKind::GtEq,
            RawToken::Gt => TokenKind::Gt,
            RawToken::Plus => TokenKind::Plus,
            RawToken::Minus => TokenKind::Minus,
            RawToken::Star => TokenKind::Star,
            RawToken::Slash => TokenKind::Slash,
            RawToken::Percent => TokenKind::Percent,
            RawToken::Bang => TokenKind::Bang,
            RawToken::AmpAmp => TokenKind::AmpAmp,
            RawToken::PipePipe => TokenKind::PipePipe,
        };
        Some(kind)
    }
}

/// Lex `source`, interning names into `interner`.
pub fn lex(source: &str, interner: &StringInterner) -> TokenList {
    Lexer::new(source, interner).lex_all()
}

/// Resolve backslash escapes in a quoted literal body.
///
/// Unknown escapes keep the escaped character.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
mod tests;
