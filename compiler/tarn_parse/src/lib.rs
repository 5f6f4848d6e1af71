//! Parser for Tarn scripts.
//!
//! Recursive descent over the token stream, producing a flat `ExprArena`.
//! A script is a list of statements; `for (x : src)` and
//! `foreach (x in src)` both become `ExprKind::ForEach`.

mod cursor;
mod error;
mod grammar;

use tarn_ir::{ExprArena, ExprRange, StringInterner};
use tarn_lexer::TokenList;

pub use error::{ErrorContext, ParseError, ParseErrorKind};

/// Output of a successful parse.
#[derive(Clone, Debug)]
pub struct ParsedScript {
    pub arena: ExprArena,
    /// Top-level statements in source order.
    pub body: ExprRange,
}

/// Parse an already lexed script.
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> Result<ParsedScript, ParseError> {
    grammar::Parser::new(tokens, interner).parse_script()
}

/// Lex and parse `source`.
pub fn parse_source(source: &str, interner: &StringInterner) -> Result<ParsedScript, ParseError> {
    let tokens = tarn_lexer::lex(source, interner);
    parse(&tokens, interner)
}

#[cfg(test)]
mod tests;
