//! Token cursor: lookahead and consumption over a `TokenList`.

use tarn_ir::{Name, Span, StringInterner};
use tarn_lexer::{Token, TokenKind, TokenList};
use tracing::trace;

use crate::{ParseError, ParseErrorKind};

pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    #[inline]
    pub fn current(&self) -> Token {
        self.tokens.get(self.pos)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token.
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .map_or(Span::DUMMY, |prev| self.tokens.get(prev).span)
    }

    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    /// Consume the current token. Stays on `Eof`.
    pub fn advance(&mut self) -> Token {
        let token = self.current();
        if !self.is_at_end() {
            trace!(pos = self.pos, kind = token.kind.display_name(), "advance");
            self.pos += 1;
        }
        token
    }

    /// Current token has the same variant as `kind`, payload ignored.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().is_same_kind(kind)
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(kind.display_name()))
        }
    }

    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        match self.current_kind() {
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                Ok((name, span))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Current token is the identifier `word` (used for contextual keywords).
    pub fn check_word(&self, word: &str) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(name) if self.interner.lookup(name) == word)
    }

    /// Error for the current token. `Error` tokens become `InvalidToken`.
    pub fn unexpected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        let kind = match token.kind {
            TokenKind::Error => ParseErrorKind::InvalidToken,
            found => ParseErrorKind::UnexpectedToken { expected, found },
        };
        ParseError::new(kind, token.span)
    }
}
