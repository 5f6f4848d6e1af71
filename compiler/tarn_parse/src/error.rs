//! Parse error types.

use std::fmt;

use tarn_ir::Span;
use tarn_lexer::TokenKind;

/// What the parser was working on when it failed.
///
/// Rendered as a "while parsing ..." suffix on the error message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorContext {
    ForLoop,
    IfStatement,
    VarDeclaration,
    Block,
    ArrayLiteral,
    MapLiteral,
    MethodCall,
    IndexExpression,
}

impl ErrorContext {
    pub fn description(self) -> &'static str {
        match self {
            ErrorContext::ForLoop => "a for loop",
            ErrorContext::IfStatement => "an if statement",
            ErrorContext::VarDeclaration => "a var declaration",
            ErrorContext::Block => "a block",
            ErrorContext::ArrayLiteral => "an array literal",
            ErrorContext::MapLiteral => "a map literal",
            ErrorContext::MethodCall => "method call arguments",
            ErrorContext::IndexExpression => "an index expression",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: TokenKind,
    },
    #[error("invalid token")]
    InvalidToken,
    #[error("left side of `=` must be a variable name")]
    InvalidAssignmentTarget,
    #[error("unterminated block, expected `}}`")]
    UnterminatedBlock,
}

/// Parse failure with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
    pub context: Option<ErrorContext>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError {
            kind,
            span,
            context: None,
        }
    }

    /// Attach `context` unless a more specific one is already set.
    #[must_use]
    pub fn in_context(mut self, context: ErrorContext) -> Self {
        self.context.get_or_insert(context);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)?;
        if let Some(context) = self.context {
            write!(f, " while parsing {}", context.description())?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}
