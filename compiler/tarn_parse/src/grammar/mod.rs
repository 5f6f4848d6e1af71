//! Grammar productions. Statements live in `stmt`, expressions in `expr`.

mod expr;
mod stmt;

use tarn_ir::{Expr, ExprArena, ExprId, ExprKind, Span, StringInterner};
use tarn_lexer::TokenList;
use tracing::debug;

use crate::cursor::Cursor;
use crate::{ParseError, ParsedScript};

pub(crate) struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: ExprArena,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        // The trailing Eof token ends at the source length.
        let source_len = tokens.get(tokens.len()).span.end as usize;
        Parser {
            cursor: Cursor::new(tokens, interner),
            arena: ExprArena::with_capacity(source_len),
        }
    }

    pub(crate) fn parse_script(mut self) -> Result<ParsedScript, ParseError> {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() {
            statements.push(self.statement()?);
        }
        let body = self.arena.alloc_expr_list(statements);
        debug!(
            statements = body.len(),
            exprs = self.arena.expr_count(),
            "parsed script"
        );
        Ok(ParsedScript {
            arena: self.arena,
            body,
        })
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn span_of(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span
    }
}
