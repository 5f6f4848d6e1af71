//! Statements: blocks, loops, `if`, `var` and expression statements.

use tarn_ir::{ExprId, ExprKind};
use tarn_lexer::TokenKind;
use tarn_stack::ensure_sufficient_stack;
use tracing::trace;

use super::Parser;
use crate::{ErrorContext, ParseError, ParseErrorKind};

impl Parser<'_> {
    pub(super) fn statement(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.statement_inner())
    }

    fn statement_inner(&mut self) -> Result<ExprId, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Semicolon => {
                let span = self.cursor.advance().span;
                Ok(self.alloc(ExprKind::Empty, span))
            }
            TokenKind::LBrace => self.block().map_err(|e| e.in_context(ErrorContext::Block)),
            TokenKind::For | TokenKind::Foreach => self
                .for_loop()
                .map_err(|e| e.in_context(ErrorContext::ForLoop)),
            TokenKind::If => self
                .if_statement()
                .map_err(|e| e.in_context(ErrorContext::IfStatement)),
            TokenKind::Var => self
                .var_declaration()
                .map_err(|e| e.in_context(ErrorContext::VarDeclaration)),
            _ => {
                let expr = self.expression()?;
                self.cursor.eat(&TokenKind::Semicolon);
                Ok(expr)
            }
        }
    }

    /// `{ stmt* }` at statement position.
    fn block(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.expect(&TokenKind::LBrace)?.span;
        let mut statements = Vec::new();
        loop {
            match self.cursor.current_kind() {
                TokenKind::RBrace => break,
                TokenKind::Eof => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnterminatedBlock,
                        start.merge(self.cursor.current_span()),
                    ));
                }
                _ => statements.push(self.statement()?),
            }
        }
        let end = self.cursor.advance().span;
        let range = self.arena.alloc_expr_list(statements);
        Ok(self.alloc(ExprKind::Block(range), start.merge(end)))
    }

    /// `for (x : src) body` or `foreach (x in src) body`.
    fn for_loop(&mut self) -> Result<ExprId, ParseError> {
        let keyword = self.cursor.advance();
        let foreach_spelling = keyword.kind == TokenKind::Foreach;

        self.cursor.expect(&TokenKind::LParen)?;
        let (binding, _) = self.cursor.expect_ident()?;
        if foreach_spelling {
            if !self.cursor.check_word("in") {
                return Err(self.cursor.unexpected("`in`"));
            }
            self.cursor.advance();
        } else {
            self.cursor.expect(&TokenKind::Colon)?;
        }
        let source = self.expression()?;
        self.cursor.expect(&TokenKind::RParen)?;
        let body = self.statement()?;

        trace!(
            foreach_spelling,
            binding = self.cursor.interner().lookup(binding),
            "parsed loop"
        );
        let span = keyword.span.merge(self.span_of(body));
        Ok(self.alloc(
            ExprKind::ForEach {
                binding,
                source,
                body,
            },
            span,
        ))
    }

    fn if_statement(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        self.cursor.expect(&TokenKind::LParen)?;
        let cond = self.expression()?;
        self.cursor.expect(&TokenKind::RParen)?;
        let then_branch = self.statement()?;
        let else_branch = if self.cursor.eat(&TokenKind::Else) {
            Some(self.statement()?)
        } else {
            None
        };
        let end = self.span_of(else_branch.unwrap_or(then_branch));
        Ok(self.alloc(
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            },
            start.merge(end),
        ))
    }

    /// `var name (= init)? ;?`
    fn var_declaration(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let (name, name_span) = self.cursor.expect_ident()?;
        let init = if self.cursor.eat(&TokenKind::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        let end = init.map_or(name_span, |id| self.span_of(id));
        self.cursor.eat(&TokenKind::Semicolon);
        Ok(self.alloc(ExprKind::Var { name, init }, start.merge(end)))
    }
}
