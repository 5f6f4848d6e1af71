//! Expressions: assignment, binary operators, unary, postfix chains and
//! literals.
//!
//! Binary operators use precedence climbing over `BinaryOp::precedence`.
//! Assignment is right-associative and only accepts a bare identifier on
//! the left.

use tarn_ir::{BinaryOp, ExprId, ExprKind, ExprRange, MapEntry, UnaryOp};
use tarn_lexer::TokenKind;
use tarn_stack::ensure_sufficient_stack;

use super::Parser;
use crate::{ErrorContext, ParseError, ParseErrorKind};

/// Lowest binding power (`||`).
const MIN_PRECEDENCE: u8 = 1;

impl Parser<'_> {
    pub(super) fn expression(&mut self) -> Result<ExprId, ParseError> {
        ensure_sufficient_stack(|| self.assignment())
    }

    fn assignment(&mut self) -> Result<ExprId, ParseError> {
        let target = self.binary(MIN_PRECEDENCE)?;
        if !self.cursor.check(&TokenKind::Eq) {
            return Ok(target);
        }
        let eq_span = self.cursor.advance().span;
        let target_expr = *self.arena.get_expr(target);
        let ExprKind::Ident(name) = target_expr.kind else {
            return Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                target_expr.span.merge(eq_span),
            ));
        };
        let value = self.expression()?;
        let span = target_expr.span.merge(self.span_of(value));
        Ok(self.alloc(ExprKind::Assign { target: name, value }, span))
    }

    fn binary(&mut self, min_prec: u8) -> Result<ExprId, ParseError> {
        let mut left = self.unary()?;
        while let Some(op) = self.binary_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.cursor.advance();
            let right = self.binary(prec + 1)?;
            let span = self.span_of(left).merge(self.span_of(right));
            left = self.alloc(ExprKind::Binary { op, left, right }, span);
        }
        Ok(left)
    }

    fn binary_op(&self) -> Option<BinaryOp> {
        let op = match self.cursor.current_kind() {
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::NotEq => BinaryOp::Ne,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::LtEq => BinaryOp::Le,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::GtEq => BinaryOp::Ge,
            TokenKind::AmpAmp => BinaryOp::And,
            TokenKind::PipePipe => BinaryOp::Or,
            _ => return None,
        };
        Some(op)
    }

    fn unary(&mut self) -> Result<ExprId, ParseError> {
        let op = match self.cursor.current_kind() {
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.postfix(),
        };
        let start = self.cursor.advance().span;
        let operand = ensure_sufficient_stack(|| self.unary())?;
        let span = start.merge(self.span_of(operand));
        Ok(self.alloc(ExprKind::Unary { op, operand }, span))
    }

    /// `primary ('.' name ('(' args ')')? | '[' expr ']')*`
    fn postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.primary()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::Dot => {
                    self.cursor.advance();
                    let (name, name_span) = self.cursor.expect_ident()?;
                    if self.cursor.eat(&TokenKind::LParen) {
                        let args = self
                            .comma_list(&TokenKind::RParen)
                            .map_err(|e| e.in_context(ErrorContext::MethodCall))?;
                        let span = self.span_of(expr).merge(self.cursor.previous_span());
                        expr = self.alloc(
                            ExprKind::MethodCall {
                                receiver: expr,
                                method: name,
                                args,
                            },
                            span,
                        );
                    } else {
                        let span = self.span_of(expr).merge(name_span);
                        expr = self.alloc(
                            ExprKind::Field {
                                receiver: expr,
                                field: name,
                            },
                            span,
                        );
                    }
                }
                TokenKind::LBracket => {
                    self.cursor.advance();
                    let index = self
                        .expression()
                        .and_then(|index| {
                            self.cursor.expect(&TokenKind::RBracket)?;
                            Ok(index)
                        })
                        .map_err(|e| e.in_context(ErrorContext::IndexExpression))?;
                    let span = self.span_of(expr).merge(self.cursor.previous_span());
                    expr = self.alloc(
                        ExprKind::Index {
                            receiver: expr,
                            index,
                        },
                        span,
                    );
                }
                _ => return Ok(expr),
            }
        }
    }

    fn primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.cursor.current();
        let kind = match token.kind {
            TokenKind::Int(n) => ExprKind::Int(n),
            TokenKind::Float(bits) => ExprKind::Float(bits),
            TokenKind::Str(name) => ExprKind::Str(name),
            TokenKind::Ident(name) => ExprKind::Ident(name),
            TokenKind::True => ExprKind::Bool(true),
            TokenKind::False => ExprKind::Bool(false),
            TokenKind::Null => ExprKind::Null,
            TokenKind::LParen => {
                self.cursor.advance();
                let inner = self.expression()?;
                self.cursor.expect(&TokenKind::RParen)?;
                return Ok(inner);
            }
            TokenKind::LBracket => {
                return self
                    .array_literal()
                    .map_err(|e| e.in_context(ErrorContext::ArrayLiteral));
            }
            TokenKind::LBrace => {
                return self
                    .map_literal()
                    .map_err(|e| e.in_context(ErrorContext::MapLiteral));
            }
            _ => return Err(self.cursor.unexpected("expression")),
        };
        self.cursor.advance();
        Ok(self.alloc(kind, token.span))
    }

    fn array_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let elements = self.comma_list(&TokenKind::RBracket)?;
        let span = start.merge(self.cursor.previous_span());
        Ok(self.alloc(ExprKind::Array(elements), span))
    }

    /// `{ key: value, ... }` where a key is a string literal or identifier.
    fn map_literal(&mut self) -> Result<ExprId, ParseError> {
        let start = self.cursor.advance().span;
        let mut entries = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) {
            let key_token = self.cursor.current();
            let key = match key_token.kind {
                TokenKind::Str(name) | TokenKind::Ident(name) => name,
                _ => return Err(self.cursor.unexpected("map key")),
            };
            self.cursor.advance();
            self.cursor.expect(&TokenKind::Colon)?;
            let value = self.expression()?;
            entries.push(MapEntry {
                key,
                value,
                span: key_token.span.merge(self.span_of(value)),
            });
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        let end = self.cursor.expect(&TokenKind::RBrace)?.span;
        let range = self.arena.alloc_map_entries(entries);
        Ok(self.alloc(ExprKind::Map(range), start.merge(end)))
    }

    /// `expr (',' expr)* ','? close`, opening delimiter already consumed.
    fn comma_list(&mut self, close: &TokenKind) -> Result<ExprRange, ParseError> {
        let mut items = Vec::new();
        while !self.cursor.check(close) {
            items.push(self.expression()?);
            if !self.cursor.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.cursor.expect(close)?;
        Ok(self.arena.alloc_expr_list(items))
    }
}
