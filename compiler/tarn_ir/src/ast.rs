//! Expression nodes.
//!
//! Statements are expressions too: a script is a list of `ExprId`s and its
//! value is the value of the last one. Children are arena indices, never
//! boxes.

use std::fmt;

use crate::{BinaryOp, ExprId, ExprRange, Name, Span, UnaryOp};

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// `key: value` pair in a map literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MapEntry {
    pub key: Name,
    pub value: ExprId,
    pub span: Span,
}

/// Range into the arena's map entry storage.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct MapEntryRange {
    pub start: u32,
    pub len: u32,
}

impl MapEntryRange {
    pub const EMPTY: MapEntryRange = MapEntryRange { start: 0, len: 0 };

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Null,
    Bool(bool),
    Int(i64),
    /// Stored as raw bits so nodes stay `Eq + Hash`.
    Float(u64),
    Str(Name),
    Ident(Name),

    /// `[a, b, c]`
    Array(ExprRange),
    /// `{ "k": v, k2: v2 }`
    Map(MapEntryRange),

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },

    /// `name = value`; evaluates to `value`.
    Assign {
        target: Name,
        value: ExprId,
    },
    /// `receiver.field`
    Field {
        receiver: ExprId,
        field: Name,
    },
    /// `receiver.method(args)`
    MethodCall {
        receiver: ExprId,
        method: Name,
        args: ExprRange,
    },
    /// `receiver[index]`
    Index {
        receiver: ExprId,
        index: ExprId,
    },

    /// `{ stmt* }`; evaluates to its last statement, or null.
    Block(ExprRange),
    /// A lone `;`.
    Empty,
    /// `var name (= init)?`
    Var {
        name: Name,
        init: Option<ExprId>,
    },
    If {
        cond: ExprId,
        then_branch: ExprId,
        else_branch: Option<ExprId>,
    },
    /// Both `for (x : src) body` and `foreach (x in src) body`.
    ForEach {
        binding: Name,
        source: ExprId,
        body: ExprId,
    },
}

impl ExprKind {
    pub fn float(value: f64) -> Self {
        ExprKind::Float(value.to_bits())
    }
}
