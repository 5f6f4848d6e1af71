//! Evaluation errors.
//!
//! `EvalErrorKind` carries the structured category; the factory functions
//! below are the usual way to build one. Spans are attached by the
//! interpreter at the innermost failing expression.

use std::fmt;

use tarn_ir::{BinaryOp, Span, UnaryOp};

use crate::Value;

pub type EvalResult = Result<Value, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Iteration
    #[error("cannot iterate over {type_name}")]
    NotIterable { type_name: String },
    #[error("`{accessor}()` on {type_name} returned {returned}, which is not iterable")]
    AccessorNotIterable {
        accessor: &'static str,
        type_name: String,
        returned: String,
    },
    #[error("no such element: iterator is exhausted")]
    NoSuchElement,

    // Access
    #[error("undefined variable: {name}")]
    UndefinedVariable { name: String },
    #[error("cannot resolve property '{property}' on {type_name}")]
    PropertyResolution { property: String, type_name: String },
    #[error("no method '{method}' on {type_name}")]
    UndefinedMethod { method: String, type_name: String },
    #[error("'{method}' on {type_name} takes {expected} argument(s) but {found} were supplied")]
    ArgumentCount {
        method: String,
        type_name: String,
        expected: usize,
        found: usize,
    },
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: i64, len: usize },
    #[error("cannot index into {type_name}")]
    CannotIndex { type_name: String },

    // Operators
    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    InvalidBinaryOp {
        op: BinaryOp,
        left: String,
        right: String,
    },
    #[error("operator `{op}` cannot be applied to {type_name}")]
    InvalidUnaryOp { op: UnaryOp, type_name: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {operation}")]
    IntegerOverflow { operation: &'static str },

    // Limits
    #[error("step budget of {limit} exceeded")]
    BudgetExceeded { limit: u64 },

    /// Raised by host objects, iterators and enumerators.
    #[error("{message}")]
    Host { message: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    pub span: Option<Span>,
}

impl EvalError {
    pub fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError { kind, span: None }
    }

    /// Error raised by host code.
    pub fn host(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Host {
            message: message.into(),
        })
    }

    /// Attach `span` only if no inner expression already did.
    #[must_use]
    pub fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }
}

impl From<EvalErrorKind> for EvalError {
    fn from(kind: EvalErrorKind) -> Self {
        EvalError::from_kind(kind)
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.span {
            Some(span) => write!(f, "{} at {span}", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for EvalError {}

pub fn not_iterable(type_name: &str) -> EvalError {
    EvalErrorKind::NotIterable {
        type_name: type_name.to_owned(),
    }
    .into()
}

pub fn accessor_not_iterable(accessor: &'static str, type_name: &str, returned: &str) -> EvalError {
    EvalErrorKind::AccessorNotIterable {
        accessor,
        type_name: type_name.to_owned(),
        returned: returned.to_owned(),
    }
    .into()
}

pub fn no_such_element() -> EvalError {
    EvalErrorKind::NoSuchElement.into()
}

pub fn undefined_variable(name: &str) -> EvalError {
    EvalErrorKind::UndefinedVariable {
        name: name.to_owned(),
    }
    .into()
}

pub fn property_resolution(property: &str, type_name: &str) -> EvalError {
    EvalErrorKind::PropertyResolution {
        property: property.to_owned(),
        type_name: type_name.to_owned(),
    }
    .into()
}

pub fn undefined_method(method: &str, type_name: &str) -> EvalError {
    EvalErrorKind::UndefinedMethod {
        method: method.to_owned(),
        type_name: type_name.to_owned(),
    }
    .into()
}

pub fn argument_count(method: &str, type_name: &str, expected: usize, found: usize) -> EvalError {
    EvalErrorKind::ArgumentCount {
        method: method.to_owned(),
        type_name: type_name.to_owned(),
        expected,
        found,
    }
    .into()
}

pub fn index_out_of_bounds(index: i64, len: usize) -> EvalError {
    EvalErrorKind::IndexOutOfBounds { index, len }.into()
}

pub fn cannot_index(type_name: &str) -> EvalError {
    EvalErrorKind::CannotIndex {
        type_name: type_name.to_owned(),
    }
    .into()
}

pub fn invalid_binary_op(op: BinaryOp, left: &str, right: &str) -> EvalError {
    EvalErrorKind::InvalidBinaryOp {
        op,
        left: left.to_owned(),
        right: right.to_owned(),
    }
    .into()
}

pub fn invalid_unary_op(op: UnaryOp, type_name: &str) -> EvalError {
    EvalErrorKind::InvalidUnaryOp {
        op,
        type_name: type_name.to_owned(),
    }
    .into()
}

pub fn division_by_zero() -> EvalError {
    EvalErrorKind::DivisionByZero.into()
}

pub fn integer_overflow(operation: &'static str) -> EvalError {
    EvalErrorKind::IntegerOverflow { operation }.into()
}

pub fn budget_exceeded(limit: u64) -> EvalError {
    EvalErrorKind::BudgetExceeded { limit }.into()
}
