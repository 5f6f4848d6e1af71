//! Tarn IR - shared data structures for the script front end and evaluator.
//!
//! - Spans for source locations
//! - Names for interned identifiers and string literals
//! - A flat expression arena (`ExprId` indices, no boxed nodes)
//!
//! Floats are stored as `u64` bits so every node is `Eq + Hash`.

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod operators;
mod span;

pub use arena::ExprArena;
pub use ast::{Expr, ExprKind, MapEntry, MapEntryRange};
pub use expr_id::{ExprId, ExprRange};
pub use interner::{InternOverflow, SharedInterner, StringInterner};
pub use name::Name;
pub use operators::{BinaryOp, UnaryOp};
pub use span::{Span, SpanError};
