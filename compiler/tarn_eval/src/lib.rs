//! Evaluator for Tarn scripts.
//!
//! The centre of the crate is the loop statement: `sequence` turns any
//! iterable value into a lazy single-pass `Sequence`, `exec::foreach` runs
//! the loop, and `Context::set` decides where the loop variable lands.
//! `Interpreter` walks the rest of the expression tree around it.

mod context;
mod environment;
pub mod errors;
pub mod exec;
mod interpreter;
pub mod operators;
mod options;
pub mod property;
pub mod sequence;
mod value;

pub use context::{Context, MapContext, ScopedContext};
pub use environment::Environment;
pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use exec::foreach::{eval_foreach, LoopDriver, LoopOutcome};
pub use interpreter::Interpreter;
pub use options::EvalOptions;
pub use sequence::{adapt, classify, Sequence, SourceClassification};
pub use value::{
    CursorLease, EnumerationHandle, Heap, HostEnumeration, HostIterator, HostObject, IteratorHandle,
    Value,
};
