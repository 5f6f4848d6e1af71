//! The `for`/`foreach` loop statement.
//!
//! Both spellings parse to `ExprKind::ForEach`; nothing here knows which
//! one the script used. The loop talks to the rest of the interpreter only
//! through `LoopDriver`, so it can be driven by anything that can evaluate
//! an expression and bind a variable.
//!
//! ```text
//! Init ─▶ SourceEvaluated ─▶ Iterating ─────────────▶ Done
//!                             │  ▲  └─(no elements)─▶ Empty ─▶ Done
//!                             └──┘ bind element, eval body
//! ```
//!
//! Any failure aborts the loop on the spot and propagates to the caller.
//! The loop variable is written through the scope chain, so it keeps its
//! last value after the loop ends.

use tarn_ir::{ExprId, Name};
use tracing::debug;

use crate::sequence::{adapt, Sequence, SourceClassification};
use crate::{EvalError, EvalResult, Value};

/// What the loop needs from the surrounding evaluator.
pub trait LoopDriver {
    /// Evaluate the source expression. Called exactly once per loop.
    fn eval_source(&mut self, source: ExprId) -> EvalResult;

    /// Bind the loop variable for the next iteration.
    fn bind_loop_var(&mut self, binding: Name, value: Value);

    fn eval_body(&mut self, body: ExprId) -> EvalResult;
}

/// Result of a completed loop.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopOutcome {
    pub iterations: u64,
    /// Value of the last body evaluation, if the body ran at all.
    pub last: Option<Value>,
    pub classification: SourceClassification,
}

impl LoopOutcome {
    /// The loop's value as seen by scripts: the last body value, or null.
    pub fn into_value(self) -> Value {
        self.last.unwrap_or(Value::Null)
    }
}

enum LoopState {
    Init,
    SourceEvaluated(Value),
    Iterating {
        sequence: Sequence,
        iterations: u64,
        last: Option<Value>,
    },
    Empty(SourceClassification),
    Done(LoopOutcome),
}

/// Run a loop statement to completion.
pub fn eval_foreach<D>(
    driver: &mut D,
    binding: Name,
    source: ExprId,
    body: ExprId,
) -> Result<LoopOutcome, EvalError>
where
    D: LoopDriver + ?Sized,
{
    let mut state = LoopState::Init;
    loop {
        state = match state {
            LoopState::Init => LoopState::SourceEvaluated(driver.eval_source(source)?),
            LoopState::SourceEvaluated(value) => LoopState::Iterating {
                sequence: adapt(value)?,
                iterations: 0,
                last: None,
            },
            LoopState::Iterating {
                mut sequence,
                iterations,
                last,
            } => match sequence.try_next()? {
                Some(element) => {
                    driver.bind_loop_var(binding, element);
                    let value = driver.eval_body(body)?;
                    LoopState::Iterating {
                        sequence,
                        iterations: iterations + 1,
                        last: Some(value),
                    }
                }
                None if iterations == 0 => LoopState::Empty(sequence.classification()),
                None => LoopState::Done(LoopOutcome {
                    iterations,
                    last,
                    classification: sequence.classification(),
                }),
            },
            LoopState::Empty(classification) => LoopState::Done(LoopOutcome {
                iterations: 0,
                last: None,
                classification,
            }),
            LoopState::Done(outcome) => {
                debug!(
                    classification = %outcome.classification,
                    iterations = outcome.iterations,
                    "foreach finished"
                );
                return Ok(outcome);
            }
        };
    }
}
