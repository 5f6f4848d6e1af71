//! Evaluation options.

/// Knobs that change how a script executes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Undefined variables and property access on null are errors instead
    /// of evaluating to null.
    pub strict: bool,
    /// Upper bound on evaluated expressions per execution.
    pub max_steps: Option<u64>,
}

impl EvalOptions {
    pub fn lenient() -> Self {
        Self::default()
    }

    pub fn strict() -> Self {
        EvalOptions {
            strict: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_steps(mut self, limit: u64) -> Self {
        self.max_steps = Some(limit);
        self
    }
}
