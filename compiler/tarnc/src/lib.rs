//! Tarn: an embeddable script evaluator built around one loop statement.
//!
//! ```text
//! let engine = Engine::new();
//! let script = engine.compile("for (item : list) item")?;
//! let mut ctx = MapContext::new().with("list", Value::list(words));
//! let last = script.execute(&mut ctx)?;
//! ```
//!
//! A script compiles once and can run any number of times against
//! different contexts. Host data enters through the context: plain values,
//! `HostObject`s, and pull-iterators or legacy enumerators, all of which
//! `for`/`foreach` can iterate.

pub mod commands;

use std::sync::Once;

use tarn_ir::SharedInterner;
use tarn_parse::ParsedScript;

pub use tarn_eval::{
    Context, EvalError, EvalErrorKind, EvalOptions, EvalResult, HostEnumeration, HostIterator,
    HostObject, MapContext, ScopedContext, SourceClassification, Value,
};
pub use tarn_parse::{ParseError, ParseErrorKind};

static TRACING_INIT: Once = Once::new();

/// Install a global tracing subscriber, once per process.
///
/// Filtering follows `RUST_LOG`; nothing is installed when it is unset.
/// With `TARN_LOG_TREE` set, events are rendered as an indented span tree
/// instead of flat lines.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_err() {
            return;
        }
        let filter = EnvFilter::from_default_env();
        if std::env::var_os("TARN_LOG_TREE").is_some() {
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .with(filter)
                .init();
        } else {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Compiles scripts with a fixed set of evaluation options.
#[derive(Clone, Debug, Default)]
pub struct Engine {
    interner: SharedInterner,
    options: EvalOptions,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn options(&self) -> EvalOptions {
        self.options
    }

    /// Parse `source` into a reusable script.
    pub fn compile(&self, source: &str) -> Result<Script, ParseError> {
        let parsed = tarn_parse::parse_source(source, &self.interner)?;
        tracing::debug!(
            statements = parsed.body.len(),
            nodes = parsed.arena.expr_count(),
            "compiled script"
        );
        Ok(Script {
            parsed,
            interner: self.interner.clone(),
            options: self.options,
        })
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EngineBuilder {
    options: EvalOptions,
}

impl EngineBuilder {
    /// Undefined variables and property access on null become errors.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Abort execution after `limit` evaluated expressions.
    #[must_use]
    pub fn max_steps(mut self, limit: u64) -> Self {
        self.options.max_steps = Some(limit);
        self
    }

    #[must_use]
    pub fn options(mut self, options: EvalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            interner: SharedInterner::new(),
            options: self.options,
        }
    }
}

/// A compiled script.
#[derive(Clone, Debug)]
pub struct Script {
    parsed: ParsedScript,
    interner: SharedInterner,
    options: EvalOptions,
}

impl Script {
    /// Run the script against `context`; the result is the value of the last
    /// top-level statement.
    #[tracing::instrument(level = "debug", skip_all, fields(strict = self.options.strict))]
    pub fn execute(&self, context: &mut dyn Context) -> EvalResult {
        let env = tarn_eval::Environment::new(context, &self.interner);
        let mut interpreter = tarn_eval::Interpreter::new(&self.parsed.arena, env, self.options);
        let result = interpreter.eval_script(self.parsed.body);
        tracing::debug!(steps = interpreter.steps(), ok = result.is_ok(), "script finished");
        result
    }
}
