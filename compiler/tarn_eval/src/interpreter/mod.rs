//! Tree-walking interpreter over a parsed script.
//!
//! Every expression goes through `eval`, which grows the stack when needed,
//! charges one step against the budget and attaches the expression's span to
//! errors that do not carry one yet. Statements are expressions: a block, a
//! loop or an `if` evaluates to a value like anything else.
//!
//! Loops are run by `exec::foreach`; the interpreter only supplies the
//! `LoopDriver` hooks.

use tarn_ir::{BinaryOp, ExprArena, ExprId, ExprKind, ExprRange, MapEntryRange, Name};
use tarn_stack::ensure_sufficient_stack;

use crate::errors::{budget_exceeded, undefined_variable};
use crate::exec::foreach::{eval_foreach, LoopDriver};
use crate::operators::{evaluate_binary, evaluate_unary};
use crate::{property, Environment, EvalError, EvalOptions, EvalResult, Value};

pub struct Interpreter<'a> {
    arena: &'a ExprArena,
    env: Environment<'a>,
    options: EvalOptions,
    steps: u64,
}

impl<'a> Interpreter<'a> {
    pub fn new(arena: &'a ExprArena, env: Environment<'a>, options: EvalOptions) -> Self {
        Interpreter {
            arena,
            env,
            options,
            steps: 0,
        }
    }

    /// Expressions evaluated so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Run top-level statements; the script's value is that of the last one.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = body.len()))]
    pub fn eval_script(&mut self, body: ExprRange) -> EvalResult {
        self.eval_sequence(body)
    }

    pub fn eval(&mut self, id: ExprId) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(id))
    }

    fn eval_inner(&mut self, id: ExprId) -> EvalResult {
        let expr = *self.arena.get_expr(id);
        self.charge_step()
            .and_then(|()| self.eval_kind(expr.kind))
            .map_err(|err| err.or_span(expr.span))
    }

    fn charge_step(&mut self) -> Result<(), EvalError> {
        self.steps += 1;
        match self.options.max_steps {
            Some(limit) if self.steps > limit => Err(budget_exceeded(limit)),
            _ => Ok(()),
        }
    }

    fn eval_kind(&mut self, kind: ExprKind) -> EvalResult {
        match kind {
            ExprKind::Null | ExprKind::Empty => Ok(Value::Null),
            ExprKind::Bool(b) => Ok(Value::Bool(b)),
            ExprKind::Int(n) => Ok(Value::Int(n)),
            ExprKind::Float(bits) => Ok(Value::Float(f64::from_bits(bits))),
            ExprKind::Str(name) => Ok(Value::string(self.name(name))),
            ExprKind::Ident(name) => self.eval_ident(name),

            ExprKind::Array(items) => Ok(Value::array(self.eval_list(items)?)),
            ExprKind::Map(entries) => self.eval_map(entries),

            ExprKind::Binary { op, left, right } => self.eval_binary(op, left, right),
            ExprKind::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                evaluate_unary(&operand, op)
            }

            ExprKind::Assign { target, value } => {
                let value = self.eval(value)?;
                self.env.bind(target, value.clone());
                Ok(value)
            }
            ExprKind::Field { receiver, field } => {
                let receiver = self.eval(receiver)?;
                property::field(&receiver, self.name(field), self.options)
            }
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                let receiver = self.eval(receiver)?;
                let args = self.eval_list(args)?;
                property::call_method(&receiver, self.name(method), &args, self.options)
            }
            ExprKind::Index { receiver, index } => {
                let receiver = self.eval(receiver)?;
                let index = self.eval(index)?;
                property::index(&receiver, &index, self.options)
            }

            ExprKind::Block(stmts) => self.eval_sequence(stmts),
            ExprKind::Var { name, init } => {
                let value = match init {
                    Some(init) => self.eval(init)?,
                    None => Value::Null,
                };
                self.env.declare(name, value.clone());
                Ok(value)
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                if self.eval(cond)?.is_truthy() {
                    self.eval(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.eval(else_branch)
                } else {
                    Ok(Value::Null)
                }
            }
            ExprKind::ForEach {
                binding,
                source,
                body,
            } => eval_foreach(self, binding, source, body).map(|outcome| outcome.into_value()),
        }
    }

    #[inline]
    fn name(&self, name: Name) -> &'a str {
        self.env.interner().lookup(name)
    }

    fn eval_ident(&self, name: Name) -> EvalResult {
        match self.env.lookup(name) {
            Some(value) => Ok(value),
            None if self.options.strict => Err(undefined_variable(self.name(name))),
            None => Ok(Value::Null),
        }
    }

    fn eval_list(&mut self, range: ExprRange) -> Result<Vec<Value>, EvalError> {
        let arena = self.arena;
        arena
            .get_expr_list(range)
            .iter()
            .map(|&id| self.eval(id))
            .collect()
    }

    fn eval_map(&mut self, range: MapEntryRange) -> EvalResult {
        let arena = self.arena;
        let mut entries = Vec::with_capacity(arena.get_map_entries(range).len());
        for entry in arena.get_map_entries(range) {
            entries.push((self.name(entry.key), self.eval(entry.value)?));
        }
        Ok(Value::map(entries))
    }

    fn eval_sequence(&mut self, range: ExprRange) -> EvalResult {
        let arena = self.arena;
        let mut last = Value::Null;
        for &stmt in arena.get_expr_list(range) {
            last = self.eval(stmt)?;
        }
        Ok(last)
    }

    fn eval_binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> EvalResult {
        let left = self.eval(left)?;
        match op {
            BinaryOp::And if !left.is_truthy() => Ok(Value::Bool(false)),
            BinaryOp::Or if left.is_truthy() => Ok(Value::Bool(true)),
            BinaryOp::And | BinaryOp::Or => Ok(Value::Bool(self.eval(right)?.is_truthy())),
            _ => {
                let right = self.eval(right)?;
                evaluate_binary(&left, &right, op)
            }
        }
    }
}

impl LoopDriver for Interpreter<'_> {
    fn eval_source(&mut self, source: ExprId) -> EvalResult {
        self.eval(source)
    }

    fn bind_loop_var(&mut self, binding: Name, value: Value) {
        self.env.bind(binding, value);
    }

    fn eval_body(&mut self, body: ExprId) -> EvalResult {
        self.eval(body)
    }
}
