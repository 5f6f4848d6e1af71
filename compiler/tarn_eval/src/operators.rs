//! Binary and unary operators with loose numeric coercion.
//!
//! Null, booleans and numeric strings take part in arithmetic as numbers
//! (null is 0, booleans are 0 or 1). `+` between two strings, or between a
//! string and something that does not coerce, concatenates. Integer
//! arithmetic is checked; a float operand makes the whole operation float.
//!
//! `&&` and `||` short-circuit in the interpreter; the arms here only cover
//! callers that already hold both operands.

use std::cmp::Ordering;

use tarn_ir::{BinaryOp, UnaryOp};

use crate::errors::{division_by_zero, integer_overflow, invalid_binary_op, invalid_unary_op};
use crate::{EvalResult, Value};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[expect(
        clippy::cast_precision_loss,
        reason = "mixed int/float arithmetic is float arithmetic"
    )]
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(x) => x,
        }
    }
}

fn to_number(value: &Value) -> Option<Number> {
    match value {
        Value::Null => Some(Number::Int(0)),
        Value::Bool(b) => Some(Number::Int(i64::from(*b))),
        Value::Int(n) => Some(Number::Int(*n)),
        Value::Float(x) => Some(Number::Float(*x)),
        Value::Str(s) => parse_number(s),
        _ => None,
    }
}

fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>()
        .map(Number::Int)
        .or_else(|_| s.parse::<f64>().map(Number::Float))
        .ok()
}

/// Apply a binary operator to two evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            match (to_number(left), to_number(right)) {
                (Some(a), Some(b)) => arithmetic(a, b, op),
                _ => Err(mismatch(left, right, op)),
            }
        }
        BinaryOp::Eq => Ok(Value::Bool(loose_eq(left, right))),
        BinaryOp::Ne => Ok(Value::Bool(!loose_eq(left, right))),
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            let ordering = compare(left, right).ok_or_else(|| mismatch(left, right, op))?;
            Ok(Value::Bool(match op {
                BinaryOp::Lt => ordering == Ordering::Less,
                BinaryOp::Le => ordering != Ordering::Greater,
                BinaryOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            }))
        }
        BinaryOp::And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        BinaryOp::Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> crate::EvalError {
    invalid_binary_op(op, &left.type_name(), &right.type_name())
}

fn add(left: &Value, right: &Value) -> EvalResult {
    if let (Value::Str(a), Value::Str(b)) = (left, right) {
        return Ok(Value::string(format!("{}{}", a.as_str(), b.as_str())));
    }
    if let (Some(a), Some(b)) = (to_number(left), to_number(right)) {
        return arithmetic(a, b, BinaryOp::Add);
    }
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        return Ok(Value::string(format!(
            "{}{}",
            concat_text(left),
            concat_text(right)
        )));
    }
    Err(mismatch(left, right, BinaryOp::Add))
}

/// Null contributes nothing to a concatenation.
fn concat_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn arithmetic(a: Number, b: Number, op: BinaryOp) -> EvalResult {
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => int_arithmetic(a, b, op),
        _ => Ok(Value::Float(float_arithmetic(a.as_f64(), b.as_f64(), op))),
    }
}

fn int_arithmetic(a: i64, b: i64, op: BinaryOp) -> EvalResult {
    let (result, operation) = match op {
        BinaryOp::Add => (a.checked_add(b), "addition"),
        BinaryOp::Sub => (a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => (a.checked_mul(b), "multiplication"),
        BinaryOp::Div if b == 0 => return Err(division_by_zero()),
        BinaryOp::Div => (a.checked_div(b), "division"),
        BinaryOp::Mod if b == 0 => return Err(division_by_zero()),
        BinaryOp::Mod => (a.checked_rem(b), "remainder"),
        _ => return Err(invalid_binary_op(op, "integer", "integer")),
    };
    result
        .map(Value::Int)
        .ok_or_else(|| integer_overflow(operation))
}

fn float_arithmetic(a: f64, b: f64, op: BinaryOp) -> f64 {
    match op {
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Mod => a % b,
        _ => a + b,
    }
}

/// Equality with coercion: same-kind values compare structurally, null
/// equals only null, and otherwise numbers (including numeric strings)
/// compare by value.
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        _ => match (to_number(left), to_number(right)) {
            (Some(a), Some(b)) => numeric_cmp(a, b) == Some(Ordering::Equal),
            _ => left == right,
        },
    }
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Value::Str(a), Value::Str(b)) = (left, right) {
        return Some(a.as_str().cmp(b.as_str()));
    }
    numeric_cmp(to_number(left)?, to_number(right)?)
}

fn numeric_cmp(a: Number, b: Number) -> Option<Ordering> {
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => Some(a.cmp(&b)),
        _ => a.as_f64().partial_cmp(&b.as_f64()),
    }
}

/// Apply a unary operator.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match to_number(operand) {
            Some(Number::Int(n)) => n
                .checked_neg()
                .map(Value::Int)
                .ok_or_else(|| integer_overflow("negation")),
            Some(Number::Float(x)) => Ok(Value::Float(-x)),
            None => Err(invalid_unary_op(op, &operand.type_name())),
        },
    }
}
