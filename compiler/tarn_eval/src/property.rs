//! Property paths: field access, method calls and indexing.
//!
//! Built-in values get a small fixed member set dispatched by pattern
//! matching; host objects resolve through `HostObject`. A null receiver
//! reads as null in lenient mode and is an error in strict mode.

use std::collections::BTreeMap;

use crate::errors::{
    argument_count, cannot_index, index_out_of_bounds, integer_overflow, property_resolution,
    undefined_method,
};
use crate::{EvalError, EvalOptions, EvalResult, Heap, Value};

/// Resolve `receiver.name`.
///
/// Maps look the key up (missing keys read as null). Host objects try
/// `property` first, then a zero-argument method of the same name.
pub fn field(receiver: &Value, name: &str, options: EvalOptions) -> EvalResult {
    match receiver {
        Value::Null if options.strict => Err(property_resolution(name, "null")),
        Value::Null => Ok(Value::Null),
        Value::Map(map) => Ok(map.get(name).cloned().unwrap_or(Value::Null)),
        Value::Object(obj) => {
            if let Some(value) = obj.property(name) {
                Ok(value)
            } else if obj.has_method(name) {
                obj.invoke(name, &[])
            } else {
                Err(property_resolution(name, obj.type_name()))
            }
        }
        other => Err(property_resolution(name, &other.type_name())),
    }
}

/// Resolve `receiver.name(args)`.
pub fn call_method(
    receiver: &Value,
    name: &str,
    args: &[Value],
    options: EvalOptions,
) -> EvalResult {
    match receiver {
        Value::Null if options.strict => Err(undefined_method(name, "null")),
        Value::Null => Ok(Value::Null),
        Value::Map(map) => map_method(map, name, args),
        Value::Array(items) | Value::List(items) => {
            sequence_method(items, name, args, &receiver.type_name())
        }
        Value::Str(s) => string_method(s, name, args),
        Value::Object(obj) => obj.invoke(name, args),
        other => Err(undefined_method(name, &other.type_name())),
    }
}

fn require_args(
    method: &str,
    type_name: &str,
    expected: usize,
    args: &[Value],
) -> Result<(), EvalError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(argument_count(method, type_name, expected, args.len()))
    }
}

fn size(len: usize) -> EvalResult {
    i64::try_from(len)
        .map(Value::Int)
        .map_err(|_| integer_overflow("size"))
}

fn map_method(map: &BTreeMap<String, Value>, name: &str, args: &[Value]) -> EvalResult {
    let arity = match name {
        "keySet" | "keys" | "values" | "size" | "isEmpty" => 0,
        "get" | "containsKey" => 1,
        _ => return Err(undefined_method(name, "map")),
    };
    require_args(name, "map", arity, args)?;

    match (name, args) {
        ("keySet" | "keys", _) => Ok(Value::list(
            map.keys().map(|k| Value::string(k.as_str())).collect(),
        )),
        ("values", _) => Ok(Value::list(map.values().cloned().collect())),
        ("size", _) => size(map.len()),
        ("isEmpty", _) => Ok(Value::Bool(map.is_empty())),
        ("get", [key]) => Ok(map.get(&map_key(key)).cloned().unwrap_or(Value::Null)),
        ("containsKey", [key]) => Ok(Value::Bool(map.contains_key(&map_key(key)))),
        _ => Err(undefined_method(name, "map")),
    }
}

fn map_key(key: &Value) -> String {
    match key {
        Value::Str(s) => s.as_str().to_owned(),
        other => other.to_string(),
    }
}

fn sequence_method(
    items: &Heap<Vec<Value>>,
    name: &str,
    args: &[Value],
    type_name: &str,
) -> EvalResult {
    let arity = match name {
        "size" | "isEmpty" | "iterator" => 0,
        "get" | "contains" => 1,
        _ => return Err(undefined_method(name, type_name)),
    };
    require_args(name, type_name, arity, args)?;

    match (name, args) {
        ("size", _) => size(items.len()),
        ("isEmpty", _) => Ok(Value::Bool(items.is_empty())),
        ("iterator", _) => {
            let items = items.clone();
            Ok(Value::iterator(
                (0_usize..).map_while(move |i| items.get(i).cloned()),
            ))
        }
        ("get", [index]) => element(items, index, type_name),
        ("contains", [needle]) => Ok(Value::Bool(items.contains(needle))),
        _ => Err(undefined_method(name, type_name)),
    }
}

fn string_method(s: &str, name: &str, args: &[Value]) -> EvalResult {
    match name {
        "length" | "size" => {
            require_args(name, "string", 0, args)?;
            size(s.chars().count())
        }
        "isEmpty" => {
            require_args(name, "string", 0, args)?;
            Ok(Value::Bool(s.is_empty()))
        }
        _ => Err(undefined_method(name, "string")),
    }
}

fn element(items: &[Value], index: &Value, type_name: &str) -> EvalResult {
    let Value::Int(i) = *index else {
        return Err(cannot_index(&format!("{type_name} with {}", index.type_name())));
    };
    usize::try_from(i)
        .ok()
        .and_then(|at| items.get(at))
        .cloned()
        .ok_or_else(|| index_out_of_bounds(i, items.len()))
}

/// Resolve `receiver[index]`.
pub fn index(receiver: &Value, index: &Value, options: EvalOptions) -> EvalResult {
    match receiver {
        Value::Null if options.strict => Err(cannot_index("null")),
        Value::Null => Ok(Value::Null),
        Value::Array(items) | Value::List(items) => element(items, index, &receiver.type_name()),
        Value::Map(map) => Ok(map.get(&map_key(index)).cloned().unwrap_or(Value::Null)),
        Value::Str(s) => {
            let Value::Int(i) = *index else {
                return Err(cannot_index(&format!("string with {}", index.type_name())));
            };
            let len = s.chars().count();
            usize::try_from(i)
                .ok()
                .and_then(|at| s.chars().nth(at))
                .map(|c| Value::string(c.to_string()))
                .ok_or_else(|| index_out_of_bounds(i, len))
        }
        Value::Object(obj) => match index {
            Value::Str(name) => field(receiver, name, options),
            _ => Err(cannot_index(obj.type_name())),
        },
        other => Err(cannot_index(&other.type_name())),
    }
}
