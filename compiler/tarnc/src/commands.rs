//! Command implementations behind the `tarn` binary.
//!
//! Argument handling is hand-rolled: flags may appear anywhere after the
//! subcommand, and the first bare argument is the file or script text.

use crate::{Engine, MapContext, Value};

/// Options shared by `tarn run` and `tarn eval`.
#[derive(Debug, Default, PartialEq)]
pub struct RunOptions {
    pub strict: bool,
    pub max_steps: Option<u64>,
    /// `--set name=value` bindings, in command-line order.
    pub bindings: Vec<(String, Value)>,
}

/// Split `args` (everything after the subcommand) into options and
/// positional arguments.
pub fn parse_run_options(args: &[String]) -> Result<(RunOptions, Vec<&str>), String> {
    let mut options = RunOptions::default();
    let mut positional = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == "--strict" {
            options.strict = true;
        } else if let Some(limit) = arg.strip_prefix("--max-steps=") {
            let limit = limit
                .parse()
                .map_err(|_| format!("invalid step limit '{limit}'"))?;
            options.max_steps = Some(limit);
        } else if let Some(binding) = arg.strip_prefix("--set=") {
            options.bindings.push(parse_binding(binding)?);
        } else if arg == "--set" {
            let Some(binding) = iter.next() else {
                return Err("--set expects name=value".to_owned());
            };
            options.bindings.push(parse_binding(binding)?);
        } else if arg.starts_with("--") {
            return Err(format!("unknown option '{arg}'"));
        } else {
            positional.push(arg.as_str());
        }
    }

    Ok((options, positional))
}

fn parse_binding(text: &str) -> Result<(String, Value), String> {
    match text.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_owned(), parse_literal(value))),
        _ => Err(format!("invalid binding '{text}', expected name=value")),
    }
}

/// Interpret a command-line value: integers, floats, `true`, `false` and
/// `null` are taken literally, anything else is a string.
pub fn parse_literal(text: &str) -> Value {
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        _ => text
            .parse::<i64>()
            .map(Value::Int)
            .or_else(|_| text.parse::<f64>().map(Value::Float))
            .unwrap_or_else(|_| Value::string(text)),
    }
}

pub fn read_file(path: &str) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
        std::io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
        std::io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
        _ => format!("error reading '{path}': {e}"),
    })
}

/// Compile and execute `source` in a fresh context seeded from the
/// `--set` bindings.
pub fn run_source(source: &str, options: &RunOptions) -> Result<Value, String> {
    let mut builder = Engine::builder().strict(options.strict);
    if let Some(limit) = options.max_steps {
        builder = builder.max_steps(limit);
    }
    let engine = builder.build();

    let script = engine
        .compile(source)
        .map_err(|e| format!("parse error: {e}"))?;
    let mut context: MapContext = options.bindings.iter().cloned().collect();
    script
        .execute(&mut context)
        .map_err(|e| format!("runtime error: {e}"))
}

pub fn run_file(path: &str, options: &RunOptions) -> Result<Value, String> {
    let source = read_file(path)?;
    run_source(&source, options).map_err(|e| format!("{path}: {e}"))
}
