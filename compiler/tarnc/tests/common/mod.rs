//! Host fixtures shared by the integration tests.

#![allow(dead_code)]

use tarnc::{EvalError, EvalResult, HostEnumeration, HostObject, Value};

pub const CHEESES: [&str; 3] = ["cheddar", "edam", "brie"];

/// Host object with a list-valued property and an iterator-valued member.
#[derive(Debug, Default)]
pub struct Foo;

impl HostObject for Foo {
    fn type_name(&self) -> &str {
        "Foo"
    }

    fn property(&self, name: &str) -> Option<Value> {
        match name {
            "cheeseList" => Some(Value::list(CHEESES.map(Value::from).to_vec())),
            _ => None,
        }
    }

    fn has_method(&self, name: &str) -> bool {
        name == "cheezy"
    }

    fn invoke(&self, name: &str, args: &[Value]) -> EvalResult {
        match (name, args) {
            ("cheezy", []) => Ok(Value::iterator(CHEESES.map(Value::from))),
            _ => Err(EvalError::host(format!("Foo cannot {name}"))),
        }
    }
}

/// Host object that is iterable through one of the accessor names.
#[derive(Debug)]
pub struct Shelf {
    pub accessor: &'static str,
    pub items: Vec<Value>,
}

impl HostObject for Shelf {
    fn type_name(&self) -> &str {
        "Shelf"
    }

    fn has_method(&self, name: &str) -> bool {
        name == self.accessor
    }

    fn invoke(&self, _name: &str, _args: &[Value]) -> EvalResult {
        Ok(Value::list(self.items.clone()))
    }
}

/// Host object that exposes an accessor returning something not iterable.
#[derive(Debug)]
pub struct Liar;

impl HostObject for Liar {
    fn type_name(&self) -> &str {
        "Liar"
    }

    fn has_method(&self, name: &str) -> bool {
        name == "iter"
    }

    fn invoke(&self, _name: &str, _args: &[Value]) -> EvalResult {
        Ok(Value::Int(42))
    }
}

/// Host object with no members at all.
#[derive(Debug)]
pub struct Opaque;

impl HostObject for Opaque {
    fn type_name(&self) -> &str {
        "Opaque"
    }
}

/// Legacy enumerator splitting a string on a delimiter.
pub struct Tokenizer {
    rest: String,
    delimiter: char,
}

impl Tokenizer {
    pub fn new(text: &str, delimiter: char) -> Self {
        Tokenizer {
            rest: text.to_owned(),
            delimiter,
        }
    }

    fn skip_delimiters(&mut self) {
        let trimmed = self.rest.trim_start_matches(self.delimiter).len();
        self.rest.drain(..self.rest.len() - trimmed);
    }
}

impl HostEnumeration for Tokenizer {
    fn has_more_elements(&mut self) -> bool {
        self.skip_delimiters();
        !self.rest.is_empty()
    }

    fn next_element(&mut self) -> EvalResult {
        self.skip_delimiters();
        if self.rest.is_empty() {
            return Err(EvalError::host("tokenizer is exhausted"));
        }
        let end = self.rest.find(self.delimiter).unwrap_or(self.rest.len());
        let token: String = self.rest.drain(..end).collect();
        Ok(Value::string(token))
    }
}
