//! Runtime values for Tarn scripts.
//!
//! All heap payloads go through factory methods on `Value`; `Heap<T>` has no
//! public constructor.
//!
//! ```text
//! let s = Value::string("hello");
//! let xs = Value::list(vec![Value::Int(1)]);
//! let it = Value::iterator(vec![Value::Int(1)]);
//! ```

mod heap;
mod host;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

pub use heap::Heap;
pub use host::{
    CursorLease, EnumerationHandle, HostEnumeration, HostIterator, HostObject, IteratorHandle,
};

use host::ValueIter;

/// Dynamically typed script value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Heap<String>),
    /// Fixed-size, indexable.
    Array(Heap<Vec<Value>>),
    /// Ordered collection.
    List(Heap<Vec<Value>>),
    /// String-keyed associative collection, enumerated in key order.
    Map(Heap<BTreeMap<String, Value>>),
    /// Host pull-iterator. Single-pass and destructive.
    Iterator(IteratorHandle),
    /// Host legacy enumerator. Single-pass and destructive.
    Enumeration(EnumerationHandle),
    Object(Heap<dyn HostObject>),
}

impl Value {
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Map(Heap::new(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Wrap a Rust iterator as a host pull-iterator.
    pub fn iterator<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Value::host_iterator(ValueIter::new(items.into_iter()))
    }

    pub fn host_iterator(iter: impl HostIterator + 'static) -> Self {
        Value::Iterator(IteratorHandle::new(Box::new(iter)))
    }

    /// Wrap a Rust iterator as a legacy enumerator.
    pub fn enumeration<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Value::host_enumeration(ValueIter::new(items.into_iter()))
    }

    pub fn host_enumeration(enumeration: impl HostEnumeration + 'static) -> Self {
        Value::Enumeration(EnumerationHandle::new(Box::new(enumeration)))
    }

    pub fn object(object: impl HostObject + 'static) -> Self {
        let rc: Rc<dyn HostObject> = Rc::new(object);
        Value::Object(Heap::from_rc(rc))
    }

    /// Type name for error messages. Host objects report their own.
    pub fn type_name(&self) -> Cow<'_, str> {
        Cow::Borrowed(match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Iterator(_) => "iterator",
            Value::Enumeration(_) => "enumeration",
            Value::Object(obj) => return Cow::Borrowed(obj.type_name()),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Truthiness for conditions and logical operators.
    ///
    /// Null, `false`, zero, `NaN`, empty strings and empty collections are
    /// false; everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(items) | Value::List(items) => !items.is_empty(),
            Value::Map(map) => !map.is_empty(),
            Value::Iterator(_) | Value::Enumeration(_) | Value::Object(_) => true,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) | (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Iterator(a), Value::Iterator(b)) => a == b,
            (Value::Enumeration(a), Value::Enumeration(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Float(x) => write!(f, "Float({x})"),
            Value::Str(s) => write!(f, "Str({:?})", s.as_str()),
            Value::Array(items) => f.debug_tuple("Array").field(&**items).finish(),
            Value::List(items) => f.debug_tuple("List").field(&**items).finish(),
            Value::Map(map) => f.debug_tuple("Map").field(&**map).finish(),
            Value::Iterator(handle) => fmt::Debug::fmt(handle, f),
            Value::Enumeration(handle) => fmt::Debug::fmt(handle, f),
            Value::Object(obj) => fmt::Debug::fmt(&**obj, f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
            write!(f, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{item}")?;
            }
            write!(f, "]")
        }

        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{}", s.as_str()),
            Value::Array(items) | Value::List(items) => join(f, items),
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Iterator(_) => write!(f, "<iterator>"),
            Value::Enumeration(_) => write!(f, "<enumeration>"),
            Value::Object(obj) => write!(f, "<{}>", obj.type_name()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
