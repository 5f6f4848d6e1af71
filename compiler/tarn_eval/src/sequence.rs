//! Adapting arbitrary source values into a single-pass sequence.
//!
//! Classification is a pure predicate over the value (`classify`), checked
//! in a fixed order; construction (`adapt`) is the only step with effects:
//! it borrows host cursors out of their handles and invokes accessor
//! methods.
//!
//! Every sequence is lazy. Indexed and ordered sources are walked by
//! position, maps by resuming after the last key seen, and host cursors are
//! pulled only when the loop asks for the next element.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use crate::errors::{accessor_not_iterable, not_iterable};
use crate::{CursorLease, EvalError, Heap, HostEnumeration, HostIterator, HostObject, Value};

/// Zero-argument member names that make a host object iterable, in lookup
/// order.
pub const ACCESSOR_NAMES: [&str; 3] = ["iterator", "iter", "elements"];

/// How a source value is turned into a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceClassification {
    /// Null source: zero elements.
    Empty,
    /// Fixed-size array, walked by index.
    Indexed,
    /// Ordered collection, in its own order.
    Ordered,
    /// Associative collection; yields values in key order.
    Associative,
    /// Host pull-iterator (`has_next` / `next`).
    ExternalIterator,
    /// Host legacy enumerator (`has_more_elements` / `next_element`).
    LegacyEnumerator,
    /// Host object whose iterator accessor supplies the real source.
    AccessorDelegated,
}

impl SourceClassification {
    /// Whether an accessor may hand back a source of this kind.
    fn is_direct_source(self) -> bool {
        matches!(
            self,
            SourceClassification::Indexed
                | SourceClassification::Ordered
                | SourceClassification::Associative
                | SourceClassification::ExternalIterator
                | SourceClassification::LegacyEnumerator
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SourceClassification::Empty => "empty",
            SourceClassification::Indexed => "indexed",
            SourceClassification::Ordered => "ordered",
            SourceClassification::Associative => "associative",
            SourceClassification::ExternalIterator => "external-iterator",
            SourceClassification::LegacyEnumerator => "legacy-enumerator",
            SourceClassification::AccessorDelegated => "accessor-delegated",
        }
    }
}

impl fmt::Display for SourceClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide how `value` would be iterated, without touching it.
///
/// Returns `None` for values that cannot be iterated.
pub fn classify(value: &Value) -> Option<SourceClassification> {
    match value {
        Value::Null => Some(SourceClassification::Empty),
        Value::Array(_) => Some(SourceClassification::Indexed),
        Value::List(_) => Some(SourceClassification::Ordered),
        Value::Map(_) => Some(SourceClassification::Associative),
        Value::Iterator(_) => Some(SourceClassification::ExternalIterator),
        Value::Enumeration(_) => Some(SourceClassification::LegacyEnumerator),
        Value::Object(obj) => {
            find_accessor(&**obj).map(|_| SourceClassification::AccessorDelegated)
        }
        Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => None,
    }
}

fn find_accessor(obj: &dyn HostObject) -> Option<&'static str> {
    ACCESSOR_NAMES
        .into_iter()
        .find(|name| obj.has_method(name))
}

/// Turn `value` into a sequence.
///
/// Iterator and enumeration cursors are leased from their handles. The
/// handle reads as consumed while the sequence lives and gets the cursor
/// back when it is dropped, however far iteration got. A handle whose
/// cursor is out (taken, or leased by an enclosing loop) yields nothing.
pub fn adapt(value: Value) -> Result<Sequence, EvalError> {
    let Some(classification) = classify(&value) else {
        return Err(not_iterable(&value.type_name()));
    };

    let cursor = match value {
        Value::Object(obj) => {
            // classify only reports AccessorDelegated when an accessor exists
            let Some(accessor) = find_accessor(&*obj) else {
                return Err(not_iterable(obj.type_name()));
            };
            let inner = obj.invoke(accessor, &[])?;
            match classify(&inner) {
                Some(kind) if kind.is_direct_source() => direct_cursor(inner),
                _ => {
                    return Err(accessor_not_iterable(
                        accessor,
                        obj.type_name(),
                        &inner.type_name(),
                    ))
                }
            }
        }
        direct => direct_cursor(direct),
    };

    Ok(Sequence {
        classification,
        cursor,
    })
}

fn direct_cursor(value: Value) -> Cursor {
    match value {
        Value::Array(items) | Value::List(items) => Cursor::Items { items, next: 0 },
        Value::Map(map) => Cursor::MapValues {
            map,
            last_key: None,
        },
        Value::Iterator(handle) => handle.lease().map_or(Cursor::Exhausted, Cursor::Iterator),
        Value::Enumeration(handle) => handle
            .lease()
            .map_or(Cursor::Exhausted, Cursor::Enumeration),
        _ => Cursor::Exhausted,
    }
}

enum Cursor {
    Items {
        items: Heap<Vec<Value>>,
        next: usize,
    },
    MapValues {
        map: Heap<BTreeMap<String, Value>>,
        last_key: Option<String>,
    },
    Iterator(CursorLease<dyn HostIterator>),
    Enumeration(CursorLease<dyn HostEnumeration>),
    Exhausted,
}

/// Lazy, single-pass stream of source elements.
///
/// Once exhausted, `try_next` keeps returning `Ok(None)`.
pub struct Sequence {
    classification: SourceClassification,
    cursor: Cursor,
}

impl Sequence {
    pub fn classification(&self) -> SourceClassification {
        self.classification
    }

    /// Pull the next element.
    ///
    /// Errors raised by a host cursor are passed through unchanged; the
    /// cursor stays on loan so the caller decides whether to continue.
    pub fn try_next(&mut self) -> Result<Option<Value>, EvalError> {
        let next = match &mut self.cursor {
            Cursor::Items { items, next } => items.get(*next).cloned().inspect(|_| *next += 1),
            Cursor::MapValues { map, last_key } => {
                let lower = match last_key.as_deref() {
                    Some(key) => Bound::Excluded(key),
                    None => Bound::Unbounded,
                };
                let entry = map
                    .range::<str, _>((lower, Bound::Unbounded))
                    .next()
                    .map(|(key, value)| (key.clone(), value.clone()));
                entry.map(|(key, value)| {
                    *last_key = Some(key);
                    value
                })
            }
            Cursor::Iterator(lease) => lease.pull()?,
            Cursor::Enumeration(lease) => lease.pull()?,
            Cursor::Exhausted => None,
        };

        if next.is_none() {
            self.cursor = Cursor::Exhausted;
        }
        Ok(next)
    }
}

impl Iterator for Sequence {
    type Item = Result<Value, EvalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().transpose()
    }
}

impl fmt::Debug for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exhausted = matches!(self.cursor, Cursor::Exhausted);
        f.debug_struct("Sequence")
            .field("classification", &self.classification)
            .field("exhausted", &exhausted)
            .finish()
    }
}

#[cfg(test)]
mod tests;
