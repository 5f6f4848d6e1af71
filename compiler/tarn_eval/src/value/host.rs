//! Host-supplied values: ad-hoc objects, pull-iterators and legacy
//! enumerators.
//!
//! Iterator and enumerator handles are shared like any other value, but
//! only one holder drives the underlying cursor at a time. `take` moves the
//! boxed cursor out for good; `lease` lends it out and puts it back when the
//! lease is dropped, in whatever state it was left. While the cursor is out
//! the handle reads as consumed and behaves as an exhausted source.

use std::cell::RefCell;
use std::fmt;
use std::iter::Peekable;

use super::heap::Heap;
use super::Value;
use crate::errors::{no_such_element, undefined_method, EvalError, EvalResult};

/// Externally driven pull-iterator (`has_next` / `next`).
pub trait HostIterator {
    fn has_next(&mut self) -> bool;

    /// Produce the next element. Called only after `has_next` returned true.
    fn next(&mut self) -> EvalResult;
}

/// Legacy enumerator protocol (`has_more_elements` / `next_element`).
pub trait HostEnumeration {
    fn has_more_elements(&mut self) -> bool;

    fn next_element(&mut self) -> EvalResult;
}

/// An ad-hoc host object reachable from scripts.
///
/// Field access resolves through `property` first, then falls back to a
/// zero-argument method of the same name. A source value that is an object
/// is iterable when `has_method` reports one of the accessor names
/// (`iterator`, `iter`, `elements`).
pub trait HostObject: fmt::Debug {
    fn type_name(&self) -> &str;

    fn property(&self, _name: &str) -> Option<Value> {
        None
    }

    fn has_method(&self, _name: &str) -> bool {
        false
    }

    fn invoke(&self, name: &str, _args: &[Value]) -> EvalResult {
        Err(undefined_method(name, self.type_name()))
    }
}

type Slot<T> = Heap<RefCell<Option<Box<T>>>>;

/// A host cursor on loan from its handle.
pub struct CursorLease<T: ?Sized> {
    slot: Slot<T>,
    cursor: Option<Box<T>>,
}

impl<T: ?Sized> CursorLease<T> {
    fn acquire(slot: &Slot<T>) -> Option<Self> {
        let cursor = slot.borrow_mut().take()?;
        Some(CursorLease {
            slot: slot.clone(),
            cursor: Some(cursor),
        })
    }
}

impl CursorLease<dyn HostIterator> {
    /// Next element, or `None` once `has_next` reports false.
    pub fn pull(&mut self) -> Result<Option<Value>, EvalError> {
        let Some(iter) = self.cursor.as_deref_mut() else {
            return Ok(None);
        };
        if iter.has_next() {
            iter.next().map(Some)
        } else {
            Ok(None)
        }
    }
}

impl CursorLease<dyn HostEnumeration> {
    /// Next element, or `None` once `has_more_elements` reports false.
    pub fn pull(&mut self) -> Result<Option<Value>, EvalError> {
        let Some(enumeration) = self.cursor.as_deref_mut() else {
            return Ok(None);
        };
        if enumeration.has_more_elements() {
            enumeration.next_element().map(Some)
        } else {
            Ok(None)
        }
    }
}

impl<T: ?Sized> Drop for CursorLease<T> {
    fn drop(&mut self) {
        if let Some(cursor) = self.cursor.take() {
            *self.slot.borrow_mut() = Some(cursor);
        }
    }
}

/// Shared handle to a host pull-iterator.
#[derive(Clone)]
pub struct IteratorHandle(Slot<dyn HostIterator>);

impl IteratorHandle {
    pub(super) fn new(iter: Box<dyn HostIterator>) -> Self {
        IteratorHandle(Heap::new(RefCell::new(Some(iter))))
    }

    /// Take exclusive ownership of the cursor, leaving the handle consumed.
    pub fn take(&self) -> Option<Box<dyn HostIterator>> {
        self.0.borrow_mut().take()
    }

    /// Borrow the cursor until the lease is dropped.
    pub fn lease(&self) -> Option<CursorLease<dyn HostIterator>> {
        CursorLease::acquire(&self.0)
    }

    /// The cursor has been taken or is on loan.
    pub fn is_consumed(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl PartialEq for IteratorHandle {
    fn eq(&self, other: &Self) -> bool {
        Heap::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for IteratorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_consumed() { "consumed" } else { "live" };
        write!(f, "IteratorHandle({state})")
    }
}

/// Shared handle to a host legacy enumerator.
#[derive(Clone)]
pub struct EnumerationHandle(Slot<dyn HostEnumeration>);

impl EnumerationHandle {
    pub(super) fn new(enumeration: Box<dyn HostEnumeration>) -> Self {
        EnumerationHandle(Heap::new(RefCell::new(Some(enumeration))))
    }

    pub fn take(&self) -> Option<Box<dyn HostEnumeration>> {
        self.0.borrow_mut().take()
    }

    pub fn lease(&self) -> Option<CursorLease<dyn HostEnumeration>> {
        CursorLease::acquire(&self.0)
    }

    pub fn is_consumed(&self) -> bool {
        self.0.borrow().is_none()
    }
}

impl PartialEq for EnumerationHandle {
    fn eq(&self, other: &Self) -> bool {
        Heap::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EnumerationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_consumed() { "consumed" } else { "live" };
        write!(f, "EnumerationHandle({state})")
    }
}

/// Adapts any Rust iterator of values to both host protocols.
pub(super) struct ValueIter<I: Iterator<Item = Value>>(Peekable<I>);

impl<I: Iterator<Item = Value>> ValueIter<I> {
    pub(super) fn new(iter: I) -> Self {
        ValueIter(iter.peekable())
    }
}

impl<I: Iterator<Item = Value>> HostIterator for ValueIter<I> {
    fn has_next(&mut self) -> bool {
        self.0.peek().is_some()
    }

    fn next(&mut self) -> EvalResult {
        self.0.next().ok_or_else(no_such_element)
    }
}

impl<I: Iterator<Item = Value>> HostEnumeration for ValueIter<I> {
    fn has_more_elements(&mut self) -> bool {
        self.0.peek().is_some()
    }

    fn next_element(&mut self) -> EvalResult {
        self.0.next().ok_or_else(no_such_element)
    }
}
