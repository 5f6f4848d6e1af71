//! Name resolution over the host-supplied scope chain.
//!
//! The interpreter works with interned `Name`s; the `Context` trait speaks
//! plain strings. `Environment` bridges the two and is the single place
//! where script code reads and writes variables.

use tarn_ir::{Name, StringInterner};
use tracing::trace;

use crate::{Context, Value};

pub struct Environment<'a> {
    context: &'a mut dyn Context,
    interner: &'a StringInterner,
}

impl<'a> Environment<'a> {
    pub fn new(context: &'a mut dyn Context, interner: &'a StringInterner) -> Self {
        Environment { context, interner }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<Value> {
        self.context.get(self.interner.lookup(name))
    }

    /// Write `value` to the nearest scope owning `name`, or create it in the
    /// current scope.
    pub fn bind(&mut self, name: Name, value: Value) {
        let name = self.interner.lookup(name);
        trace!(name, value = %value, "bind");
        self.context.set(name, value);
    }

    /// Create or overwrite `name` in the current scope only (`var`).
    pub fn declare(&mut self, name: Name, value: Value) {
        let name = self.interner.lookup(name);
        trace!(name, value = %value, "declare");
        self.context.set_local(name, value);
    }
}
