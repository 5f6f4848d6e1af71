//! Variable scopes visible to scripts.
//!
//! A `Context` is a mutable name → value mapping, optionally chained to an
//! enclosing scope. Reads fall back through the chain. `set` writes to the
//! nearest scope that already owns the name and otherwise creates the
//! binding locally; loop variables and plain assignments both go through it.

use rustc_hash::FxHashMap;

use crate::Value;

pub trait Context {
    fn get_local(&self, name: &str) -> Option<Value>;

    fn set_local(&mut self, name: &str, value: Value);

    fn has_local(&self, name: &str) -> bool;

    fn parent(&self) -> Option<&dyn Context> {
        None
    }

    fn parent_mut(&mut self) -> Option<&mut dyn Context> {
        None
    }

    fn get(&self, name: &str) -> Option<Value> {
        self.get_local(name)
            .or_else(|| self.parent().and_then(|parent| parent.get(name)))
    }

    fn has(&self, name: &str) -> bool {
        self.has_local(name) || self.parent().is_some_and(|parent| parent.has(name))
    }

    /// Overwrite the nearest owning binding, or create one in this scope.
    fn set(&mut self, name: &str, value: Value) {
        if !self.has_local(name) {
            if let Some(parent) = self.parent_mut() {
                if parent.has(name) {
                    parent.set(name, value);
                    return;
                }
            }
        }
        self.set_local(name, value);
    }
}

/// Root scope backed by a hash map.
#[derive(Clone, Debug, Default)]
pub struct MapContext {
    vars: FxHashMap<String, Value>,
}

impl MapContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Bindings sorted by name.
    pub fn sorted_bindings(&self) -> Vec<(&str, &Value)> {
        let mut bindings: Vec<_> = self.vars.iter().map(|(k, v)| (k.as_str(), v)).collect();
        bindings.sort_unstable_by_key(|(name, _)| *name);
        bindings
    }
}

impl Context for MapContext {
    fn get_local(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }

    fn set_local(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_owned(), value);
    }

    fn has_local(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MapContext {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        MapContext {
            vars: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Child scope that borrows its enclosing scope exclusively.
pub struct ScopedContext<'p> {
    vars: FxHashMap<String, Value>,
    parent: &'p mut dyn Context,
}

impl<'p> ScopedContext<'p> {
    pub fn new(parent: &'p mut dyn Context) -> Self {
        ScopedContext {
            vars: FxHashMap::default(),
            parent,
        }
    }

    /// Declare a binding in this scope, shadowing any enclosing one.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Context for ScopedContext<'_> {
    fn get_local(&self, name: &str) -> Option<Value> {
        self.vars.get(name).cloned()
    }

    fn set_local(&mut self, name: &str, value: Value) {
        self.vars.insert(name.to_owned(), value);
    }

    fn has_local(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    fn parent(&self) -> Option<&dyn Context> {
        Some(&*self.parent)
    }

    fn parent_mut(&mut self) -> Option<&mut dyn Context> {
        Some(&mut *self.parent)
    }
}
