use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::value::Value;
use crate::FinchRef;

/// A mutable name-to-value environment, chained to its enclosing scope.
///
/// Scopes are shared by reference: every closure created within a scope sees the mutations made through any other.
#[derive(Default)]
pub struct Scope {
    /// The bindings defined directly in this scope.
    pub bindings: HashMap<String, Value>,
    /// The enclosing scope, `None` for the top-level one.
    pub parent: Option<FinchRef<Scope>>,
}

impl Scope {
    /// Construct a new top-level scope.
    pub fn top_level() -> FinchRef<Scope> {
        Rc::new(RefCell::new(Scope::default()))
    }

    /// Construct a new empty scope nested under the given one.
    pub fn nested(parent: &FinchRef<Scope>) -> FinchRef<Scope> {
        Rc::new(RefCell::new(Scope {
            bindings: HashMap::new(),
            parent: Some(parent.clone()),
        }))
    }

    /// Search for a binding, from this scope outwards.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        match self.bindings.get(name) {
            Some(value) => Some(value.clone()),
            None => self.parent.as_ref()?.borrow().lookup(name),
        }
    }

    /// Rebind an existing binding, in the innermost scope that defines it.
    ///
    /// Returns `false` if no scope in the chain defines that name.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(binding) = self.bindings.get_mut(name) {
            *binding = value;
            return true;
        }
        match self.parent.as_ref() {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }

    /// Define (or shadow) a binding in this very scope.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("bindings", &self.bindings.keys())
            .field("nested", &self.parent.is_some())
            .finish()
    }
}

/// An invocation context: a scope, along with the receiver bound as `this`.
#[derive(Debug, Clone)]
pub struct Context {
    /// The scope new names are defined in.
    pub scope: FinchRef<Scope>,
    /// The current receiver.
    pub this: Value,
}

impl Context {
    /// Construct a context from a scope and a receiver.
    pub fn new(scope: FinchRef<Scope>, this: Value) -> Self {
        Self { scope, this }
    }

    /// Construct a context sharing this one's receiver, with a fresh scope nested under this one's.
    pub fn nested(&self) -> Self {
        Self {
            scope: Scope::nested(&self.scope),
            this: self.this.clone(),
        }
    }

    /// Search for a binding in the scope chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.scope.borrow().lookup(name)
    }

    /// Rebind an existing binding in the scope chain.
    pub fn assign(&self, name: &str, value: Value) -> bool {
        self.scope.borrow_mut().assign(name, value)
    }

    /// Define a binding in the innermost scope.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.scope.borrow_mut().define(name, value);
    }
}
