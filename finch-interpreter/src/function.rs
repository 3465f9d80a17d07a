use std::fmt;

use finch_core::ast;

use crate::invokable::{Invoke, Return};
use crate::scope::Context;
use crate::universe::Universe;
use crate::value::Value;

/// Represents a function (closure).
#[derive(Clone)]
pub struct Function {
    /// The context captured when the function was created, never rebound.
    pub context: Context,
    /// Function definition from the AST.
    pub function: ast::FnExpr,
}

impl Function {
    /// Construct a function closing over the given context.
    pub fn new(function: ast::FnExpr, context: Context) -> Self {
        Self { context, function }
    }

    /// Whether this is a branch thunk, which lets early returns through.
    pub fn is_thunk(&self) -> bool {
        self.function.is_thunk
    }

    /// Apply this function, with the `this` it captured.
    pub fn call(&self, universe: &mut Universe, static_arg: Value, arg: Value) -> Return {
        self.invoke(universe, self.context.this.clone(), static_arg, arg)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Function")
            .field("params", &self.function.params.names)
            .field("is_thunk", &self.function.is_thunk)
            .finish()
    }
}
