//!
//! This is the interpreter for the Finch language.
//!
#![warn(missing_docs)]

use std::cell::RefCell;
use std::rc::Rc;

/// Facilities for manipulating classes.
pub mod class;
/// Interpreter-level exceptions.
pub mod error;
/// Facilities for evaluating nodes and expressions.
pub mod evaluate;
/// Facilities for manipulating functions (closures).
pub mod function;
/// Facilities for manipulating class instances.
pub mod instance;
/// Facilities for invoking methods and functions.
pub mod invokable;
/// Facilities for manipulating class methods.
pub mod method;
/// Definitions for all supported primitives.
pub mod primitives;
/// Scopes and invocation contexts.
pub mod scope;
/// The interpreter's main data structure.
pub mod universe;
/// Facilities for manipulating values.
pub mod value;

/// A strong and owning reference to an object.
pub type FinchRef<T> = Rc<RefCell<T>>;
