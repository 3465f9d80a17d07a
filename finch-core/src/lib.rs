//!
//! This crate contains common types that are useful to be shared across multiple tools when manipulating Finch-related things.
//!

/// The Finch Abstract Syntax Tree definitions.
pub mod ast;
/// Source positions.
pub mod span;
