//!
//! The Finch Lexical Analyser
//! ==========================
//!
//! This crate serves as the lexical analyser for the Finch language.
//!

mod lexer;
mod token;

pub use crate::lexer::Lexer;
pub use crate::token::{Token, TokenKind};
