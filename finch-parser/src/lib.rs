//!
//! This crate serves as the syntactical analyser (parser) for the Finch language.
//!
//! The parser works with the tokens outputted by the lexical analyser, instead of directly reading text.
//!

/// The conditional (`if`/`let` chain) desugarer.
pub mod conditional;
/// Finch-specific grammar rules.
pub mod lang;
/// The token cursor and parse errors.
pub mod parser;

pub use crate::parser::{ParseError, Parser};

use finch_core::ast::{Block, Expression};
use finch_lexer::{Lexer, Token};

/// Parses a whole program from its tokens.
pub fn parse_program(input: &[Token]) -> Result<Block, ParseError> {
    Parser::new(input).program()
}

/// Parses a single expression from its tokens, expecting nothing but line breaks after it.
pub fn parse_expression(input: &[Token]) -> Result<Expression, ParseError> {
    let mut parser = Parser::new(input);
    let expr = parser.expression()?;
    parser.finish()?;
    Ok(expr)
}

/// Lexes and parses a whole program from source text.
pub fn parse_source(source: &str) -> Result<Block, ParseError> {
    let tokens: Vec<Token> = Lexer::new(source).collect();
    parse_program(tokens.as_slice())
}
