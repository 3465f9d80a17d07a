//!
//! Conditional chains are desugared while parsing.
//!
//! Every plain guard gets wrapped in a truthiness test, so that the guard's own type decides what `true` means:
//!
//! ```text
//! if foo then ...      =>      if foo true? then ...
//! ```
//!
//! `let` guards narrow instead: the chain goes on only if the guard is not `nothing`, and the name is bound
//! in a scope covering the rest of the chain and the `then` branch.
//!
//! A chain made of exactly one plain guard is lowered further into an ordinary message send, with both branches
//! wrapped in thunks:
//!
//! ```text
//! if foo then a else b      =>      __if(foo true?, fn a, fn b)
//! ```
//!

use log::trace;

use finch_core::ast::{Block, Condition, Expression, IfExpr};
use finch_lexer::TokenKind;

use crate::parser::{ParseError, Parser};

/// The message sent to a guard's value to know whether it counts as true.
pub const TRUTHINESS_MESSAGE: &str = "true?";

/// The message the single-guard lowering sends, with a `(flag, then, else)` tuple.
pub const CONDITIONAL_MESSAGE: &str = "__if";

impl<'a> Parser<'a> {
    /// conditional := (('if' expression) | ('let' NAME '=' expression))+ 'then' then_body else_body?
    pub fn conditional(&mut self) -> Result<Expression, ParseError> {
        let start = self.current().position;

        let mut conditions = Vec::new();
        loop {
            if self.eat(&TokenKind::If) {
                let guard = self.guard()?;
                conditions.push(Condition::If(Expression::message(
                    Some(guard),
                    TRUTHINESS_MESSAGE,
                    None,
                )));
            } else if self.eat(&TokenKind::Let) {
                let name = self.consume_name("Expected a name to bind after 'let'")?;
                self.consume(
                    &TokenKind::Equals,
                    "Expected '=' after the name bound by 'let'",
                )?;
                let body = self.guard()?;
                conditions.push(Condition::Let { name, body });
            } else {
                break;
            }
        }

        self.consume(&TokenKind::Then, "Expected 'then' after the conditions")?;

        let (then_expr, closed) = self.then_body()?;

        let else_expr = if closed {
            if self.check(&TokenKind::Else) || self.check_pair(&TokenKind::Line, &TokenKind::Else) {
                self.skip_lines();
                return Err(self.error("Cannot have an 'else' after a 'then' block closed by 'end'"));
            }
            Expression::Nothing
        } else if self.eat(&TokenKind::Else) || self.eat_pair(&TokenKind::Line, &TokenKind::Else) {
            self.else_body()?
        } else {
            Expression::Nothing
        };

        trace!(
            "parsed conditional at {} with {} condition(s)",
            start,
            conditions.len()
        );

        if matches!(conditions.as_slice(), [Condition::If(_)]) {
            if let Some(Condition::If(guard)) = conditions.pop() {
                return Ok(Expression::message(
                    None,
                    CONDITIONAL_MESSAGE,
                    Some(Expression::tuple(vec![
                        guard,
                        Expression::thunk(then_expr),
                        Expression::thunk(else_expr),
                    ])),
                ));
            }
        }

        Ok(Expression::If(IfExpr {
            conditions,
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        }))
    }

    /// Parses a guard, letting the chain continue on the next line.
    fn guard(&mut self) -> Result<Expression, ParseError> {
        let guard = self.expression()?;
        let continues = self.check(&TokenKind::Line)
            && matches!(
                self.peek(1).kind,
                TokenKind::If | TokenKind::Let | TokenKind::Then
            );
        if continues {
            self.eat(&TokenKind::Line);
        }
        Ok(guard)
    }

    /// Parses the `then` branch, also telling whether it was closed by `end`.
    fn then_body(&mut self) -> Result<(Expression, bool), ParseError> {
        if !self.eat(&TokenKind::Line) {
            let expr = self.expression()?;
            let closed = self.eat(&TokenKind::End);
            return Ok((expr, closed));
        }

        let mut exprs = Vec::new();
        let closed = loop {
            exprs.push(self.expression()?);
            self.consume(
                &TokenKind::Line,
                "Expected a line break after an expression in a 'then' block",
            )?;
            if self.check(&TokenKind::Else) {
                break false;
            }
            if self.eat(&TokenKind::End) {
                break true;
            }
        };

        Ok((Expression::Block(Block { exprs }), closed))
    }

    /// Parses the `else` branch: a block closed by `end`, or a single expression optionally followed by `end`.
    fn else_body(&mut self) -> Result<Expression, ParseError> {
        if !self.eat(&TokenKind::Line) {
            let expr = self.expression()?;
            self.eat(&TokenKind::End);
            return Ok(expr);
        }

        let mut exprs = Vec::new();
        loop {
            self.skip_lines();
            if self.eat(&TokenKind::End) {
                break;
            }
            exprs.push(self.expression()?);
            if !self.check(&TokenKind::End) {
                self.consume(
                    &TokenKind::Line,
                    "Expected a line break after an expression in an 'else' block",
                )?;
            }
        }

        Ok(Expression::Block(Block { exprs }))
    }
}
