use std::mem;

use thiserror::Error;

use finch_core::span::Position;
use finch_lexer::{Token, TokenKind};

/// A position-tagged syntax error, aborting the parse of the enclosing construct.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{position}] {message}")]
pub struct ParseError {
    /// Where the offending token starts.
    pub position: Position,
    /// Human-readable description.
    pub message: String,
}

impl ParseError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

/// A cursor over a slice of tokens, with the lookahead primitives the grammar rules use.
///
/// The token slice is expected to end with an `Eof` (or an `Error`) token, as produced by the lexer.
/// Reading past its end yields a synthetic `Eof`.
pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    eof: Token,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map(|token| token.position).unwrap_or_default();
        Self {
            tokens,
            current: 0,
            eof: Token::new(TokenKind::Eof, end),
        }
    }

    /// Get the token under the cursor.
    pub fn current(&self) -> &Token {
        self.peek(0)
    }

    /// Get the token `offset` positions after the cursor.
    pub fn peek(&self, offset: usize) -> &Token {
        self.tokens.get(self.current + offset).unwrap_or(&self.eof)
    }

    /// Get the token consumed `offset` positions ago (`last(1)` is the previously consumed one).
    pub fn last(&self, offset: usize) -> &Token {
        self.current
            .checked_sub(offset)
            .and_then(|index| self.tokens.get(index))
            .unwrap_or(&self.eof)
    }

    /// Whether the token under the cursor has the same kind as `kind` (payloads are ignored).
    pub fn check(&self, kind: &TokenKind) -> bool {
        same_kind(&self.current().kind, kind)
    }

    /// Whether the two tokens from the cursor have the given kinds.
    pub fn check_pair(&self, first: &TokenKind, second: &TokenKind) -> bool {
        same_kind(&self.peek(0).kind, first) && same_kind(&self.peek(1).kind, second)
    }

    /// Moves the cursor forward, returning the consumed token.
    pub fn advance(&mut self) -> &Token {
        if self.current < self.tokens.len() {
            self.current += 1;
        }
        self.last(1)
    }

    /// Consumes the token under the cursor if it has the given kind.
    pub fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the two tokens from the cursor if they have the given kinds.
    pub fn eat_pair(&mut self, first: &TokenKind, second: &TokenKind) -> bool {
        if self.check_pair(first, second) {
            self.advance();
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes a token of the given kind, or fails with the given message.
    pub fn consume(&mut self, kind: &TokenKind, message: &str) -> Result<&Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(message))
        }
    }

    /// Consumes a name token, or fails with the given message.
    pub fn consume_name(&mut self, message: &str) -> Result<String, ParseError> {
        match &self.current().kind {
            TokenKind::Name(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.error(message)),
        }
    }

    /// Skips any line breaks under the cursor.
    pub fn skip_lines(&mut self) {
        while self.eat(&TokenKind::Line) {}
    }

    /// Expects nothing but line breaks up to the end of the input.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        self.skip_lines();
        if self.check(&TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.error("Expected the end of the input"))
        }
    }

    /// Builds an error located at the token under the cursor.
    pub fn error(&self, message: &str) -> ParseError {
        let token = self.current();
        match &token.kind {
            TokenKind::Error(reason) => ParseError::new(token.position, reason.clone()),
            kind => ParseError::new(token.position, format!("{}, found {}", message, kind)),
        }
    }
}

fn same_kind(a: &TokenKind, b: &TokenKind) -> bool {
    mem::discriminant(a) == mem::discriminant(b)
}
