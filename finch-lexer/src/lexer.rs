use finch_core::span::Position;

use crate::token::{Token, TokenKind};

/// The lexer for the Finch language.
pub struct Lexer {
    pub(crate) chars: Vec<char>,
    pub(crate) position: Position,
    pub(crate) last: Option<TokenKind>,
    pub(crate) done: bool,
}

impl Lexer {
    const COMMENT: &'static str = "//";

    pub fn new<T: AsRef<str>>(input: T) -> Lexer {
        Lexer {
            chars: input.as_ref().chars().rev().collect(),
            position: Position::default(),
            last: None,
            done: false,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.last().copied()
    }

    fn peek_second(&self) -> Option<char> {
        self.chars.iter().rev().nth(1).copied()
    }

    fn pop(&mut self) -> Option<char> {
        let ch = self.chars.pop()?;
        if ch == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(ch)
    }

    fn take_while(&mut self, predicate: impl Fn(char) -> bool) -> String {
        let mut output = String::new();
        while let Some(ch) = self.peek().filter(|ch| predicate(*ch)) {
            output.push(ch);
            self.pop();
        }
        output
    }

    fn starts_with(&self, pattern: &str) -> bool {
        self.chars.iter().rev().copied().take(pattern.len()).eq(pattern.chars())
    }

    fn lex_string(&mut self) -> TokenKind {
        let mut output = String::new();
        self.pop();
        loop {
            let ch = match self.pop() {
                Some(ch) => ch,
                None => return TokenKind::Error(String::from("unterminated string literal")),
            };
            match ch {
                '"' => break TokenKind::String(output),
                '\\' => match self.pop() {
                    Some('t') => output.push('\t'),
                    Some('n') => output.push('\n'),
                    Some('r') => output.push('\r'),
                    Some('"') => output.push('"'),
                    Some('\\') => output.push('\\'),
                    Some(ch) => {
                        return TokenKind::Error(format!("unknown escape sequence '\\{}'", ch))
                    }
                    None => return TokenKind::Error(String::from("unterminated string literal")),
                },
                ch => output.push(ch),
            }
        }
    }

    fn lex_number(&mut self) -> TokenKind {
        let int_part = self.take_while(|ch| ch.is_ascii_digit());
        let is_double = self.peek() == Some('.')
            && self.peek_second().map_or(false, |ch| ch.is_ascii_digit());
        if is_double {
            self.pop();
            let dec_part = self.take_while(|ch| ch.is_ascii_digit());
            let repr = format!("{}.{}", int_part, dec_part);
            match repr.parse() {
                Ok(value) => TokenKind::Double(value),
                Err(err) => TokenKind::Error(format!("invalid double literal: {}", err)),
            }
        } else {
            match int_part.parse() {
                Ok(value) => TokenKind::Int(value),
                Err(_) => TokenKind::BigInt(int_part),
            }
        }
    }

    fn lex_name(&mut self) -> TokenKind {
        let mut ident = self.take_while(|ch| ch.is_alphanumeric() || ch == '_');
        if self.peek() == Some('?') {
            self.pop();
            ident.push('?');
        }
        if self.peek() == Some(':') {
            self.pop();
            return TokenKind::Field(ident);
        }
        TokenKind::keyword(ident.as_str()).unwrap_or(TokenKind::Name(ident))
    }

    fn lex_operator(&mut self) -> TokenKind {
        let op = self.take_while(Lexer::is_operator);
        if op == "=" {
            TokenKind::Equals
        } else {
            TokenKind::Operator(op)
        }
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.pop();
        }
    }

    fn is_operator(ch: char) -> bool {
        matches!(
            ch,
            '+' | '-' | '*' | '/' | '%' | '<' | '>' | '=' | '!' | '&' | '|' | '^' | '~'
        )
    }

    fn lex_token(&mut self) -> Option<Token> {
        loop {
            let position = self.position;
            let peeked = match self.peek() {
                Some(peeked) => peeked,
                None => return Some(Token::new(TokenKind::Eof, position)),
            };
            let kind = match peeked {
                '\n' => {
                    self.pop();
                    let continues = self.last.as_ref().map_or(true, TokenKind::continues_line);
                    if continues {
                        continue;
                    }
                    TokenKind::Line
                }
                _ if peeked.is_whitespace() => {
                    self.pop();
                    continue;
                }
                _ if self.starts_with(Lexer::COMMENT) => {
                    self.skip_comment();
                    continue;
                }
                '"' => self.lex_string(),
                '(' => self.single(TokenKind::LeftParen),
                ')' => self.single(TokenKind::RightParen),
                '[' => self.single(TokenKind::LeftBracket),
                ']' => self.single(TokenKind::RightBracket),
                '{' => self.single(TokenKind::LeftBrace),
                '}' => self.single(TokenKind::RightBrace),
                '`' => self.single(TokenKind::Backtick),
                ',' => self.single(TokenKind::Comma),
                '.' => self.single(TokenKind::Dot),
                '\'' => {
                    self.pop();
                    let name = self.take_while(|ch| ch.is_alphanumeric() || ch == '_');
                    if name.is_empty() {
                        TokenKind::Error(String::from("expected a type parameter name after '''"))
                    } else {
                        TokenKind::TypeParam(name)
                    }
                }
                _ if peeked.is_ascii_digit() => self.lex_number(),
                _ if peeked.is_alphabetic() || peeked == '_' => self.lex_name(),
                _ if Lexer::is_operator(peeked) => self.lex_operator(),
                _ => {
                    self.pop();
                    TokenKind::Error(format!("unexpected character '{}'", peeked))
                }
            };
            return Some(Token::new(kind, position));
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pop();
        kind
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let token = self.lex_token()?;
        if matches!(token.kind, TokenKind::Eof | TokenKind::Error(_)) {
            self.done = true;
        }
        self.last = Some(token.kind.clone());
        Some(token)
    }
}
