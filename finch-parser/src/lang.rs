use finch_core::ast::*;
use finch_lexer::TokenKind;

use crate::parser::{ParseError, Parser};

/// Binding power of the binary operators, higher binds tighter.
fn precedence(op: &str) -> u8 {
    match op {
        "==" | "!=" | "<" | ">" | "<=" | ">=" => 1,
        "+" | "-" => 2,
        "*" | "/" | "%" => 3,
        _ => 4,
    }
}

impl<'a> Parser<'a> {
    /// program := LINE* (expression (LINE+ expression)*)? LINE* EOF
    pub fn program(&mut self) -> Result<Block, ParseError> {
        let mut exprs = Vec::new();
        self.skip_lines();
        while !self.check(&TokenKind::Eof) {
            exprs.push(self.expression()?);
            if !self.check(&TokenKind::Eof) {
                self.consume(&TokenKind::Line, "Expected a line break after an expression")?;
            }
            self.skip_lines();
        }
        Ok(Block { exprs })
    }

    pub fn expression(&mut self) -> Result<Expression, ParseError> {
        match self.current().kind {
            TokenKind::Var => self.definition(),
            TokenKind::Def => self.function_definition(),
            TokenKind::Class => self.class_def(),
            TokenKind::Return => self.early_return(),
            TokenKind::For
            | TokenKind::While
            | TokenKind::Match
            | TokenKind::Case
            | TokenKind::Catch
            | TokenKind::With => Err(self.error("Unsupported construct")),
            _ => self.assignment(),
        }
    }

    /// definition := 'var' NAME '=' expression
    fn definition(&mut self) -> Result<Expression, ParseError> {
        self.consume(&TokenKind::Var, "Expected 'var'")?;
        let name = self.consume_name("Expected a name after 'var'")?;
        self.consume(&TokenKind::Equals, "Expected '=' after the defined name")?;
        let value = self.expression()?;
        Ok(Expression::Define(name, Box::new(value)))
    }

    /// function_definition := 'def' (message_name | OPERATOR) function
    fn function_definition(&mut self) -> Result<Expression, ParseError> {
        let (name, function) = self.method()?;
        Ok(Expression::Define(name, Box::new(Expression::Fn(function))))
    }

    fn method(&mut self) -> Result<(String, FnExpr), ParseError> {
        self.consume(&TokenKind::Def, "Expected 'def'")?;
        let name = match (&self.current().kind, self.message_name()) {
            (_, Some(name)) => name,
            (TokenKind::Operator(name), None) => name.clone(),
            _ => return Err(self.error("Expected a method name after 'def'")),
        };
        self.advance();
        let function = self.function()?;
        Ok((name, function))
    }

    /// class_def := 'class' NAME LINE (member LINE)* 'end'
    fn class_def(&mut self) -> Result<Expression, ParseError> {
        self.consume(&TokenKind::Class, "Expected 'class'")?;
        let name = self.consume_name("Expected a class name after 'class'")?;
        self.consume(&TokenKind::Line, "Expected a line break after the class name")?;

        let mut members = Vec::new();
        loop {
            self.skip_lines();
            if self.eat(&TokenKind::End) {
                break;
            }
            let member = match self.current().kind {
                TokenKind::Var => {
                    self.advance();
                    let name = self.consume_name("Expected a field name after 'var'")?;
                    self.consume(&TokenKind::Equals, "Expected '=' after the field name")?;
                    let initializer = self.expression()?;
                    ClassMember::Field { name, initializer }
                }
                TokenKind::Def => {
                    let (name, function) = self.method()?;
                    ClassMember::Method {
                        name,
                        function,
                        shared: false,
                    }
                }
                TokenKind::Shared => {
                    self.advance();
                    let (name, function) = self.method()?;
                    ClassMember::Method {
                        name,
                        function,
                        shared: true,
                    }
                }
                _ => return Err(self.error("Expected a field or a method declaration")),
            };
            members.push(member);
            if !self.check(&TokenKind::End) {
                self.consume(&TokenKind::Line, "Expected a line break after a class member")?;
            }
        }

        Ok(Expression::Class(ClassDef { name, members }))
    }

    /// early_return := 'return' expression?
    fn early_return(&mut self) -> Result<Expression, ParseError> {
        self.consume(&TokenKind::Return, "Expected 'return'")?;
        let ends_here = matches!(
            self.current().kind,
            TokenKind::Line
                | TokenKind::Eof
                | TokenKind::End
                | TokenKind::Else
                | TokenKind::RightParen
        );
        let value = if ends_here {
            Expression::Nothing
        } else {
            self.expression()?
        };
        Ok(Expression::Return(Box::new(value)))
    }

    /// assignment := or_expr ('=' expression)?
    fn assignment(&mut self) -> Result<Expression, ParseError> {
        let target = self.or_expr()?;
        if !self.check(&TokenKind::Equals) {
            return Ok(target);
        }
        match target {
            Expression::Message(Message {
                receiver,
                signature,
                static_value: None,
                value: None,
            }) => {
                self.advance();
                let value = self.expression()?;
                Ok(Expression::Assignment(Assignment {
                    receiver,
                    name: signature,
                    value: Box::new(value),
                }))
            }
            _ => Err(self.error("Invalid assignment target")),
        }
    }

    fn or_expr(&mut self) -> Result<Expression, ParseError> {
        let mut lhs = self.and_expr()?;
        while self.eat(&TokenKind::Or) {
            let rhs = self.and_expr()?;
            lhs = Expression::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Expression, ParseError> {
        let mut lhs = self.binary(1)?;
        while self.eat(&TokenKind::And) {
            let rhs = self.binary(1)?;
            lhs = Expression::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// Precedence climbing over operator sends, all left-associative.
    fn binary(&mut self, min_precedence: u8) -> Result<Expression, ParseError> {
        let mut lhs = self.send()?;
        loop {
            let op = match &self.current().kind {
                TokenKind::Operator(op) if precedence(op) >= min_precedence => op.clone(),
                _ => break,
            };
            self.advance();
            let rhs = self.binary(precedence(&op) + 1)?;
            lhs = Expression::message(Some(lhs), op, Some(rhs));
        }
        Ok(lhs)
    }

    /// send := primary (message_name static_arg? arg?)*
    fn send(&mut self) -> Result<Expression, ParseError> {
        let mut receiver = self.primary()?;
        while let Some(signature) = self.message_name() {
            self.advance();
            let (static_value, value) = self.arguments()?;
            receiver = Expression::Message(Message {
                receiver: Some(Box::new(receiver)),
                signature,
                static_value,
                value,
            });
        }
        Ok(receiver)
    }

    /// message_name := NAME | 'class'
    ///
    /// After a receiver, `class` is the reflection message rather than a declaration.
    fn message_name(&self) -> Option<String> {
        match &self.current().kind {
            TokenKind::Name(name) => Some(name.clone()),
            TokenKind::Class => Some(String::from("class")),
            _ => None,
        }
    }

    /// Parses the optional `[static]` and `(value)` arguments of a send.
    #[allow(clippy::type_complexity)]
    fn arguments(
        &mut self,
    ) -> Result<(Option<Box<Expression>>, Option<Box<Expression>>), ParseError> {
        let static_value = if self.check(&TokenKind::LeftBracket) {
            Some(Box::new(self.grouped(&TokenKind::LeftBracket, &TokenKind::RightBracket)?))
        } else {
            None
        };
        let value = if self.check(&TokenKind::LeftParen) {
            Some(Box::new(self.grouped(&TokenKind::LeftParen, &TokenKind::RightParen)?))
        } else {
            None
        };
        Ok((static_value, value))
    }

    /// grouped := open (expression (',' expression)*)? close
    ///
    /// Nothing between the delimiters is `nothing`, one expression is itself, more make a tuple.
    fn grouped(&mut self, open: &TokenKind, close: &TokenKind) -> Result<Expression, ParseError> {
        self.consume(open, "Expected an opening delimiter")?;
        if self.eat(close) {
            return Ok(Expression::Nothing);
        }
        let mut fields = vec![self.expression()?];
        while self.eat(&TokenKind::Comma) {
            fields.push(self.expression()?);
        }
        self.consume(close, "Expected a closing delimiter")?;
        if fields.len() == 1 {
            Ok(fields.remove(0))
        } else {
            Ok(Expression::tuple(fields))
        }
    }

    fn primary(&mut self) -> Result<Expression, ParseError> {
        let expr = match &self.current().kind {
            TokenKind::Bool(value) => Expression::Literal(Literal::Bool(*value)),
            TokenKind::Int(value) => Expression::Literal(Literal::Integer(*value)),
            TokenKind::BigInt(value) => Expression::Literal(Literal::BigInteger(value.clone())),
            TokenKind::Double(value) => Expression::Literal(Literal::Double(*value)),
            TokenKind::String(value) => Expression::Literal(Literal::String(value.clone())),
            TokenKind::Nothing => Expression::Nothing,
            TokenKind::This => Expression::This,
            TokenKind::Operator(op) if op == "-" => return self.negative_literal(),
            TokenKind::Name(signature) => {
                let signature = signature.clone();
                self.advance();
                let (static_value, value) = self.arguments()?;
                return Ok(Expression::Message(Message {
                    receiver: None,
                    signature,
                    static_value,
                    value,
                }));
            }
            TokenKind::LeftParen => {
                return self.grouped(&TokenKind::LeftParen, &TokenKind::RightParen)
            }
            TokenKind::Fn => {
                self.advance();
                return self.function().map(Expression::Fn);
            }
            TokenKind::If | TokenKind::Let => return self.conditional(),
            _ => return Err(self.error("Expected an expression")),
        };
        self.advance();
        Ok(expr)
    }

    fn negative_literal(&mut self) -> Result<Expression, ParseError> {
        self.advance();
        let literal = match &self.current().kind {
            TokenKind::Int(value) => Literal::Integer(-*value),
            TokenKind::BigInt(value) => Literal::BigInteger(format!("-{}", value)),
            TokenKind::Double(value) => Literal::Double(-*value),
            _ => return Err(self.error("Expected a number after '-'")),
        };
        self.advance();
        Ok(Expression::Literal(literal))
    }

    /// function := ('[' names ']')? ('(' names ')')? body
    pub fn function(&mut self) -> Result<FnExpr, ParseError> {
        let static_params = if self.eat(&TokenKind::LeftBracket) {
            self.parameter_names(&TokenKind::RightBracket)?
        } else {
            Vec::new()
        };
        let names = if self.eat(&TokenKind::LeftParen) {
            self.parameter_names(&TokenKind::RightParen)?
        } else {
            Vec::new()
        };
        let body = self.body()?;
        Ok(FnExpr {
            params: Parameters {
                static_params,
                names,
            },
            body: Box::new(body),
            is_thunk: false,
        })
    }

    fn parameter_names(&mut self, close: &TokenKind) -> Result<Vec<String>, ParseError> {
        let mut names = Vec::new();
        if self.eat(close) {
            return Ok(names);
        }
        loop {
            let name = match &self.current().kind {
                TokenKind::Name(name) | TokenKind::TypeParam(name) => name.clone(),
                _ => return Err(self.error("Expected a parameter name")),
            };
            self.advance();
            names.push(name);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.consume(close, "Expected a closing delimiter after the parameters")?;
        Ok(names)
    }

    /// body := LINE (expression LINE)* 'end' | expression
    pub fn body(&mut self) -> Result<Expression, ParseError> {
        if !self.eat(&TokenKind::Line) {
            return self.expression();
        }
        let mut exprs = Vec::new();
        loop {
            self.skip_lines();
            if self.eat(&TokenKind::End) {
                break;
            }
            exprs.push(self.expression()?);
            if !self.check(&TokenKind::End) {
                self.consume(&TokenKind::Line, "Expected a line break after an expression")?;
            }
        }
        Ok(Expression::Block(Block { exprs }))
    }
}
