use std::fmt;

use finch_core::span::Position;

/// Represents the kind of a token from the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// An opening parenthesis (`(`).
    LeftParen,
    /// A closing parenthesis (`)`).
    RightParen,
    /// An opening square-bracket (`[`).
    LeftBracket,
    /// A closing square-bracket (`]`).
    RightBracket,
    /// An opening curly-brace (`{`).
    LeftBrace,
    /// A closing curly-brace (`}`).
    RightBrace,
    /// A backtick (`` ` ``).
    Backtick,
    /// A comma (`,`).
    Comma,
    /// A period (`.`).
    Dot,
    /// A lone equal sign, the assignment marker (`=`).
    Equals,

    /// An identifier, possibly ending with a question mark (`foo`, `true?`).
    Name(String),
    /// A record field label (`x:`).
    Field(String),
    /// A sequence of operator characters (eg: `+`, `<=`).
    Operator(String),
    /// A type parameter in a pattern (`'T`).
    TypeParam(String),

    /// A boolean literal (`true`).
    Bool(bool),
    /// An integer literal (`10`).
    Int(i64),
    /// An integer literal too big for 64 bits (`1542252643255252434543`).
    BigInt(String),
    /// A floating-point literal (`10.6`).
    Double(f64),
    /// A string literal (`"hello, world"`).
    String(String),

    And,
    Case,
    Catch,
    Class,
    Def,
    Else,
    End,
    Fn,
    For,
    If,
    Let,
    Match,
    Nothing,
    Or,
    Return,
    Shared,
    Then,
    This,
    Var,
    While,
    With,

    /// A significant line break.
    Line,
    /// The end of the input.
    Eof,

    /// Some input the lexer could not make sense of.
    Error(String),
}

impl TokenKind {
    /// Get the keyword corresponding to an identifier, if any.
    pub fn keyword(ident: &str) -> Option<TokenKind> {
        let kind = match ident {
            "and" => TokenKind::And,
            "case" => TokenKind::Case,
            "catch" => TokenKind::Catch,
            "class" => TokenKind::Class,
            "def" => TokenKind::Def,
            "else" => TokenKind::Else,
            "end" => TokenKind::End,
            "false" => TokenKind::Bool(false),
            "fn" => TokenKind::Fn,
            "for" => TokenKind::For,
            "if" => TokenKind::If,
            "let" => TokenKind::Let,
            "match" => TokenKind::Match,
            "nothing" => TokenKind::Nothing,
            "or" => TokenKind::Or,
            "return" => TokenKind::Return,
            "shared" => TokenKind::Shared,
            "then" => TokenKind::Then,
            "this" => TokenKind::This,
            "true" => TokenKind::Bool(true),
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            "with" => TokenKind::With,
            _ => return None,
        };
        Some(kind)
    }

    /// Whether a line break right after this token is insignificant.
    pub fn continues_line(&self) -> bool {
        matches!(
            self,
            TokenKind::Line
                | TokenKind::Operator(_)
                | TokenKind::Comma
                | TokenKind::Equals
                | TokenKind::LeftParen
                | TokenKind::LeftBracket
                | TokenKind::LeftBrace
                | TokenKind::And
                | TokenKind::Or
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::LeftParen => write!(f, "'('"),
            TokenKind::RightParen => write!(f, "')'"),
            TokenKind::LeftBracket => write!(f, "'['"),
            TokenKind::RightBracket => write!(f, "']'"),
            TokenKind::LeftBrace => write!(f, "'{{'"),
            TokenKind::RightBrace => write!(f, "'}}'"),
            TokenKind::Backtick => write!(f, "'`'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Equals => write!(f, "'='"),
            TokenKind::Name(name) => write!(f, "name '{}'", name),
            TokenKind::Field(name) => write!(f, "field '{}:'", name),
            TokenKind::Operator(op) => write!(f, "operator '{}'", op),
            TokenKind::TypeParam(name) => write!(f, "type parameter ''{}'", name),
            TokenKind::Bool(value) => write!(f, "'{}'", value),
            TokenKind::Int(value) => write!(f, "integer {}", value),
            TokenKind::BigInt(value) => write!(f, "integer {}", value),
            TokenKind::Double(value) => write!(f, "double {}", value),
            TokenKind::String(_) => write!(f, "string literal"),
            TokenKind::Line => write!(f, "line break"),
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Error(message) => write!(f, "{}", message),
            keyword => write!(f, "keyword '{}'", format!("{:?}", keyword).to_lowercase()),
        }
    }
}

/// Represents a token from the lexer, along with where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token it is.
    pub kind: TokenKind,
    /// Where the token starts in the source.
    pub position: Position,
}

impl Token {
    /// Construct a token from its kind and position.
    pub fn new(kind: TokenKind, position: Position) -> Self {
        Self { kind, position }
    }
}
