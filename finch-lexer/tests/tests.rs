use finch_core::span::Position;
use finch_lexer::{Lexer, Token, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source).map(|token| token.kind).collect()
}

#[test]
fn empty_input_test() {
    let mut lexer = Lexer::new("");

    assert_eq!(
        lexer.next(),
        Some(Token::new(TokenKind::Eof, Position::new(1, 1)))
    );
    assert_eq!(lexer.next(), None);
}

#[test]
fn definition_test() {
    assert_eq!(
        kinds("var pi = 3.14"),
        vec![
            TokenKind::Var,
            TokenKind::Name(String::from("pi")),
            TokenKind::Equals,
            TokenKind::Double(3.14),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn names_and_operators_test() {
    assert_eq!(
        kinds("a true? <= b == c"),
        vec![
            TokenKind::Name(String::from("a")),
            TokenKind::Name(String::from("true?")),
            TokenKind::Operator(String::from("<=")),
            TokenKind::Name(String::from("b")),
            TokenKind::Operator(String::from("==")),
            TokenKind::Name(String::from("c")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn field_and_type_param_test() {
    assert_eq!(
        kinds("x: 'T"),
        vec![
            TokenKind::Field(String::from("x")),
            TokenKind::TypeParam(String::from("T")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn keywords_test() {
    assert_eq!(
        kinds("if let then else end nothing this"),
        vec![
            TokenKind::If,
            TokenKind::Let,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::End,
            TokenKind::Nothing,
            TokenKind::This,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn string_literal_test() {
    assert_eq!(
        kinds(r#""some string with \"quotes\"\n""#),
        vec![
            TokenKind::String(String::from("some string with \"quotes\"\n")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn unterminated_string_test() {
    let tokens: Vec<Token> = Lexer::new("\"oops").collect();

    assert_eq!(tokens.len(), 1);
    assert!(matches!(tokens[0].kind, TokenKind::Error(_)));
}

#[test]
fn big_integer_test() {
    assert_eq!(
        kinds("123456789012345678901234567890"),
        vec![
            TokenKind::BigInt(String::from("123456789012345678901234567890")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn line_breaks_test() {
    assert_eq!(
        kinds("\n\na\n\n\nb +\n c // trailing comment\n"),
        vec![
            TokenKind::Name(String::from("a")),
            TokenKind::Line,
            TokenKind::Name(String::from("b")),
            TokenKind::Operator(String::from("+")),
            TokenKind::Name(String::from("c")),
            TokenKind::Line,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn positions_test() {
    let tokens: Vec<Token> = Lexer::new("if a\n  then").collect();

    assert_eq!(tokens[0].position, Position::new(1, 1));
    assert_eq!(tokens[1].position, Position::new(1, 4));
    assert_eq!(tokens[2].position, Position::new(1, 5));
    assert_eq!(tokens[3].position, Position::new(2, 3));
}
