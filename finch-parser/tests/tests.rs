use pretty_assertions::assert_eq;

use finch_core::ast::*;
use finch_core::span::Position;
use finch_lexer::{Lexer, Token};
use finch_parser::{parse_expression, parse_source};

fn parse(source: &str) -> Expression {
    let tokens: Vec<Token> = Lexer::new(source).collect();
    parse_expression(tokens.as_slice()).expect("could not parse expression")
}

fn name(name: &str) -> Expression {
    Expression::message(None, name, None)
}

fn truthy(expr: Expression) -> Expression {
    Expression::message(Some(expr), "true?", None)
}

fn int(value: i64) -> Expression {
    Expression::Literal(Literal::Integer(value))
}

#[test]
fn single_if_lowering_test() {
    assert_eq!(
        parse("if a then 1 else 2"),
        Expression::message(
            None,
            "__if",
            Some(Expression::tuple(vec![
                truthy(name("a")),
                Expression::thunk(int(1)),
                Expression::thunk(int(2)),
            ])),
        ),
    );
}

#[test]
fn single_if_closed_by_end_test() {
    assert_eq!(parse("if a then 1 else 2 end"), parse("if a then 1 else 2"));
    assert_eq!(
        parse("if a then 1 end"),
        Expression::message(
            None,
            "__if",
            Some(Expression::tuple(vec![
                truthy(name("a")),
                Expression::thunk(int(1)),
                Expression::thunk(Expression::Nothing),
            ])),
        ),
    );
}

#[test]
fn let_chain_test() {
    assert_eq!(
        parse("let a = f let b = g(a) if b then a + b"),
        Expression::If(IfExpr {
            conditions: vec![
                Condition::Let {
                    name: String::from("a"),
                    body: name("f"),
                },
                Condition::Let {
                    name: String::from("b"),
                    body: Expression::message(None, "g", Some(name("a"))),
                },
                Condition::If(truthy(name("b"))),
            ],
            then_expr: Box::new(Expression::message(Some(name("a")), "+", Some(name("b")))),
            else_expr: Box::new(Expression::Nothing),
        }),
    );
}

#[test]
fn two_plain_guards_keep_the_chain_test() {
    let expr = parse("if a if b then 1");

    match expr {
        Expression::If(IfExpr { conditions, .. }) => {
            assert_eq!(
                conditions,
                vec![
                    Condition::If(truthy(name("a"))),
                    Condition::If(truthy(name("b"))),
                ]
            );
        }
        expr => panic!("expected a conditional chain, got {:?}", expr),
    }
}

#[test]
fn multi_line_chain_test() {
    let source = "let value = lookup(key)\nif value > 0\nthen\n    value print\n    value\nelse\n    \"none\" print\nend";

    assert_eq!(
        parse(source),
        Expression::If(IfExpr {
            conditions: vec![
                Condition::Let {
                    name: String::from("value"),
                    body: Expression::message(None, "lookup", Some(name("key"))),
                },
                Condition::If(truthy(Expression::message(
                    Some(name("value")),
                    ">",
                    Some(int(0)),
                ))),
            ],
            then_expr: Box::new(Expression::Block(Block {
                exprs: vec![
                    Expression::message(Some(name("value")), "print", None),
                    name("value"),
                ],
            })),
            else_expr: Box::new(Expression::Block(Block {
                exprs: vec![Expression::message(
                    Some(Expression::Literal(Literal::String(String::from("none")))),
                    "print",
                    None,
                )],
            })),
        }),
    );
}

#[test]
fn then_block_closed_by_end_test() {
    let block = parse_source("let b = f then\n    use(b)\nend\nb").expect("could not parse program");

    assert_eq!(block.exprs.len(), 2);
    assert_eq!(
        block.exprs[0],
        Expression::If(IfExpr {
            conditions: vec![Condition::Let {
                name: String::from("b"),
                body: name("f"),
            }],
            then_expr: Box::new(Expression::Block(Block {
                exprs: vec![Expression::message(None, "use", Some(name("b")))],
            })),
            else_expr: Box::new(Expression::Nothing),
        }),
    );
}

#[test]
fn else_after_end_is_an_error_test() {
    let err = parse_source("if a then\n    1\nend\nelse 2").unwrap_err();

    assert_eq!(err.position, Position::new(4, 1));
    assert!(err.message.starts_with("Cannot have an 'else' after a 'then' block closed by 'end'"));

    let err = parse_source("if a then\n    1\nend else 2").unwrap_err();
    assert_eq!(err.position, Position::new(3, 5));
}

#[test]
fn missing_then_is_an_error_test() {
    let err = parse_source("if a 1").unwrap_err();

    assert_eq!(err.position, Position::new(1, 6));
    assert!(err.message.starts_with("Expected 'then' after the conditions"));
}

#[test]
fn malformed_let_target_test() {
    let err = parse_source("let 3 = f then 1").unwrap_err();

    assert_eq!(err.position, Position::new(1, 5));
    assert_eq!(
        err.to_string(),
        "[line 1, column 5] Expected a name to bind after 'let', found integer 3"
    );
}

#[test]
fn operator_precedence_test() {
    assert_eq!(
        parse("1 + 2 * 3 < 10 and ready"),
        Expression::And(
            Box::new(Expression::message(
                Some(Expression::message(
                    Some(int(1)),
                    "+",
                    Some(Expression::message(Some(int(2)), "*", Some(int(3)))),
                )),
                "<",
                Some(int(10)),
            )),
            Box::new(name("ready")),
        ),
    );
}

#[test]
fn left_associativity_test() {
    assert_eq!(
        parse("10 - 4 - 3"),
        Expression::message(
            Some(Expression::message(Some(int(10)), "-", Some(int(4)))),
            "-",
            Some(int(3)),
        ),
    );
}

#[test]
fn grouping_and_tuples_test() {
    assert_eq!(parse("()"), Expression::Nothing);
    assert_eq!(parse("(a)"), name("a"));
    assert_eq!(
        parse("(1, \"two\", -3)"),
        Expression::tuple(vec![
            int(1),
            Expression::Literal(Literal::String(String::from("two"))),
            int(-3),
        ]),
    );
}

#[test]
fn message_sends_test() {
    assert_eq!(
        parse("list of[Int](1, 2) count"),
        Expression::message(
            Some(Expression::Message(Message {
                receiver: Some(Box::new(name("list"))),
                signature: String::from("of"),
                static_value: Some(Box::new(name("Int"))),
                value: Some(Box::new(Expression::tuple(vec![int(1), int(2)]))),
            })),
            "count",
            None,
        ),
    );
}

#[test]
fn function_parameters_test() {
    assert_eq!(
        parse("fn[T](a, b) a"),
        Expression::Fn(FnExpr {
            params: Parameters {
                static_params: vec![String::from("T")],
                names: vec![String::from("a"), String::from("b")],
            },
            body: Box::new(name("a")),
            is_thunk: false,
        }),
    );
}

#[test]
fn assignment_test() {
    assert_eq!(
        parse("point x = 3"),
        Expression::Assignment(Assignment {
            receiver: Some(Box::new(name("point"))),
            name: String::from("x"),
            value: Box::new(int(3)),
        }),
    );

    let tokens: Vec<Token> = Lexer::new("f(1) = 3").collect();
    assert!(parse_expression(tokens.as_slice()).is_err());
}

#[test]
fn class_definition_test() {
    let source = "class Counter\n    var total = 0\n    def add(n) total = total + n\n    shared def zero() Counter new\nend";

    assert_eq!(
        parse(source),
        Expression::Class(ClassDef {
            name: String::from("Counter"),
            members: vec![
                ClassMember::Field {
                    name: String::from("total"),
                    initializer: int(0),
                },
                ClassMember::Method {
                    name: String::from("add"),
                    function: FnExpr {
                        params: Parameters {
                            static_params: Vec::new(),
                            names: vec![String::from("n")],
                        },
                        body: Box::new(Expression::Assignment(Assignment {
                            receiver: None,
                            name: String::from("total"),
                            value: Box::new(Expression::message(
                                Some(name("total")),
                                "+",
                                Some(name("n")),
                            )),
                        })),
                        is_thunk: false,
                    },
                    shared: false,
                },
                ClassMember::Method {
                    name: String::from("zero"),
                    function: FnExpr {
                        params: Parameters::default(),
                        body: Box::new(Expression::message(Some(name("Counter")), "new", None)),
                        is_thunk: false,
                    },
                    shared: true,
                },
            ],
        }),
    );
}

#[test]
fn early_return_test() {
    assert_eq!(
        parse("fn(x) return x"),
        Expression::Fn(FnExpr {
            params: Parameters {
                static_params: Vec::new(),
                names: vec![String::from("x")],
            },
            body: Box::new(Expression::Return(Box::new(name("x")))),
            is_thunk: false,
        }),
    );
}

#[test]
fn reserved_keywords_test() {
    let err = parse_source("while a then b").unwrap_err();

    assert_eq!(err.position, Position::new(1, 1));
    assert!(err.message.starts_with("Unsupported construct"));
}

#[test]
fn class_message_test() {
    assert_eq!(
        parse("point class name"),
        Expression::message(
            Some(Expression::message(Some(name("point")), "class", None)),
            "name",
            None,
        ),
    );

    assert_eq!(
        parse("def class() Int"),
        Expression::Define(
            String::from("class"),
            Box::new(Expression::Fn(FnExpr {
                params: Parameters::default(),
                body: Box::new(name("Int")),
                is_thunk: false,
            })),
        ),
    );
}
