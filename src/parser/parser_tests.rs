use super::*;
use crate::ast::*;
use crate::lexer;
use crate::position::Position;

fn parse_exp(source: &str) -> Result<AstExp> {
    let tokens = lexer::lex(source).expect("should lex");
    let mut cursor = Cursor::new(&tokens);
    parse_expression(&mut cursor)
}

fn parse_source(source: &str) -> Result<Ast> {
    let tokens = lexer::lex(source).expect("should lex");
    parse(&tokens)
}

fn var(name: &str) -> AstExp {
    AstExp::Var(name.into(), Position::synthetic_start())
}

#[test]
fn test_single_operand() {
    assert_eq!(Ok(AstExp::Constant(5)), parse_exp("5;"));
}

#[test]
fn test_simple_operation() {
    let expected = AstExp::binary(AstExp::Constant(5), AstBinaryOp::Multiply, AstExp::Constant(3));
    assert_eq!(Ok(expected), parse_exp("5*3;"));
}

#[test]
fn test_equal_order_is_left_associative() {
    let expected = AstExp::binary(
        AstExp::binary(AstExp::Constant(1337), AstBinaryOp::Add, AstExp::Constant(420)),
        AstBinaryOp::Add,
        AstExp::Constant(42),
    );
    assert_eq!(Ok(expected), parse_exp("1337 + 420 + 42;"));
}

#[test]
fn test_order_rotates_lower_order_up() {
    let expected = AstExp::binary(
        AstExp::Constant(1337),
        AstBinaryOp::Add,
        AstExp::binary(AstExp::Constant(420), AstBinaryOp::Multiply, AstExp::Constant(42)),
    );
    assert_eq!(Ok(expected), parse_exp("1337 + 420 * 42;"));
}

#[test]
fn test_order_keeps_higher_order_left() {
    let expected = AstExp::binary(
        AstExp::binary(AstExp::Constant(1337), AstBinaryOp::Multiply, AstExp::Constant(420)),
        AstBinaryOp::Add,
        AstExp::Constant(42),
    );
    assert_eq!(Ok(expected), parse_exp("1337 * 420 + 42;"));
}

#[test]
fn test_unneeded_parenthesis() {
    let inner = BinaryExp::new(AstExp::Constant(420), AstBinaryOp::Multiply, AstExp::Constant(42));
    let expected = AstExp::binary(
        AstExp::Constant(1337),
        AstBinaryOp::Add,
        AstExp::Binary(inner.parenthesize()),
    );
    assert_eq!(Ok(expected), parse_exp("1337 + (420 * 42);"));
}

#[test]
fn test_parenthesis_overrides_order() {
    let inner = BinaryExp::new(AstExp::Constant(1337), AstBinaryOp::Add, AstExp::Constant(420));
    let expected = AstExp::binary(
        AstExp::Binary(inner.parenthesize()),
        AstBinaryOp::Multiply,
        AstExp::Constant(42),
    );
    assert_eq!(Ok(expected), parse_exp("(1337 + 420) * 42;"));
}

#[test]
fn test_double_parenthesis() {
    let left = BinaryExp::new(AstExp::Constant(1337), AstBinaryOp::Add, AstExp::Constant(420));
    let right = BinaryExp::new(AstExp::Constant(42), AstBinaryOp::Add, AstExp::Constant(1));
    let expected = AstExp::binary(
        AstExp::Binary(left.parenthesize()),
        AstBinaryOp::Multiply,
        AstExp::Binary(right.parenthesize()),
    );
    assert_eq!(Ok(expected), parse_exp("(1337 + 420) * (42 + 1);"));
}

#[test]
fn test_parenthesized_literal() {
    assert_eq!(Ok(AstExp::Constant(5)), parse_exp("(5);"));
}

#[test]
fn test_negative_literal_folds() {
    assert_eq!(Ok(AstExp::Constant(-42)), parse_exp("-42;"));
}

#[test]
fn test_negative_literal_as_operand() {
    let expected = AstExp::binary(AstExp::Constant(7), AstBinaryOp::Add, AstExp::Constant(-3));
    assert_eq!(Ok(expected), parse_exp("7 + -3;"));
}

#[test]
fn test_unary_on_variable() {
    let expected = AstExp::Unary(AstUnaryOp::Negate, Box::new(var("a")));
    assert_eq!(Ok(expected), parse_exp("-a;"));
}

#[test]
fn test_unary_on_parenthesized_expression() {
    let inner = BinaryExp::new(AstExp::Constant(2), AstBinaryOp::Add, AstExp::Constant(1));
    let expected = AstExp::Unary(AstUnaryOp::Negate, Box::new(AstExp::Binary(inner.parenthesize())));
    assert_eq!(Ok(expected), parse_exp("-(2 + 1);"));
}

#[test]
fn test_nested_unary() {
    let inner = BinaryExp::new(AstExp::Constant(2), AstBinaryOp::Substract, AstExp::Constant(5));
    let expected = AstExp::Unary(
        AstUnaryOp::Negate,
        Box::new(AstExp::Unary(
            AstUnaryOp::Negate,
            Box::new(AstExp::Binary(inner.parenthesize())),
        )),
    );
    assert_eq!(Ok(expected), parse_exp("-(-(2 - 5));"));
}

#[test]
fn test_missing_operand() {
    let parsed = parse_exp("5*;");
    assert!(matches!(parsed, Err(ParseError::UnexpectedToken(raw, _)) if raw == ";"));
}

#[test]
fn test_missing_closing_parenthesis() {
    let parsed = parse_exp("(5;");
    assert!(matches!(
        parsed,
        Err(ParseError::ExpectedToken(")", raw, _)) if raw == ";"
    ));
}

#[test]
fn test_unexpected_end_of_input() {
    let parsed = parse_exp("5 +");
    assert!(matches!(parsed, Err(ParseError::UnexpectedEndOfInput(_))));
}

#[test]
fn test_end_of_input_points_past_last_token() {
    let Err(ParseError::UnexpectedEndOfInput(pos)) = parse_exp("5 + 3") else {
        panic!("expected end-of-input error");
    };
    assert_eq!(pos.start, 5);
    assert!(pos.is_empty());
}

#[test]
fn test_empty_input_end_of_input() {
    let parsed = parse_exp("");
    let Err(ParseError::UnexpectedEndOfInput(pos)) = parsed else {
        panic!("expected end-of-input error");
    };
    assert_eq!(pos.line_number, 1);
}

#[test]
fn test_declaration_statement() {
    let expected = vec![AstStatement::Declaration(AstDeclaration {
        name: "a".into(),
        pos: Position::synthetic_start(),
        init: AstExp::Constant(1),
    })];
    assert_eq!(Ok(expected), parse_source("let a = 1;"));
}

#[test]
fn test_assignment_statement() {
    let expected = vec![AstStatement::Assignment(AstAssignment {
        dst: "foo".into(),
        pos: Position::synthetic_start(),
        src: var("bar"),
    })];
    assert_eq!(Ok(expected), parse_source("foo = bar;"));
}

#[test]
fn test_return_statement() {
    let expected = vec![AstStatement::Return(AstExp::binary(
        AstExp::Constant(1337),
        AstBinaryOp::Substract,
        AstExp::Constant(420),
    ))];
    assert_eq!(Ok(expected), parse_source("return 1337 - 420;"));
}

#[test]
fn test_statement_sequence_keeps_order() {
    let parsed = parse_source("let a = 1; a = 2; return a;").expect("should parse");
    assert_eq!(parsed.len(), 3);
    assert!(matches!(parsed[0], AstStatement::Declaration(_)));
    assert!(matches!(parsed[1], AstStatement::Assignment(_)));
    assert!(matches!(parsed[2], AstStatement::Return(_)));
}

#[test]
fn test_declaration_requires_identifier() {
    let parsed = parse_source("let = 1;");
    assert!(matches!(
        parsed,
        Err(ParseError::ExpectedToken("identifier", raw, _)) if raw == "="
    ));
}

#[test]
fn test_assignment_requires_equal_sign() {
    let parsed = parse_source("a 1;");
    assert!(matches!(
        parsed,
        Err(ParseError::ExpectedToken("=", raw, _)) if raw == "1"
    ));
}

#[test]
fn test_statement_cannot_start_with_separator() {
    let parsed = parse_source("(1);");
    assert!(matches!(parsed, Err(ParseError::UnexpectedToken(raw, _)) if raw == "("));
}

#[test]
fn test_assign_in_expression_position() {
    let parsed = parse_exp("1 = 2;");
    assert!(matches!(parsed, Err(ParseError::UnexpectedToken(raw, _)) if raw == "="));
}
