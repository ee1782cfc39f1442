//! Statement and expression parsing.
//!
//! Expressions are parsed strictly left to right with no precedence
//! table: every new binary node is followed by a one-step local
//! rotation ([`enforce_order_of_operation`]) that restores the order
//! of operations. Parenthesized nodes are exempt from rotation, which
//! is how explicit grouping overrides natural precedence.

mod cursor;
mod parse_error;
#[cfg(test)]
mod parser_tests;

use crate::ast::*;
use crate::lexer::{Keyword, Operator, Separator, SpannedToken, Token};
use crate::position::Position;
pub use cursor::Cursor;
pub use parse_error::{ParseError, Result};

pub fn parse(tokens: &[SpannedToken]) -> Result<Ast> {
    let mut cursor = Cursor::new(tokens);
    let mut statements = Ast::new();
    while !cursor.at_end() {
        statements.push(parse_statement(&mut cursor)?);
    }
    Ok(statements)
}

fn parse_statement(cursor: &mut Cursor) -> Result<AstStatement> {
    let token = cursor.next_or_error()?;
    match token.get_inner() {
        Token::Keyword(Keyword::Let) => parse_declaration(cursor),
        Token::Keyword(Keyword::Return) => parse_return(cursor),
        Token::Identifier(name) => {
            let dst = name.clone();
            let pos = token.get_pos().clone();
            parse_assignment(cursor, dst, pos)
        }
        _ => Err(unexpected(token)),
    }
}

fn parse_declaration(cursor: &mut Cursor) -> Result<AstStatement> {
    let (name, pos) = expect_identifier(cursor)?;
    expect_operator(cursor, Operator::Assign, "=")?;
    let init = parse_expression(cursor)?;
    Ok(AstStatement::Declaration(AstDeclaration { name, pos, init }))
}

fn parse_assignment(cursor: &mut Cursor, dst: Identifier, pos: Position) -> Result<AstStatement> {
    expect_operator(cursor, Operator::Assign, "=")?;
    let src = parse_expression(cursor)?;
    Ok(AstStatement::Assignment(AstAssignment { dst, pos, src }))
}

fn parse_return(cursor: &mut Cursor) -> Result<AstStatement> {
    parse_expression(cursor).map(AstStatement::Return)
}

/// Parses one expression terminated by `;`.
pub fn parse_expression(cursor: &mut Cursor) -> Result<AstExp> {
    parse_expression_until(cursor, Separator::Semicolon)
}

fn parse_expression_until(cursor: &mut Cursor, closing: Separator) -> Result<AstExp> {
    let mut root = parse_operand(cursor)?;

    loop {
        let token = cursor.next_or_error()?;
        match token.get_inner() {
            Token::Separator(s) if *s == closing => break,
            Token::Operator(_) => {
                let op = AstBinaryOp::try_from(token)?;
                let rhs = parse_operand(cursor)?;
                root = AstExp::Binary(enforce_order_of_operation(BinaryExp::new(root, op, rhs)));
            }
            _ => {
                return Err(ParseError::ExpectedToken(
                    separator_lexeme(closing),
                    token.raw().to_owned(),
                    token.get_pos().clone(),
                ))
            }
        }
    }
    Ok(root)
}

fn parse_operand(cursor: &mut Cursor) -> Result<AstExp> {
    let token = cursor.next_or_error()?;
    match token.get_inner() {
        Token::Literal(value) => Ok(AstExp::Constant(*value)),
        Token::Identifier(name) => Ok(AstExp::Var(name.clone(), token.get_pos().clone())),
        Token::Operator(Operator::Hyphen) => parse_unary(cursor),
        Token::Separator(Separator::OpenParanth) => {
            let exp = parse_expression_until(cursor, Separator::CloseParanth)?;
            Ok(match exp {
                AstExp::Binary(binary) => AstExp::Binary(binary.parenthesize()),
                other => other,
            })
        }
        _ => Err(unexpected(token)),
    }
}

fn parse_unary(cursor: &mut Cursor) -> Result<AstExp> {
    let operand = parse_operand(cursor)?;
    // Unary minus applied directly to a literal folds into a negative
    // literal instead of building an operation node.
    Ok(match operand {
        AstExp::Constant(value) => AstExp::Constant(value.wrapping_neg()),
        other => AstExp::Unary(AstUnaryOp::Negate, Box::new(other)),
    })
}

/// One-step local rotation.
///
/// `root` was just built from the running left-hand result and a fresh
/// operand, so at most one of its children can violate the order of
/// operations, and that child is at most one level deep. If a child is
/// a binary node of strictly lower order (and not parenthesized), the
/// child becomes the new root and `root` moves under it. Ownership of
/// the subtrees moves through the rotation; nothing is cloned.
fn enforce_order_of_operation(mut root: BinaryExp) -> BinaryExp {
    if matches!(&*root.lhs, AstExp::Binary(child) if root.is_lower_order(child)) {
        let AstExp::Binary(mut new_root) = *root.lhs else {
            unreachable!()
        };
        root.lhs = new_root.rhs;
        new_root.rhs = Box::new(AstExp::Binary(root));
        return new_root;
    }
    if matches!(&*root.rhs, AstExp::Binary(child) if root.is_lower_order(child)) {
        let AstExp::Binary(mut new_root) = *root.rhs else {
            unreachable!()
        };
        root.rhs = new_root.lhs;
        new_root.lhs = Box::new(AstExp::Binary(root));
        return new_root;
    }
    root
}

impl TryFrom<&SpannedToken> for AstBinaryOp {
    type Error = ParseError;
    fn try_from(token: &SpannedToken) -> std::result::Result<Self, ParseError> {
        match token.get_inner() {
            Token::Operator(Operator::Plus) => Ok(AstBinaryOp::Add),
            Token::Operator(Operator::Hyphen) => Ok(AstBinaryOp::Substract),
            Token::Operator(Operator::Asterisk) => Ok(AstBinaryOp::Multiply),
            Token::Operator(Operator::FSlash) => Ok(AstBinaryOp::Divide),
            _ => Err(unexpected(token)),
        }
    }
}

fn expect_identifier(cursor: &mut Cursor) -> Result<(Identifier, Position)> {
    let token = cursor.next_or_error()?;
    if let Token::Identifier(name) = token.get_inner() {
        Ok((name.clone(), token.get_pos().clone()))
    } else {
        Err(ParseError::ExpectedToken(
            "identifier",
            token.raw().to_owned(),
            token.get_pos().clone(),
        ))
    }
}

fn expect_operator(cursor: &mut Cursor, operator: Operator, lexeme: &'static str) -> Result<()> {
    let token = cursor.next_or_error()?;
    match token.get_inner() {
        Token::Operator(inner) if *inner == operator => Ok(()),
        _ => Err(ParseError::ExpectedToken(
            lexeme,
            token.raw().to_owned(),
            token.get_pos().clone(),
        )),
    }
}

fn unexpected(token: &SpannedToken) -> ParseError {
    ParseError::UnexpectedToken(token.raw().to_owned(), token.get_pos().clone())
}

fn separator_lexeme(separator: Separator) -> &'static str {
    match separator {
        Separator::OpenParanth => "(",
        Separator::CloseParanth => ")",
        Separator::Semicolon => ";",
    }
}
