//! Regex-driven lexical scanner.
//!
//! Each source line is scanned left to right; at every offset the
//! token class patterns are tried in a fixed order and the first match
//! wins. Keywords carry a word boundary so `letter` is an identifier,
//! not `let` followed by `ter`.

mod lexer_error;
mod token;

pub use lexer_error::LexError;
pub use token::{Keyword, Operator, Separator, SpannedToken, Token};

use crate::position::Position;
use lazy_static::lazy_static;
use regex::{Match, Regex};

pub type Tokens = Vec<SpannedToken>;

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"^\s+").expect("hardcoded pattern");
    static ref OPERATOR: Regex = Regex::new(r"^[+\-*/=]").expect("hardcoded pattern");
    static ref SEPARATOR: Regex = Regex::new(r"^[();]").expect("hardcoded pattern");
    static ref KEYWORD: Regex = Regex::new(r"^(?:let|return)\b").expect("hardcoded pattern");
    static ref LITERAL: Regex = Regex::new(r"^[0-9]+").expect("hardcoded pattern");
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").expect("hardcoded pattern");
}

pub fn lex(source: &str) -> Result<Tokens, LexError> {
    let mut tokens = Tokens::new();
    for (index, line) in source.split('\n').enumerate() {
        let line_number = index as u64 + 1;
        lex_line(line, line_number, &mut tokens)?;
    }
    Ok(tokens)
}

fn lex_line(line: &str, line_number: u64, tokens: &mut Tokens) -> Result<(), LexError> {
    let mut offset = 0;
    while offset < line.len() {
        if let Some(ws) = WHITESPACE.find(&line[offset..]) {
            offset += ws.end();
            continue;
        }
        let token = token_at(line, line_number, offset)?;
        offset = token.get_pos().end;
        tokens.push(token);
    }
    Ok(())
}

fn token_at(line: &str, line_number: u64, offset: usize) -> Result<SpannedToken, LexError> {
    let rest = &line[offset..];
    let position = |m: &Match| Position::new(line, line_number, offset, offset + m.end());

    if let Some(m) = OPERATOR.find(rest) {
        let c = m.as_str().chars().next().expect("single-char match");
        let token = Token::Operator(Operator::from(c));
        return Ok(SpannedToken::new(token, m.as_str().to_owned(), position(&m)));
    }
    if let Some(m) = SEPARATOR.find(rest) {
        let c = m.as_str().chars().next().expect("single-char match");
        let token = Token::Separator(Separator::from(c));
        return Ok(SpannedToken::new(token, m.as_str().to_owned(), position(&m)));
    }
    if let Some(m) = KEYWORD.find(rest) {
        let token = Token::Keyword(Keyword::from(m.as_str()));
        return Ok(SpannedToken::new(token, m.as_str().to_owned(), position(&m)));
    }
    if let Some(m) = LITERAL.find(rest) {
        let pos = position(&m);
        let value = m
            .as_str()
            .parse()
            .map_err(|_| LexError::BadConstant(m.as_str().to_owned(), pos.clone()))?;
        return Ok(SpannedToken::new(Token::Literal(value), m.as_str().to_owned(), pos));
    }
    if let Some(m) = IDENTIFIER.find(rest) {
        let token = Token::Identifier(m.as_str().to_owned());
        return Ok(SpannedToken::new(token, m.as_str().to_owned(), position(&m)));
    }

    let width = rest.chars().next().map_or(0, char::len_utf8);
    Err(LexError::UnknownCharacter(Position::new(
        line,
        line_number,
        offset,
        offset + width,
    )))
}
