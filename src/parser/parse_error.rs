use crate::position::{underline, Position};
use std::fmt::{Display, Formatter};

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token appeared where an expression was required.
    UnexpectedToken(String, Position),
    /// A specific terminal was required and something else was found.
    ExpectedToken(&'static str, String, Position),
    /// The token stream ran out while a rule still expected input.
    UnexpectedEndOfInput(Position),
}

impl ParseError {
    pub fn get_pos(&self) -> &Position {
        match self {
            Self::UnexpectedToken(_, pos)
            | Self::ExpectedToken(_, _, pos)
            | Self::UnexpectedEndOfInput(pos) => pos,
        }
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::UnexpectedToken(raw, pos) => {
                write!(f, "{}", underline(pos, &format!("Expected expression before \"{raw}\"")))
            }
            Self::ExpectedToken(expected, raw, pos) => {
                write!(f, "{}", underline(pos, &format!("Expected {expected} before \"{raw}\"")))
            }
            Self::UnexpectedEndOfInput(pos) => {
                write!(f, "{}", underline(pos, "Unexpected end of input"))
            }
        }
    }
}

impl std::error::Error for ParseError {}
