use crate::position::{underline, Position};
use std::{error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    UnknownCharacter(Position),
    BadConstant(String, Position),
}

impl LexError {
    pub fn get_pos(&self) -> &Position {
        match self {
            Self::UnknownCharacter(pos) | Self::BadConstant(_, pos) => pos,
        }
    }
}

impl error::Error for LexError {}
impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnknownCharacter(pos) => {
                let unknown = pos.lexeme();
                write!(f, "{}", underline(pos, &format!("Unknown character \"{unknown}\"")))
            }
            Self::BadConstant(raw, pos) => {
                write!(f, "{}", underline(pos, &format!("Bad constant \"{raw}\"")))
            }
        }
    }
}
