use crate::ast::Identifier;
use crate::position::{underline, Position};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SemAnalysisError {
    UndeclaredVariable(Identifier, Position),
    Redeclaration {
        name: Identifier,
        pos: Position,
        original: Position,
    },
}

impl SemAnalysisError {
    pub fn get_pos(&self) -> &Position {
        match self {
            Self::UndeclaredVariable(_, pos) | Self::Redeclaration { pos, .. } => pos,
        }
    }
}

impl fmt::Display for SemAnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UndeclaredVariable(name, pos) => {
                write!(f, "{}", underline(pos, &format!("Undeclared variable \"{name}\"")))
            }
            Self::Redeclaration {
                name,
                pos,
                original,
            } => {
                let primary = underline(pos, &format!("Redeclaration of \"{name}\""));
                let secondary = underline(original, "Previously declared here");
                write!(f, "{primary}\n{secondary}")
            }
        }
    }
}

impl std::error::Error for SemAnalysisError {}
