use super::parse_error::{ParseError, Result};
use crate::lexer::SpannedToken;
use crate::position::Position;

#[derive(Debug)]
pub struct Cursor<'a> {
    tokens: &'a [SpannedToken],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a [SpannedToken]) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    pub fn peek(&self) -> Option<&'a SpannedToken> {
        self.tokens.get(self.position)
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn next_or_error(&mut self) -> Result<&'a SpannedToken> {
        let next = self
            .tokens
            .get(self.position)
            .ok_or_else(|| ParseError::UnexpectedEndOfInput(self.end_of_input_position()))?;
        self.position += 1;
        Ok(next)
    }

    /// Where to point when the stream is exhausted: just past the last
    /// token, or a synthetic start if there never was one.
    fn end_of_input_position(&self) -> Position {
        self.tokens
            .last()
            .map_or_else(Position::synthetic_start, |t| t.get_pos().collapse_to_end())
    }
}
