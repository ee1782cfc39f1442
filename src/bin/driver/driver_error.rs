use rillc::lexer::LexError;
use rillc::parser::ParseError;
use rillc::semantic_analysis::SemAnalysisError;

/// A stage failure carrying its already-rendered caret diagnostic.
/// The driver prints it as `<path>:<diagnostic>` and aborts without
/// producing output artifacts.
pub enum DriverError {
    LexerError(String),
    ParserError(String),
    SemanticError(String),
}

impl std::fmt::Display for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::LexerError(e) | Self::ParserError(e) | Self::SemanticError(e) => {
                write!(f, "{e}")
            }
        }
    }
}

impl std::fmt::Debug for DriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self}")
    }
}

impl std::error::Error for DriverError {}

impl From<LexError> for DriverError {
    fn from(e: LexError) -> Self {
        Self::LexerError(e.to_string())
    }
}

impl From<ParseError> for DriverError {
    fn from(e: ParseError) -> Self {
        Self::ParserError(e.to_string())
    }
}

impl From<SemAnalysisError> for DriverError {
    fn from(e: SemAnalysisError) -> Self {
        Self::SemanticError(e.to_string())
    }
}
