use std::result;
use std::fmt::{self, Display};

pub type Result<T> = result::Result<T, Error>;

#[derive(Debug, PartialEq, Clone)]
#[non_exhaustive]
pub enum ErrorKind {
    Lexical { line: usize },
}

#[derive(Debug, PartialEq, Clone)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

impl Error {
    pub fn lexical<S: Into<String>>(line: usize, message: S) -> Error {
        let kind = ErrorKind::Lexical { line };
        Error { kind, message: message.into() }
    }

    pub fn unterminated_string(line: usize) -> Error {
        Error::lexical(line, "Unterminated string.")
    }

    pub fn unexpected_character(line: usize, c: char) -> Error {
        Error::lexical(line, format!("Unexpected character '{}'.", c))
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn line(&self) -> usize {
        match self.kind() {
            ErrorKind::Lexical { line } => *line,
        }
    }

    /// Context printed between `Error` and the message. Lexical errors
    /// have none; the slot is kept for parser errors of the form ` at 'x'`.
    pub fn location(&self) -> &str {
        match self.kind() {
            ErrorKind::Lexical { .. } => "",
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error{}: {}", self.line(), self.location(), self.message)
    }
}
