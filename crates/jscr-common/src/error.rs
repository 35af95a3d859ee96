use std::fmt;

use crate::position::Position;

/// A lexer failure: either an unrecognized character, or a failure to read
/// the source file itself.
#[derive(Debug)]
pub enum LexError {
    UnexpectedChar { file_path: String, position: Position, found: char },
    Io { file_path: String, source: std::io::Error },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedChar { file_path, position, found } => write!(
                f,
                "unexpected character {found:?} at \"{file_path}\" [{}:{}]",
                position.line, position.col
            ),
            Self::Io { file_path, source } => {
                write!(f, "failed to read \"{file_path}\": {source}")
            }
        }
    }
}

impl std::error::Error for LexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::UnexpectedChar { .. } => None,
        }
    }
}

/// A parser failure: `expect` mismatches and explicit grammar-invariant
/// violations, fatal to the in-progress parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub file_path: String,
    pub position: Position,
    pub description: String,
    pub error_code: u16,
}

impl SyntaxError {
    pub fn new(file_path: impl Into<String>, position: Position, description: impl Into<String>) -> Self {
        let description = description.into();
        let error_code = checksum(&description);
        Self { file_path: file_path.into(), position, description, error_code }
    }
}

/// Sum of the description's byte values, taken modulo 2^16.
fn checksum(description: &str) -> u16 {
    let mut sum: u16 = 0;
    for b in description.bytes() {
        sum = sum.wrapping_add(b as u16);
    }
    sum
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at: \"{}\" [{}:{}] ({}) \"{}\"",
            self.file_path, self.position.line, self.position.col, self.error_code, self.description
        )
    }
}

impl std::error::Error for SyntaxError {}
