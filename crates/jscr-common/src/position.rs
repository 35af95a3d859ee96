use serde::Serialize;

/// A location in a source file: 1-based line, 0-based column.
///
/// Both fields count characters, not bytes; a newline resets `col` to zero
/// and increments `line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// The position at the start of a file.
    pub fn start() -> Self {
        Self { line: 1, col: 0 }
    }

    /// Advance past a single character, handling the newline reset.
    pub fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self { line: self.line + 1, col: 0 }
        } else {
            Self { line: self.line, col: self.col + 1 }
        }
    }
}

/// A span between two [`Position`]s, attached to every token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub begin: Position,
    pub end: Position,
}

impl Range {
    pub fn new(begin: Position, end: Position) -> Self {
        Self { begin, end }
    }

    /// The range of a lexeme of `len` characters starting at `begin`, all on
    /// one line (true for every token JScr lexes: newlines never appear
    /// inside a lexeme).
    pub fn of_lexeme(begin: Position, len: usize) -> Self {
        Self {
            begin,
            end: Position::new(begin.line, begin.col + len as u32),
        }
    }
}
