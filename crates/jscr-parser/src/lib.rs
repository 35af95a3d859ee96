//! Recursive-descent parser and AST for the JScr language.

pub mod ast;
mod cursor;
mod parser;

use std::fmt;

pub use ast::{Node, Program};
pub use parser::Parser;

use jscr_common::{LexError, Range, SyntaxError, Token};

/// Unifies a lex failure and a parse failure for callers that just want to
/// turn source text into a [`Program`] in one call.
#[derive(Debug)]
pub enum FrontendError {
    Lex(LexError),
    Syntax(SyntaxError),
}

impl fmt::Display for FrontendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(e) => write!(f, "{e}"),
            Self::Syntax(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for FrontendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Lex(e) => Some(e),
            Self::Syntax(e) => Some(e),
        }
    }
}

impl From<LexError> for FrontendError {
    fn from(e: LexError) -> Self {
        Self::Lex(e)
    }
}

impl From<SyntaxError> for FrontendError {
    fn from(e: SyntaxError) -> Self {
        Self::Syntax(e)
    }
}

/// Parse an already-tokenized stream into a [`Program`].
pub fn parse_tokens(file_path: impl Into<String>, tokens: &[(Token, Range)]) -> Result<Program, SyntaxError> {
    let file_path = file_path.into();
    Parser::new(file_path.clone(), tokens).parse_program(file_path)
}

/// Tokenize and parse source text already held in memory. `path_label` is
/// carried into any error purely for diagnostics.
pub fn parse_str(path_label: &str, source: &str) -> Result<Program, FrontendError> {
    let tokens = jscr_lexer::tokenize_str(path_label, source)?;
    Ok(parse_tokens(path_label, &tokens)?)
}

/// Tokenize and parse a file from disk.
pub fn parse_file(path: &str) -> Result<Program, FrontendError> {
    let tokens = jscr_lexer::tokenize_file(path)?;
    Ok(parse_tokens(path, &tokens)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_str_reports_lex_errors() {
        let err = parse_str("t.jscr", "int x = 5 $ 3;").unwrap_err();
        assert!(matches!(err, FrontendError::Lex(_)));
    }

    #[test]
    fn parse_str_reports_syntax_errors() {
        let err = parse_str("t.jscr", "int x = ;").unwrap_err();
        assert!(matches!(err, FrontendError::Syntax(_)));
    }

    #[test]
    fn parse_str_succeeds_on_well_formed_input() {
        let program = parse_str("t.jscr", "int x = 1;").unwrap();
        assert_eq!(program.body.len(), 1);
    }
}
