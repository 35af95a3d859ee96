//! The recursive-descent parser.
//!
//! Production names and structure follow the reference frontend's parser
//! method-by-method: a [`Parser`] owns a [`TokenCursor`] plus a single
//! mutable "outline depth" counter that tracks nesting inside grouped
//! constructs (argument lists, parenthesized headers, object/enum bodies,
//! lambda parameter lists, assignment right-hand sides, index brackets).
//! That depth gates two things: whether a statement-level expression
//! requires a trailing `;`, and the identifier-vs-declaration heuristic used
//! to dispatch a leading `IDENTIFIER` token.
//!
//! There is no error recovery: the first [`SyntaxError`] abandons the parse.

mod control;
mod declarations;
mod expressions;
mod types;

use jscr_common::{SyntaxError, Token, TokenKind};

use crate::ast::{Node, Program};
use crate::cursor::TokenCursor;

pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    outline_depth: u32,
}

/// Decrements the parser's outline depth when dropped, however the enclosing
/// production returns (including via `?`). Constructed by [`Parser::enter_outline`].
#[must_use]
struct OutlineGuard<'p, 'a> {
    parser: &'p mut Parser<'a>,
}

impl Drop for OutlineGuard<'_, '_> {
    fn drop(&mut self) {
        self.parser.outline_depth -= 1;
    }
}

impl<'a> Parser<'a> {
    pub fn new(file_path: impl Into<String>, tokens: &'a [(Token, jscr_common::Range)]) -> Self {
        Self { cursor: TokenCursor::new(file_path, tokens), outline_depth: 0 }
    }

    /// Enter a grouped construct: bumps the outline depth now, and drops it
    /// back down when the returned guard goes out of scope.
    fn enter_outline(&mut self) -> OutlineGuard<'_, 'a> {
        self.outline_depth += 1;
        OutlineGuard { parser: self }
    }

    fn at_top_level(&self) -> bool {
        self.outline_depth == 0
    }

    pub fn parse_program(mut self, file_path: impl Into<String>) -> Result<Program, SyntaxError> {
        let mut body = Vec::new();
        while self.cursor.not_eof() {
            body.push(self.parse_stmt()?);
        }
        Ok(Program { file_path: file_path.into(), body })
    }

    /// Parses one statement. Dispatches on the leading token; a leading
    /// `IDENTIFIER` is ambiguous between "start of a typed declaration" and
    /// "start of an expression statement" and is disambiguated by checking
    /// whether it is followed by `const`/`export`/another identifier (the
    /// shape of a declaration's type-then-name or flag) while not nested
    /// inside a grouped construct — the same heuristic the reference parser
    /// uses, because unlike `const`/`export`/`TYPE`, a bare identifier used
    /// as a type name looks exactly like one used as a value.
    fn parse_stmt(&mut self) -> Result<Node, SyntaxError> {
        match self.cursor.peek(0).kind {
            TokenKind::Import => self.parse_import(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Delete => self.parse_delete(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Export
            | TokenKind::Const
            | TokenKind::AnnotationObject
            | TokenKind::Object
            | TokenKind::Enum
            | TokenKind::At
            | TokenKind::Type
            | TokenKind::Function => self.parse_type_post(),
            TokenKind::Identifier if self.starts_declaration() => self.parse_type_post(),
            _ => self.parse_assignment(),
        }
    }

    /// True when a leading `IDENTIFIER` is being used as a declaration's type
    /// (it is followed by `const`/`export`/another identifier, the
    /// variable/function name or a flag preceding it) and the parser isn't
    /// currently inside a grouped construct, where a bare identifier
    /// statement can't occur at all.
    fn starts_declaration(&self) -> bool {
        self.at_top_level()
            && matches!(self.cursor.peek(1).kind, TokenKind::Const | TokenKind::Export | TokenKind::Identifier)
    }

    fn parse_block(&mut self) -> Result<Vec<Node>, SyntaxError> {
        self.cursor.expect(TokenKind::OpenBrace, "expected '{'")?;
        let mut body = Vec::new();
        while self.cursor.not_eof() && self.cursor.peek(0).kind != TokenKind::CloseBrace {
            body.push(self.parse_stmt()?);
        }
        self.cursor.expect(TokenKind::CloseBrace, "expected '}'")?;
        Ok(body)
    }

    /// `{ stmt* }` or a single statement, for `if`/`while`/`for` bodies.
    fn parse_block_or_single(&mut self) -> Result<Vec<Node>, SyntaxError> {
        if self.cursor.peek(0).kind == TokenKind::OpenBrace {
            self.parse_block()
        } else {
            Ok(vec![self.parse_stmt()?])
        }
    }
}
