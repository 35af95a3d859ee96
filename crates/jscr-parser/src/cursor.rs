use jscr_common::{Range, SyntaxError, Token, TokenKind};

/// A read-only cursor over a finished token stream.
///
/// The stream is expected to end in exactly one `Eof` token, which `peek`
/// returns indefinitely once the cursor runs past the end.
pub struct TokenCursor<'a> {
    tokens: &'a [(Token, Range)],
    pos: usize,
    file_path: String,
}

impl<'a> TokenCursor<'a> {
    pub fn new(file_path: impl Into<String>, tokens: &'a [(Token, Range)]) -> Self {
        Self { tokens, pos: 0, file_path: file_path.into() }
    }

    /// The token `offset` slots ahead of the cursor (0 = current). Past the
    /// end of the stream this keeps returning the trailing `Eof` token.
    pub fn peek(&self, offset: usize) -> &Token {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index].0
    }

    /// The range of the current token.
    pub fn peek_range(&self) -> Range {
        let index = self.pos.min(self.tokens.len() - 1);
        self.tokens[index].1
    }

    /// Return the current token and move the cursor forward (stops
    /// advancing once `Eof` is reached).
    pub fn advance(&mut self) -> Token {
        let tok = self.peek(0).clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    /// True while the current token is not `Eof`.
    pub fn not_eof(&self) -> bool {
        self.peek(0).kind != TokenKind::Eof
    }

    /// Consume the current token unconditionally, then — regardless of
    /// whether it matched `kind` — check its kind against the expectation
    /// and raise a [`SyntaxError`] positioned at the token that is now
    /// current (the one *after* the consumed token) if it didn't match.
    ///
    /// This mirrors the reference parser's `Expect`, which always eats
    /// before reporting, so the error position is the token following the
    /// mismatch rather than the mismatch itself.
    pub fn expect(&mut self, kind: TokenKind, msg: &str) -> Result<Token, SyntaxError> {
        let tok = self.advance();
        if tok.kind != kind {
            return Err(SyntaxError::new(self.file_path.clone(), self.peek_range().begin, msg));
        }
        Ok(tok)
    }

    pub fn error(&self, description: impl Into<String>) -> SyntaxError {
        SyntaxError::new(self.file_path.clone(), self.peek_range().begin, description)
    }
}
