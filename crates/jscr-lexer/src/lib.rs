//! Tokenizer for the JScr language.

mod cursor;

use cursor::Cursor;
use jscr_common::token::keyword_from_str;
use jscr_common::{LexError, Range, Token, TokenKind, Type};

/// Tokenize source text already held in memory. `path_label` is carried into
/// any [`LexError`] purely for diagnostics; it need not name a real file.
pub fn tokenize_str(path_label: &str, source: &str) -> Result<Vec<(Token, Range)>, LexError> {
    Lexer::new(path_label, source).run()
}

/// Read `path` from disk and tokenize its contents.
///
/// Unlike the reference implementation, a failed read is reported as
/// [`LexError::Io`] rather than silently producing an empty token stream.
pub fn tokenize_file(path: &str) -> Result<Vec<(Token, Range)>, LexError> {
    let source = std::fs::read_to_string(path)
        .map_err(|source| LexError::Io { file_path: path.to_string(), source })?;
    tokenize_str(path, &source)
}

struct Lexer<'src> {
    cursor: Cursor<'src>,
    file_path: String,
}

impl<'src> Lexer<'src> {
    fn new(file_path: &str, source: &'src str) -> Self {
        Self { cursor: Cursor::new(source), file_path: file_path.to_string() }
    }

    fn run(mut self) -> Result<Vec<(Token, Range)>, LexError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            if self.skip_comment()? {
                continue;
            }

            let begin = self.cursor.pos();
            let Some(c) = self.cursor.peek() else {
                tokens.push((Token::eof(), Range::new(begin, begin)));
                break;
            };

            let (kind, lexeme) = match c {
                '(' => self.single(TokenKind::OpenParen),
                ')' => self.single(TokenKind::CloseParen),
                '{' => self.single(TokenKind::OpenBrace),
                '}' => self.single(TokenKind::CloseBrace),
                '[' => self.single(TokenKind::OpenBracket),
                ']' => self.single(TokenKind::CloseBracket),
                ';' => self.single(TokenKind::Semicolon),
                ':' => self.single(TokenKind::Colon),
                ',' => self.single(TokenKind::Comma),
                '.' => self.single(TokenKind::Dot),
                '=' => self.single(TokenKind::Equals),
                '<' => self.single(TokenKind::LessThan),
                '>' => self.single(TokenKind::MoreThan),
                '&' => self.single(TokenKind::And),
                '|' => self.single(TokenKind::Or),
                '!' => self.single(TokenKind::Not),

                '@' => self.lex_at(),

                '+' | '-' | '*' | '/' | '%' => self.lex_binary_operator(),

                c if c.is_ascii_digit() => self.lex_number(),

                '"' => self.lex_string()?,
                '\'' => self.lex_char()?,

                c if is_alpha(c) => self.lex_ident_or_keyword(),

                other => {
                    return Err(LexError::UnexpectedChar {
                        file_path: self.file_path.clone(),
                        position: begin,
                        found: other,
                    })
                }
            };

            let range = Range::of_lexeme(begin, lexeme.chars().count());
            tokens.push((Token::new(kind, lexeme), range));
        }
        Ok(tokens)
    }

    fn single(&mut self, kind: TokenKind) -> (TokenKind, String) {
        let c = self.cursor.advance().expect("caller already peeked a character");
        (kind, c.to_string())
    }

    /// `@object` forms one `AnnotationObject` token; any other `@...` text is
    /// a plain `At` token (the literal used for ordinary `@Ident(...)`
    /// annotation usages).
    fn lex_at(&mut self) -> (TokenKind, String) {
        self.cursor.advance(); // '@'
        let mut lookahead = self.cursor.clone();
        let matches_object = "object".chars().all(|expected| lookahead.advance() == Some(expected));
        let followed_by_ident_char = matches!(lookahead.peek(), Some(c) if is_alpha(c) || c.is_ascii_digit());

        if matches_object && !followed_by_ident_char {
            for _ in 0.."object".len() {
                self.cursor.advance();
            }
            (TokenKind::AnnotationObject, "@object".to_string())
        } else {
            (TokenKind::At, "@".to_string())
        }
    }

    fn lex_binary_operator(&mut self) -> (TokenKind, String) {
        let c = self.cursor.advance().expect("caller already peeked a character");
        (TokenKind::BinaryOperator, c.to_string())
    }

    /// Accumulate digits and at most one `.`; a second `.` is left
    /// unconsumed so it becomes its own `DOT` token. A trailing `f`/`F` or
    /// `d`/`D` suffix (consumed, not included in the lexeme) selects
    /// `FLOAT_NUMBER`/`DOUBLE_NUMBER`; a bare `.` without a suffix also
    /// yields `FLOAT_NUMBER`; otherwise `NUMBER`.
    fn lex_number(&mut self) -> (TokenKind, String) {
        let mut lexeme = String::new();
        let mut seen_dot = false;

        loop {
            match self.cursor.peek() {
                Some(c) if c.is_ascii_digit() => {
                    lexeme.push(c);
                    self.cursor.advance();
                }
                Some('.') if !seen_dot => {
                    seen_dot = true;
                    lexeme.push('.');
                    self.cursor.advance();
                }
                _ => break,
            }
        }

        match self.cursor.peek() {
            Some('f') | Some('F') => {
                self.cursor.advance();
                (TokenKind::FloatNumber, lexeme)
            }
            Some('d') | Some('D') => {
                self.cursor.advance();
                (TokenKind::DoubleNumber, lexeme)
            }
            _ if seen_dot => (TokenKind::FloatNumber, lexeme),
            _ => (TokenKind::Number, lexeme),
        }
    }

    /// Consumes `alpha+` text and resolves it to a keyword, a primitive
    /// `TYPE` token, or a plain `IDENTIFIER`.
    fn lex_ident_or_keyword(&mut self) -> (TokenKind, String) {
        let mut lexeme = String::new();
        while let Some(c) = self.cursor.peek() {
            if !is_alpha(c) {
                break;
            }
            lexeme.push(c);
            self.cursor.advance();
        }

        if let Some(kind) = keyword_from_str(&lexeme) {
            return (kind, lexeme);
        }
        if Type::is_primitive_name(&lexeme) {
            return (TokenKind::Type, lexeme);
        }
        (TokenKind::Identifier, lexeme)
    }

    fn lex_string(&mut self) -> Result<(TokenKind, String), LexError> {
        let begin = self.cursor.pos();
        self.cursor.advance(); // opening quote
        let mut lexeme = String::new();
        loop {
            match self.cursor.advance() {
                Some('"') => break,
                Some(c) => lexeme.push(c),
                None => {
                    return Err(LexError::UnexpectedChar {
                        file_path: self.file_path.clone(),
                        position: begin,
                        found: '"',
                    })
                }
            }
        }
        Ok((TokenKind::String, lexeme))
    }

    fn lex_char(&mut self) -> Result<(TokenKind, String), LexError> {
        let begin = self.cursor.pos();
        self.cursor.advance(); // opening quote
        let Some(c) = self.cursor.advance() else {
            return Err(LexError::UnexpectedChar {
                file_path: self.file_path.clone(),
                position: begin,
                found: '\'',
            });
        };
        match self.cursor.advance() {
            Some('\'') => Ok((TokenKind::Char, c.to_string())),
            _ => Err(LexError::UnexpectedChar {
                file_path: self.file_path.clone(),
                position: begin,
                found: '\'',
            }),
        }
    }

    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(|c| c == ' ' || c == '\t' || c == '\r' || c == '\n');
    }

    /// Consumes a leading `//` or `/*...*/` comment, if present.
    ///
    /// `*/` is only recognized while actively inside a block comment; it has
    /// no effect anywhere else.
    fn skip_comment(&mut self) -> Result<bool, LexError> {
        if self.cursor.peek() == Some('/') && self.cursor.peek_next() == Some('/') {
            self.cursor.eat_while(|c| c != '\n');
            return Ok(true);
        }
        if self.cursor.peek() == Some('/') && self.cursor.peek_next() == Some('*') {
            self.cursor.advance();
            self.cursor.advance();
            loop {
                match self.cursor.peek() {
                    None => break, // unterminated block comment runs to EOF without error
                    Some('*') if self.cursor.peek_next() == Some('/') => {
                        self.cursor.advance();
                        self.cursor.advance();
                        break;
                    }
                    Some(_) => {
                        self.cursor.advance();
                    }
                }
            }
            return Ok(true);
        }
        Ok(false)
    }
}

fn is_alpha(c: char) -> bool {
    c.is_alphabetic()
}
