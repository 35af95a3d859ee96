//! Control-flow statements: `return`, `delete`, `if`/`else`, `while`, `for`.

use jscr_common::{SyntaxError, TokenKind};

use super::Parser;
use crate::ast::{DeleteDecl, ForDecl, IfBlock, IfElseDecl, Node, ReturnDecl, WhileDecl};

impl<'a> Parser<'a> {
    pub(super) fn parse_return(&mut self) -> Result<Node, SyntaxError> {
        self.cursor.advance(); // 'return'
        let value = {
            let _g = self.enter_outline();
            self.parse_assignment()?
        };
        self.cursor.expect(TokenKind::Semicolon, "expected ';' after return statement")?;
        Ok(Node::Return(ReturnDecl { value: Box::new(value) }))
    }

    pub(super) fn parse_delete(&mut self) -> Result<Node, SyntaxError> {
        self.cursor.advance(); // 'delete'
        let identifier = self.cursor.expect(TokenKind::Identifier, "expected an identifier after 'delete'")?.lexeme;
        self.cursor.expect(TokenKind::Semicolon, "expected ';' after delete statement")?;
        Ok(Node::Delete(DeleteDecl { identifier }))
    }

    pub(super) fn parse_if(&mut self) -> Result<Node, SyntaxError> {
        let mut blocks = vec![self.parse_if_block()?];
        let mut else_body = None;
        loop {
            match (self.cursor.peek(0).kind, self.cursor.peek(1).kind) {
                (TokenKind::Else, TokenKind::If) => {
                    self.cursor.advance();
                    blocks.push(self.parse_if_block()?);
                }
                (TokenKind::Else, _) => {
                    self.cursor.advance();
                    else_body = Some(self.parse_block_or_single()?);
                    break;
                }
                _ => break,
            }
        }
        Ok(Node::IfElse(IfElseDecl { blocks, else_body }))
    }

    fn parse_if_block(&mut self) -> Result<IfBlock, SyntaxError> {
        self.cursor.expect(TokenKind::If, "expected 'if'")?;
        self.cursor.expect(TokenKind::OpenParen, "expected '(' after 'if'")?;
        let condition = {
            let _g = self.enter_outline();
            self.parse_assignment()?
        };
        self.cursor.expect(TokenKind::CloseParen, "expected ')'")?;
        let body = self.parse_block_or_single()?;
        Ok(IfBlock { condition: Box::new(condition), body })
    }

    pub(super) fn parse_while(&mut self) -> Result<Node, SyntaxError> {
        self.cursor.advance(); // 'while'
        self.cursor.expect(TokenKind::OpenParen, "expected '(' after 'while'")?;
        let condition = {
            let _g = self.enter_outline();
            self.parse_assignment()?
        };
        self.cursor.expect(TokenKind::CloseParen, "expected ')'")?;
        let body = self.parse_block_or_single()?;
        Ok(Node::While(WhileDecl { condition: Box::new(condition), body }))
    }

    pub(super) fn parse_for(&mut self) -> Result<Node, SyntaxError> {
        self.cursor.advance(); // 'for'
        self.cursor.expect(TokenKind::OpenParen, "expected '(' after 'for'")?;
        let (declaration, condition, action) = {
            let _g = self.enter_outline();
            let declaration = self.parse_stmt()?;
            self.cursor.expect(TokenKind::Semicolon, "expected ';' after for-loop initializer")?;
            let condition = self.parse_assignment()?;
            self.cursor.expect(TokenKind::Semicolon, "expected ';' after for-loop condition")?;
            let action = self.parse_assignment()?;
            (declaration, condition, action)
        };
        self.cursor.expect(TokenKind::CloseParen, "expected ')'")?;
        let body = self.parse_block_or_single()?;
        Ok(Node::For(ForDecl {
            declaration: Box::new(declaration),
            condition: Box::new(condition),
            action: Box::new(action),
            body,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser as PublicParser;
    use jscr_lexer::tokenize_str;

    fn parse_one(src: &str) -> Node {
        let toks = tokenize_str("t.jscr", src).unwrap();
        PublicParser::new("t.jscr", &toks)
            .parse_program("t.jscr")
            .unwrap()
            .body
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn return_requires_a_value_and_semicolon() {
        let node = parse_one("return 1;");
        assert!(matches!(node, Node::Return(_)));
    }

    #[test]
    fn delete_takes_a_bare_identifier() {
        let node = parse_one("delete x;");
        match node {
            Node::Delete(d) => assert_eq!(d.identifier, "x"),
            other => panic!("expected Delete, got {other:?}"),
        }
    }

    #[test]
    fn if_else_if_else_chains_into_one_node() {
        let node = parse_one("if (a) { return 1; } else if (b) { return 2; } else { return 3; }");
        match node {
            Node::IfElse(decl) => {
                assert_eq!(decl.blocks.len(), 2);
                assert!(decl.else_body.is_some());
            }
            other => panic!("expected IfElse, got {other:?}"),
        }
    }

    #[test]
    fn if_without_else_has_no_else_body() {
        let node = parse_one("if (a) { return 1; }");
        match node {
            Node::IfElse(decl) => {
                assert_eq!(decl.blocks.len(), 1);
                assert!(decl.else_body.is_none());
            }
            other => panic!("expected IfElse, got {other:?}"),
        }
    }

    #[test]
    fn if_with_single_statement_body_has_no_braces() {
        let node = parse_one("if (a) return 1;");
        match node {
            Node::IfElse(decl) => assert_eq!(decl.blocks[0].body.len(), 1),
            other => panic!("expected IfElse, got {other:?}"),
        }
    }

    #[test]
    fn while_parses_condition_and_body() {
        let node = parse_one("while (x) { delete x; }");
        match node {
            Node::While(w) => assert_eq!(w.body.len(), 1),
            other => panic!("expected While, got {other:?}"),
        }
    }

    #[test]
    fn for_loop_init_does_not_need_its_own_semicolon_consumed_twice() {
        let node = parse_one("for (int i = 0; i < 10; i = i + 1) { delete i; }");
        match node {
            Node::For(f) => {
                assert!(matches!(*f.declaration, Node::VarDecl(_)));
                assert!(matches!(*f.condition, Node::EqualityCheck(_)));
                assert!(matches!(*f.action, Node::Assignment(_)));
            }
            other => panic!("expected For, got {other:?}"),
        }
    }
}
