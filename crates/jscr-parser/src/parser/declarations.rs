//! Declaration statements: functions, variables, objects, and enums.

use jscr_common::{SyntaxError, TokenKind, Type};

use super::Parser;
use crate::ast::{AnnotationUsage, FunctionDecl, Node, ObjectDecl, Property, VarDecl};

impl<'a> Parser<'a> {
    pub(super) fn parse_import(&mut self) -> Result<Node, SyntaxError> {
        self.cursor.advance(); // 'import'
        let mut target = vec![self.cursor.advance().lexeme];
        while self.cursor.peek(0).kind == TokenKind::Dot {
            self.cursor.advance();
            target.push(self.cursor.advance().lexeme);
        }
        let alias = if self.cursor.peek(0).kind == TokenKind::As {
            self.cursor.advance();
            Some(self.cursor.expect(TokenKind::Identifier, "expected an identifier after 'as'")?.lexeme)
        } else {
            None
        };
        self.cursor.expect(TokenKind::Semicolon, "expected ';' after import statement")?;
        Ok(Node::Import(crate::ast::ImportStmt { target, alias }))
    }

    pub(super) fn parse_function_decl(
        &mut self,
        annotations: Vec<AnnotationUsage>,
        exported: bool,
        type_: Type,
        identifier: String,
    ) -> Result<Node, SyntaxError> {
        self.cursor.expect(TokenKind::OpenParen, "expected '(' to begin a parameter list")?;
        let parameters = {
            let _g = self.enter_outline();
            let mut parameters = Vec::new();
            if self.cursor.peek(0).kind != TokenKind::CloseParen {
                parameters.push(self.parse_function_param()?);
                while self.cursor.peek(0).kind == TokenKind::Comma {
                    self.cursor.advance();
                    parameters.push(self.parse_function_param()?);
                }
            }
            parameters
        };
        self.cursor.expect(TokenKind::CloseParen, "expected ')' to close a parameter list")?;

        let (body, instant_return) = self.parse_function_body(false)?;
        Ok(Node::FunctionDecl(FunctionDecl {
            annotated_with: annotations,
            exported,
            parameters,
            identifier,
            type_,
            body,
            instant_return,
        }))
    }

    /// Each parameter is itself a full typed declaration; anything that
    /// doesn't resolve to a plain [`VarDecl`] (a nested function, object, or
    /// enum declaration) is rejected.
    fn parse_function_param(&mut self) -> Result<VarDecl, SyntaxError> {
        match self.parse_type_post()? {
            Node::VarDecl(v) => Ok(v),
            _ => Err(self.cursor.error("Function parameters must be variable declarations")),
        }
    }

    /// `{ stmt* }`, or the `=> expr` shorthand. When `reset_for_lambda_body`
    /// is set and the body is a brace block, the outline depth is
    /// temporarily dropped by one for the duration of the block — this lets
    /// a lambda's body behave like top-level code (its own statements regain
    /// ordinary semicolon requirements) even when the lambda itself sits
    /// inside an already-bumped context such as a call's argument list.
    pub(super) fn parse_function_body(&mut self, reset_for_lambda_body: bool) -> Result<(Vec<Node>, bool), SyntaxError> {
        if self.cursor.peek(0).kind == TokenKind::OpenBrace {
            if reset_for_lambda_body && self.outline_depth > 0 {
                self.outline_depth -= 1;
                let body = self.parse_block();
                self.outline_depth += 1;
                Ok((body?, false))
            } else {
                Ok((self.parse_block()?, false))
            }
        } else {
            self.cursor.expect(TokenKind::Equals, "expected '{' or '=>' to start a function body")?;
            self.cursor.expect(TokenKind::MoreThan, "expected '>' to complete '=>'")?;
            let stmt = self.parse_stmt()?;
            Ok((vec![stmt], true))
        }
    }

    pub(super) fn parse_var_decl(
        &mut self,
        annotations: Vec<AnnotationUsage>,
        constant: bool,
        exported: bool,
        type_: Type,
        identifier: String,
    ) -> Result<Node, SyntaxError> {
        let at_top = self.at_top_level();

        let no_value = (at_top && self.cursor.peek(0).kind == TokenKind::Semicolon)
            || (!at_top && self.cursor.peek(0).kind != TokenKind::Equals);

        if no_value {
            if at_top {
                self.cursor.advance(); // ';'
            }
            return self.finish_var_decl(annotations, constant, exported, type_, identifier, None);
        }

        let value = {
            let _g = self.enter_outline();
            if self.cursor.peek(0).kind == TokenKind::Equals {
                self.cursor.advance();
                self.parse_assignment()?
            } else {
                self.parse_object_constructor(crate::ast::ObjectConstructorTarget::Type(type_.clone()))?
            }
        };
        if at_top {
            self.cursor.expect(TokenKind::Semicolon, "expected ';' after variable declaration")?;
        }
        self.finish_var_decl(annotations, constant, exported, type_, identifier, Some(value))
    }

    fn finish_var_decl(
        &self,
        annotations: Vec<AnnotationUsage>,
        constant: bool,
        exported: bool,
        type_: Type,
        identifier: String,
        value: Option<Node>,
    ) -> Result<Node, SyntaxError> {
        if value.is_none() && constant {
            return Err(self.cursor.error("Must assign value to constant expression"));
        }
        Ok(Node::VarDecl(VarDecl {
            annotated_with: annotations,
            constant,
            exported,
            type_,
            identifier,
            value: value.map(Box::new),
        }))
    }

    pub(super) fn parse_object_decl(
        &mut self,
        annotations: Vec<AnnotationUsage>,
        exported: bool,
        identifier_type: Type,
        is_annotation_object: bool,
    ) -> Result<Node, SyntaxError> {
        let identifier = identifier_type.data;
        self.cursor.expect(TokenKind::OpenBrace, "expected '{' to begin an object body")?;
        let properties = {
            let _g = self.enter_outline();
            let mut properties = Vec::new();
            while self.cursor.not_eof() && self.cursor.peek(0).kind != TokenKind::CloseBrace {
                properties.push(self.parse_object_property()?);
                match self.cursor.peek(0).kind {
                    TokenKind::Comma => {
                        self.cursor.advance();
                    }
                    TokenKind::CloseBrace => {}
                    _ => return Err(self.cursor.error("expected ',' or '}' in object body")),
                }
            }
            properties
        };
        self.cursor.expect(TokenKind::CloseBrace, "expected '}' to close an object body")?;
        Ok(Node::ObjectDecl(ObjectDecl {
            annotated_with: annotations,
            exported,
            identifier,
            properties,
            is_annotation_object,
        }))
    }

    /// A single object-body entry: a type prefix (no nested category token
    /// permitted) then a key, with an optional `: expr` value.
    fn parse_object_property(&mut self) -> Result<Property, SyntaxError> {
        let ctx = match self.parse_type()? {
            super::types::TypeCtx::Var(ctx) => ctx,
            super::types::TypeCtx::ObjEnum(_) => {
                return Err(self.cursor.error("Cannot nest an object/enum declaration inside an object body"))
            }
        };
        let key = self.cursor.expect(TokenKind::Identifier, "expected a property name")?.lexeme;
        let value = if self.cursor.peek(0).kind == TokenKind::Colon {
            self.cursor.advance();
            Some(Box::new(self.parse_assignment()?))
        } else {
            None
        };
        Ok(Property { key, type_: Some(ctx.type_), value })
    }

    pub(super) fn parse_enum_decl(
        &mut self,
        annotations: Vec<AnnotationUsage>,
        exported: bool,
        identifier_type: Type,
    ) -> Result<Node, SyntaxError> {
        let identifier = identifier_type.data;
        self.cursor.expect(TokenKind::OpenBrace, "expected '{' to begin an enum body")?;
        let entries = {
            let _g = self.enter_outline();
            let mut entries = Vec::new();
            while self.cursor.not_eof() && self.cursor.peek(0).kind != TokenKind::CloseBrace {
                entries.push(self.cursor.expect(TokenKind::Identifier, "expected an enum entry name")?.lexeme);
                match self.cursor.peek(0).kind {
                    TokenKind::Comma => {
                        self.cursor.advance();
                    }
                    TokenKind::CloseBrace => {}
                    _ => return Err(self.cursor.error("expected ',' or '}' in enum body")),
                }
            }
            entries
        };
        self.cursor.expect(TokenKind::CloseBrace, "expected '}' to close an enum body")?;
        Ok(Node::EnumDecl(crate::ast::EnumDecl { annotated_with: annotations, exported, identifier, entries }))
    }
}
