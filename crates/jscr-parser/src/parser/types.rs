//! The composable type-prefix grammar (`parseType`/`parseTypePost`).

use jscr_common::{SyntaxError, TokenKind, Type};

use super::Parser;
use crate::ast::{AnnotationUsage, Node};

/// Which declaration family a type prefix introduced.
pub(super) enum Category {
    Object,
    AnnotationObject,
    Enum,
}

/// The prefix consumed ahead of a variable or function declaration's name.
pub(super) struct VarTypeCtx {
    pub annotations: Vec<AnnotationUsage>,
    pub constant: bool,
    pub exported: bool,
    pub type_: Type,
}

/// The prefix consumed ahead of an `object`/`@object`/`enum` declaration's
/// own name (captured by the type-name slot itself, not a separate
/// identifier token).
pub(super) struct ObjEnumTypeCtx {
    pub annotations: Vec<AnnotationUsage>,
    pub constant: bool,
    pub exported: bool,
    pub category: Category,
    pub identifier_type: Type,
}

pub(super) enum TypeCtx {
    Var(VarTypeCtx),
    ObjEnum(ObjEnumTypeCtx),
}

impl<'a> Parser<'a> {
    /// One `@Ident(args?)` annotation usage.
    pub(super) fn parse_annotation_usage(&mut self) -> Result<AnnotationUsage, SyntaxError> {
        self.cursor.expect(TokenKind::At, "expected '@'")?;
        let ident = self.cursor.expect(TokenKind::Identifier, "expected an annotation name")?.lexeme;
        let args = if self.cursor.peek(0).kind == TokenKind::OpenParen {
            self.parse_arg_list()?
        } else {
            Vec::new()
        };
        Ok(AnnotationUsage { ident, args })
    }

    /// Consumes the composable declaration prefix: annotations, `const`,
    /// `export`, a `function(T, T, ...)` lambda-type decoration, an
    /// `object`/`@object`/`enum` category token, and finally a type name
    /// (optionally array-suffixed), each category at most once but in any
    /// order.
    pub(super) fn parse_type(&mut self) -> Result<TypeCtx, SyntaxError> {
        let mut annotations = Vec::new();
        let mut constant = false;
        let mut exported = false;
        let mut function_params: Option<Vec<Type>> = None;
        let mut category: Option<Category> = None;
        let mut type_name: Option<String> = None;

        loop {
            match self.cursor.peek(0).kind {
                TokenKind::At => annotations.push(self.parse_annotation_usage()?),

                TokenKind::Const if type_name.is_none() => {
                    constant = true;
                    self.cursor.advance();
                }
                TokenKind::Export if type_name.is_none() => {
                    exported = true;
                    self.cursor.advance();
                }

                TokenKind::Function if function_params.is_none() => {
                    self.cursor.advance();
                    function_params = Some(self.parse_function_type_params()?);
                }

                TokenKind::Object if category.is_none() && type_name.is_none() => {
                    category = Some(Category::Object);
                    self.cursor.advance();
                }
                TokenKind::AnnotationObject if category.is_none() && type_name.is_none() => {
                    category = Some(Category::AnnotationObject);
                    self.cursor.advance();
                }
                TokenKind::Enum if category.is_none() && type_name.is_none() => {
                    category = Some(Category::Enum);
                    self.cursor.advance();
                }

                TokenKind::Type | TokenKind::Identifier if type_name.is_none() => {
                    let mut name = self.cursor.advance().lexeme;
                    if self.cursor.peek(0).kind == TokenKind::OpenBracket
                        && self.cursor.peek(1).kind == TokenKind::CloseBracket
                    {
                        self.cursor.advance();
                        self.cursor.advance();
                        name.push_str("[]");
                    }
                    type_name = Some(name);
                }

                _ => break,
            }
        }

        let Some(name) = type_name else {
            return Err(self.cursor.error("No declaration type specified."));
        };
        let resolved = Type::from_name(&name);

        match category {
            Some(category) => Ok(TypeCtx::ObjEnum(ObjEnumTypeCtx {
                annotations,
                constant,
                exported,
                category,
                identifier_type: resolved,
            })),
            None => {
                let type_ = match function_params {
                    Some(params) => resolved.with_lambda_types(params),
                    None => resolved,
                };
                Ok(TypeCtx::Var(VarTypeCtx { annotations, constant, exported, type_ }))
            }
        }
    }

    /// `'(' (TYPE (',' TYPE)*)? ')'` — only primitive `TYPE` tokens are
    /// accepted as function-type parameters, not arbitrary type names.
    fn parse_function_type_params(&mut self) -> Result<Vec<Type>, SyntaxError> {
        let _g = self.enter_outline();
        self.cursor.expect(TokenKind::OpenParen, "expected '(' after 'function'")?;
        let mut params = Vec::new();
        if self.cursor.peek(0).kind != TokenKind::CloseParen {
            params.push(self.parse_primitive_type_name()?);
            while self.cursor.peek(0).kind == TokenKind::Comma {
                self.cursor.advance();
                params.push(self.parse_primitive_type_name()?);
            }
        }
        self.cursor.expect(TokenKind::CloseParen, "expected ')'")?;
        Ok(params)
    }

    fn parse_primitive_type_name(&mut self) -> Result<Type, SyntaxError> {
        let tok = self.cursor.expect(TokenKind::Type, "expected a type name")?;
        Ok(Type::from_name(&tok.lexeme))
    }

    /// Calls [`Parser::parse_type`] and dispatches on the resulting context:
    /// an object/enum category routes to the matching declaration parser; a
    /// plain variable-context type expects a declared name, then branches on
    /// whether it names a function (`(` follows) or a variable.
    pub(super) fn parse_type_post(&mut self) -> Result<Node, SyntaxError> {
        match self.parse_type()? {
            TypeCtx::ObjEnum(ctx) => {
                if ctx.constant {
                    return Err(self.cursor.error("Cannot declare enum or object as constant"));
                }
                match ctx.category {
                    Category::Object => {
                        self.parse_object_decl(ctx.annotations, ctx.exported, ctx.identifier_type, false)
                    }
                    Category::AnnotationObject => {
                        self.parse_object_decl(ctx.annotations, ctx.exported, ctx.identifier_type, true)
                    }
                    Category::Enum => self.parse_enum_decl(ctx.annotations, ctx.exported, ctx.identifier_type),
                }
            }
            TypeCtx::Var(ctx) => {
                let identifier = self.cursor.expect(TokenKind::Identifier, "expected an identifier")?.lexeme;
                if self.cursor.peek(0).kind == TokenKind::OpenParen {
                    if ctx.constant {
                        return Err(self.cursor.error("A function cannot be declared constant"));
                    }
                    self.parse_function_decl(ctx.annotations, ctx.exported, ctx.type_, identifier)
                } else {
                    self.parse_var_decl(ctx.annotations, ctx.constant, ctx.exported, ctx.type_, identifier)
                }
            }
        }
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
    fn function_type_prefix_becomes_a_lambda_type() {
        let node = parse_one("int function(int, string) cb;");
        match node {
            Node::VarDecl(v) => {
                assert!(v.type_.is_lambda());
                assert_eq!(v.type_.uid, jscr_common::types::uid::INT);
                assert_eq!(v.type_.lambda_types.len(), 2);
            }
            other => panic!("expected VarDecl, got {other:?}"),
        }
    }

    #[test]
    fn function_prefix_without_a_preceding_base_type_is_a_syntax_error() {
        let toks = tokenize_str("t.jscr", "function(int, string) cb;").unwrap();
        let err = PublicParser::new("t.jscr", &toks).parse_program("t.jscr").unwrap_err();
        assert_eq!(err.description, "expected an identifier");
    }

    #[test]
    fn array_suffix_on_type_name_produces_array_type() {
        let node = parse_one("int[] xs;");
        match node {
            Node::VarDecl(v) => assert_eq!(v.type_.uid, jscr_common::types::uid::ARRAY),
            other => panic!("expected VarDecl, got {other:?}"),
        }
    }

    #[test]
    fn missing_type_name_is_a_syntax_error() {
        let toks = tokenize_str("t.jscr", "const ;").unwrap();
        let err = PublicParser::new("t.jscr", &toks).parse_program("t.jscr").unwrap_err();
        assert_eq!(err.description, "No declaration type specified.");
    }
}
