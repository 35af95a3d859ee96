//! The expression grammar, from lowest precedence (assignment) to highest
//! (primary), per the operator-precedence chain: assignment → array-literal
//! → lambda → boolean → comparison → additive → multiplicative → unary →
//! call/index → member → primary.

use jscr_common::{SyntaxError, TokenKind};

use super::Parser;
use crate::ast::{
    ArrayLiteral, AssignmentExpr, BinaryExpr, CallExpr, ComparisonOp, EqualityCheckExpr, IndexExpr, LambdaExpr,
    MemberExpr, Node, ObjectConstructorExpr, ObjectConstructorTarget, Property, UnaryExpr,
};

impl<'a> Parser<'a> {
    /// `expr := assignment` — the entry point used everywhere an arbitrary
    /// expression is expected (return values, loop headers, statement
    /// fallback, call/annotation arguments, array and object-constructor
    /// elements).
    pub(super) fn parse_assignment(&mut self) -> Result<Node, SyntaxError> {
        let at_top = self.at_top_level();
        let left = self.parse_array()?;

        if self.cursor.peek(0).kind == TokenKind::Equals {
            self.cursor.advance();
            let value = {
                let _g = self.enter_outline();
                self.parse_assignment()?
            };
            if at_top {
                self.cursor.expect(TokenKind::Semicolon, "expected ';' after assignment")?;
            }
            return Ok(Node::Assignment(AssignmentExpr { assignee: Box::new(left), value: Box::new(value) }));
        }

        if self.cursor.peek(0).kind == TokenKind::OpenBrace {
            let ident = match &left {
                Node::Identifier(id) => id.symbol.clone(),
                _ => return Err(self.cursor.error("Object constructor assignment only works for identifiers")),
            };
            let value = {
                let _g = self.enter_outline();
                self.parse_object_constructor(ObjectConstructorTarget::Identifier(ident))?
            };
            if at_top {
                self.cursor.expect(TokenKind::Semicolon, "expected ';' after assignment")?;
            }
            return Ok(Node::Assignment(AssignmentExpr { assignee: Box::new(left), value: Box::new(value) }));
        }

        Ok(left)
    }

    /// `{ expr (',' expr)* }` as a bare array literal. Delegates when the
    /// next token isn't `{` — note this only fires when `{` opens a *fresh*
    /// expression; `x = { ... }` is handled by `parse_assignment` itself as
    /// object-constructor sugar before ever reaching here.
    fn parse_array(&mut self) -> Result<Node, SyntaxError> {
        if self.cursor.peek(0).kind != TokenKind::OpenBrace {
            return self.parse_lambda();
        }
        self.cursor.advance();
        let mut elements = Vec::new();
        while self.cursor.not_eof() && self.cursor.peek(0).kind != TokenKind::CloseBrace {
            elements.push(self.parse_assignment()?);
            match self.cursor.peek(0).kind {
                TokenKind::Comma => {
                    self.cursor.advance();
                }
                TokenKind::CloseBrace => {}
                _ => return Err(self.cursor.error("expected ',' or '}' in array literal")),
            }
        }
        self.cursor.expect(TokenKind::CloseBrace, "expected '}' to close an array literal")?;
        Ok(Node::ArrayLiteral(ArrayLiteral { value: elements }))
    }

    fn parse_lambda(&mut self) -> Result<Node, SyntaxError> {
        if self.cursor.peek(0).kind != TokenKind::Lambda {
            return self.parse_bool();
        }
        self.cursor.advance();
        let param_idents = {
            let _g = self.enter_outline();
            self.cursor.expect(TokenKind::OpenParen, "expected '(' after 'lambda'")?;
            let mut idents = Vec::new();
            if self.cursor.peek(0).kind != TokenKind::CloseParen {
                idents.push(self.cursor.expect(TokenKind::Identifier, "expected a parameter name")?.lexeme);
                while self.cursor.peek(0).kind == TokenKind::Comma {
                    self.cursor.advance();
                    idents.push(self.cursor.expect(TokenKind::Identifier, "expected a parameter name")?.lexeme);
                }
            }
            self.cursor.expect(TokenKind::CloseParen, "expected ')'")?;
            idents
        };
        let (body, instant_return) = self.parse_function_body(true)?;
        Ok(Node::Lambda(LambdaExpr { param_idents, body, instant_return }))
    }

    /// `&&`/`||`, each recognized as two adjacent single-character tokens.
    /// Right-recursive, so a chain `a && b && c` nests as
    /// `And(a, And(b, c))`.
    fn parse_bool(&mut self) -> Result<Node, SyntaxError> {
        let left = self.parse_comparison()?;
        let op = match (self.cursor.peek(0).kind, self.cursor.peek(1).kind) {
            (TokenKind::And, TokenKind::And) => Some(ComparisonOp::And),
            (TokenKind::Or, TokenKind::Or) => Some(ComparisonOp::Or),
            _ => None,
        };
        if let Some(operator) = op {
            self.cursor.advance();
            self.cursor.advance();
            let right = self.parse_bool()?;
            return Ok(Node::EqualityCheck(EqualityCheckExpr { left: Box::new(left), right: Box::new(right), operator }));
        }
        Ok(left)
    }

    /// Two-token operators (`==`, `!=`, `<=`, `>=`) are checked before the
    /// single-token `<`/`>` so the latter don't shadow the former. Only a
    /// single comparison is recognized at this level — it does not chain.
    fn parse_comparison(&mut self) -> Result<Node, SyntaxError> {
        let left = self.parse_additive()?;
        if let Some((operator, width)) = self.peek_comparison_op() {
            for _ in 0..width {
                self.cursor.advance();
            }
            let right = self.parse_additive()?;
            return Ok(Node::EqualityCheck(EqualityCheckExpr { left: Box::new(left), right: Box::new(right), operator }));
        }
        Ok(left)
    }

    fn peek_comparison_op(&self) -> Option<(ComparisonOp, usize)> {
        match (self.cursor.peek(0).kind, self.cursor.peek(1).kind) {
            (TokenKind::Equals, TokenKind::Equals) => Some((ComparisonOp::Equals, 2)),
            (TokenKind::Not, TokenKind::Equals) => Some((ComparisonOp::NotEquals, 2)),
            (TokenKind::LessThan, TokenKind::Equals) => Some((ComparisonOp::LessThanOrEquals, 2)),
            (TokenKind::MoreThan, TokenKind::Equals) => Some((ComparisonOp::MoreThanOrEquals, 2)),
            (TokenKind::LessThan, _) => Some((ComparisonOp::LessThan, 1)),
            (TokenKind::MoreThan, _) => Some((ComparisonOp::MoreThan, 1)),
            _ => None,
        }
    }

    fn parse_additive(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_multiplicative()?;
        while let Some(op) = self.peek_binary_operator(&['+', '-']) {
            self.cursor.advance();
            let right = self.parse_multiplicative()?;
            left = Node::Binary(BinaryExpr { left: Box::new(left), right: Box::new(right), operator: op });
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Node, SyntaxError> {
        let mut left = self.parse_unary()?;
        while let Some(op) = self.peek_binary_operator(&['*', '/', '%']) {
            self.cursor.advance();
            let right = self.parse_unary()?;
            left = Node::Binary(BinaryExpr { left: Box::new(left), right: Box::new(right), operator: op });
        }
        Ok(left)
    }

    fn peek_binary_operator(&self, allowed: &[char]) -> Option<char> {
        let tok = self.cursor.peek(0);
        if tok.kind != TokenKind::BinaryOperator {
            return None;
        }
        let op = tok.lexeme.chars().next()?;
        allowed.contains(&op).then_some(op)
    }

    fn parse_unary(&mut self) -> Result<Node, SyntaxError> {
        if let Some(op) = self.peek_binary_operator(&['+', '-']) {
            self.cursor.advance();
            let object = self.parse_call_member()?;
            return Ok(Node::Unary(UnaryExpr { object: Box::new(object), operator: op }));
        }
        self.parse_call_member()
    }

    /// Parses a member expression, then — matching the reference parser's
    /// shape — chains into *either* a call or an index, never both from the
    /// same base: `foo()[0]`/`foo[0]()` leave the trailing bracket/paren for
    /// whatever production comes next (and typically error there), since
    /// only one family chains per call-member base.
    fn parse_call_member(&mut self) -> Result<Node, SyntaxError> {
        let member = self.parse_member()?;
        match self.cursor.peek(0).kind {
            TokenKind::OpenParen => self.parse_call_chain(member),
            TokenKind::OpenBracket => self.parse_index_chain(member),
            _ => Ok(member),
        }
    }

    fn parse_call_chain(&mut self, caller: Node) -> Result<Node, SyntaxError> {
        let at_top = self.at_top_level();
        let args = self.parse_arg_list()?;
        let call = Node::Call(CallExpr { caller: Box::new(caller), args });
        if self.cursor.peek(0).kind == TokenKind::OpenParen {
            return self.parse_call_chain(call);
        }
        if at_top {
            self.cursor.expect(TokenKind::Semicolon, "expected ';' after call statement")?;
        }
        Ok(call)
    }

    fn parse_index_chain(&mut self, caller: Node) -> Result<Node, SyntaxError> {
        self.cursor.advance(); // '['
        let arg = {
            let _g = self.enter_outline();
            self.parse_assignment()?
        };
        self.cursor.expect(TokenKind::CloseBracket, "expected ']'")?;
        let index = Node::Index(IndexExpr { caller: Box::new(caller), arg: Box::new(arg) });
        if self.cursor.peek(0).kind == TokenKind::OpenBracket {
            return self.parse_index_chain(index);
        }
        Ok(index)
    }

    /// `'(' (assignment (',' assignment)*)? ')'`, bumping the outline depth
    /// around the parentheses. Shared by call expressions and annotation
    /// argument lists — the call-as-statement semicolon check lives with the
    /// caller, not here, since annotation arguments never terminate a
    /// statement.
    pub(super) fn parse_arg_list(&mut self) -> Result<Vec<Node>, SyntaxError> {
        self.cursor.expect(TokenKind::OpenParen, "expected '('")?;
        let args = {
            let _g = self.enter_outline();
            let mut args = Vec::new();
            if self.cursor.peek(0).kind != TokenKind::CloseParen {
                args.push(self.parse_assignment()?);
                while self.cursor.peek(0).kind == TokenKind::Comma {
                    self.cursor.advance();
                    args.push(self.parse_assignment()?);
                }
            }
            args
        };
        self.cursor.expect(TokenKind::CloseParen, "expected ')'")?;
        Ok(args)
    }

    fn parse_member(&mut self) -> Result<Node, SyntaxError> {
        let mut object = self.parse_primary()?;
        while self.cursor.peek(0).kind == TokenKind::Dot {
            self.cursor.advance();
            let property = self.cursor.expect(TokenKind::Identifier, "expected a property name after '.'")?.lexeme;
            object = Node::Member(MemberExpr { object: Box::new(object), property });
        }
        Ok(object)
    }

    fn parse_primary(&mut self) -> Result<Node, SyntaxError> {
        let tok = self.cursor.peek(0).clone();
        match tok.kind {
            TokenKind::Identifier => {
                self.cursor.advance();
                Ok(Node::identifier(tok.lexeme))
            }
            TokenKind::Number => {
                self.cursor.advance();
                let value: i32 = tok.lexeme.parse().map_err(|_| self.cursor.error("invalid integer literal"))?;
                Ok(Node::NumericLiteral(value))
            }
            TokenKind::FloatNumber => {
                self.cursor.advance();
                let value: f32 = tok.lexeme.parse().map_err(|_| self.cursor.error("invalid float literal"))?;
                Ok(Node::FloatLiteral(value))
            }
            TokenKind::DoubleNumber => {
                self.cursor.advance();
                let value: f64 = tok.lexeme.parse().map_err(|_| self.cursor.error("invalid double literal"))?;
                Ok(Node::DoubleLiteral(value))
            }
            TokenKind::String => {
                self.cursor.advance();
                Ok(Node::StringLiteral(tok.lexeme))
            }
            TokenKind::Char => {
                self.cursor.advance();
                let c = tok.lexeme.chars().next().unwrap_or('\0');
                Ok(Node::CharLiteral(c))
            }
            TokenKind::OpenParen => {
                self.cursor.advance();
                let expr = {
                    let _g = self.enter_outline();
                    self.parse_assignment()?
                };
                self.cursor.expect(TokenKind::CloseParen, "expected ')'")?;
                Ok(expr)
            }
            _ => Err(self.cursor.error(format!("unexpected token '{}' in expression", tok.lexeme))),
        }
    }

    /// `{ ident : expr (',' ident : expr)* }`. Shared shape by both
    /// object-declaration initializers and bare assignment sugar; the
    /// outline bump around the whole thing is the caller's responsibility.
    pub(super) fn parse_object_constructor(&mut self, target: ObjectConstructorTarget) -> Result<Node, SyntaxError> {
        self.cursor.expect(TokenKind::OpenBrace, "expected '{' to begin an object constructor")?;
        let mut properties = Vec::new();
        while self.cursor.not_eof() && self.cursor.peek(0).kind != TokenKind::CloseBrace {
            let key = self.cursor.expect(TokenKind::Identifier, "expected a property name")?.lexeme;
            self.cursor.expect(TokenKind::Colon, "expected ':' after property name")?;
            let value = self.parse_assignment()?;
            properties.push(Property { key, type_: None, value: Some(Box::new(value)) });
            match self.cursor.peek(0).kind {
                TokenKind::Comma => {
                    self.cursor.advance();
                }
                TokenKind::CloseBrace => {}
                _ => return Err(self.cursor.error("expected ',' or '}' in object constructor")),
            }
        }
        self.cursor.expect(TokenKind::CloseBrace, "expected '}' to close an object constructor")?;
        Ok(Node::ObjectConstructor(ObjectConstructorExpr { target, properties }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Parser as PublicParser;
    use jscr_lexer::tokenize_str;
    use crate::ast::{ComparisonOp, Node};

    fn parse_expr(src: &str) -> Node {
        let full = format!("{src};");
        let toks = tokenize_str("t.jscr", &full).unwrap();
        match PublicParser::new("t.jscr", &toks).parse_program("t.jscr").unwrap().body.into_iter().next().unwrap() {
            Node::Assignment(a) => *a.value,
            other => other,
        }
    }

    #[test]
    fn additive_is_left_associative() {
        let node = parse_expr("x = 1 + 2 + 3");
        match node {
            Node::Binary(b) => {
                assert_eq!(b.operator, '+');
                assert!(matches!(*b.left, Node::Binary(_)));
                assert!(matches!(*b.right, Node::NumericLiteral(3)));
            }
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        let node = parse_expr("x = 1 + 2 * 3");
        match node {
            Node::Binary(b) => {
                assert_eq!(b.operator, '+');
                assert!(matches!(*b.left, Node::NumericLiteral(1)));
                match *b.right {
                    Node::Binary(inner) => assert_eq!(inner.operator, '*'),
                    other => panic!("expected nested Binary, got {other:?}"),
                }
            }
            other => panic!("expected Binary, got {other:?}"),
        }
    }

    #[test]
    fn comparison_does_not_chain() {
        let node = parse_expr("x = 1 < 2");
        match node {
            Node::EqualityCheck(e) => assert_eq!(e.operator, ComparisonOp::LessThan),
            other => panic!("expected EqualityCheck, got {other:?}"),
        }
    }

    #[test]
    fn two_token_comparisons_are_preferred_over_shadowing_single_token_ones() {
        let node = parse_expr("x = 1 <= 2");
        match node {
            Node::EqualityCheck(e) => assert_eq!(e.operator, ComparisonOp::LessThanOrEquals),
            other => panic!("expected EqualityCheck, got {other:?}"),
        }
    }

    #[test]
    fn logical_and_is_recognized_as_two_adjacent_tokens() {
        let node = parse_expr("x = a && b");
        match node {
            Node::EqualityCheck(e) => assert_eq!(e.operator, ComparisonOp::And),
            other => panic!("expected EqualityCheck, got {other:?}"),
        }
    }

    #[test]
    fn unary_minus_wraps_a_call_member_expression() {
        let node = parse_expr("x = -foo()");
        match node {
            Node::Unary(u) => {
                assert_eq!(u.operator, '-');
                assert!(matches!(*u.object, Node::Call(_)));
            }
            other => panic!("expected Unary, got {other:?}"),
        }
    }

    #[test]
    fn member_chain_folds_left() {
        let node = parse_expr("x = a.b.c");
        match node {
            Node::Member(m) => {
                assert_eq!(m.property, "c");
                assert!(matches!(*m.object, Node::Member(_)));
            }
            other => panic!("expected Member, got {other:?}"),
        }
    }

    #[test]
    fn chained_calls_parse_as_nested_call_expressions() {
        let node = parse_expr("x = foo()()");
        match node {
            Node::Call(outer) => assert!(matches!(*outer.caller, Node::Call(_))),
            other => panic!("expected Call, got {other:?}"),
        }
    }

    #[test]
    fn chained_indices_parse_as_nested_index_expressions() {
        let node = parse_expr("x = a[0][1]");
        match node {
            Node::Index(outer) => assert!(matches!(*outer.caller, Node::Index(_))),
            other => panic!("expected Index, got {other:?}"),
        }
    }

    #[test]
    fn array_literal_as_assignment_value_is_not_an_object_constructor() {
        let node = parse_expr("x = { 1, 2, 3 }");
        match node {
            Node::ArrayLiteral(a) => assert_eq!(a.value.len(), 3),
            other => panic!("expected ArrayLiteral, got {other:?}"),
        }
    }

    #[test]
    fn object_constructor_requires_identifier_assignee() {
        let toks = tokenize_str("t.jscr", "1 { a: 1 };").unwrap();
        let err = PublicParser::new("t.jscr", &toks).parse_program("t.jscr").unwrap_err();
        assert_eq!(err.description, "Object constructor assignment only works for identifiers");
    }

    #[test]
    fn lambda_with_arrow_body_is_instant_return() {
        let node = parse_expr("x = lambda(a, b) => a + b");
        match node {
            Node::Lambda(l) => {
                assert_eq!(l.param_idents, vec!["a", "b"]);
                assert!(l.instant_return);
            }
            other => panic!("expected Lambda, got {other:?}"),
        }
    }

    #[test]
    fn call_as_top_level_statement_requires_semicolon() {
        let toks = tokenize_str("t.jscr", "foo()").unwrap();
        let err = PublicParser::new("t.jscr", &toks).parse_program("t.jscr").unwrap_err();
        assert!(err.description.contains("';'"));
    }

    #[test]
    fn call_inside_call_args_does_not_require_its_own_semicolon() {
        let toks = tokenize_str("t.jscr", "foo(bar());").unwrap();
        let program = PublicParser::new("t.jscr", &toks).parse_program("t.jscr").unwrap();
        assert_eq!(program.body.len(), 1);
    }
}
