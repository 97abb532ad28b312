//! Statement parsing for the layer language
//!
//! This module handles parsing of all statement types. Every statement body
//! (block or single statement) becomes a compound statement with its own
//! scope.

use crate::ast::{ExprId, StmtId};
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};
use parasl_common::CompilerError;

impl Parser<'_> {
    /// Parse `{ statements }` in a fresh scope
    pub fn parse_block(&mut self) -> Result<StmtId, CompilerError> {
        self.expect(TokenType::LeftBrace, "block")?;

        let statements = self.scoped(|p| {
            let mut statements = Vec::new();
            while !p.check(&TokenType::RightBrace) && !p.check(&TokenType::EndOfFile) {
                statements.push(p.parse_statement()?);
            }
            Ok(statements)
        })?;

        self.expect(TokenType::RightBrace, "block")?;
        Ok(self.builder.compound_statement(statements))
    }

    /// Body of `if`/`for`/`while`: a block, or one statement wrapped in its
    /// own scope
    fn parse_body(&mut self) -> Result<StmtId, CompilerError> {
        if self.check(&TokenType::LeftBrace) {
            return self.parse_block();
        }
        let statement = self.scoped(|p| p.parse_statement())?;
        Ok(self.builder.compound_statement(vec![statement]))
    }

    /// Parse statement
    pub fn parse_statement(&mut self) -> Result<StmtId, CompilerError> {
        match self.peek_nth(0) {
            Some(TokenType::If) => self.parse_if_statement(),
            Some(TokenType::For) => self.parse_for_statement(),
            Some(TokenType::While) => self.parse_while_statement(),
            Some(TokenType::Output) => self.parse_output_statement(),
            Some(TokenType::Return) => self.parse_return_statement(),
            Some(TokenType::LeftBrace) => self.parse_block(),
            _ if self.is_declaration_start() => self.parse_declaration(),
            _ => self.parse_assignment_statement(),
        }
    }

    /// `if (cond) body [else body]`
    fn parse_if_statement(&mut self) -> Result<StmtId, CompilerError> {
        self.expect(TokenType::If, "if statement")?;
        self.expect(TokenType::LeftParen, "if condition")?;
        let condition = self.parse_expression()?;
        self.expect(TokenType::RightParen, "if condition")?;

        let then_branch = self.parse_body()?;
        let else_branch = if self.match_token(&TokenType::Else) {
            Some(self.parse_body()?)
        } else {
            None
        };

        Ok(self.builder.if_statement(condition, then_branch, else_branch))
    }

    /// `while (cond) body`
    fn parse_while_statement(&mut self) -> Result<StmtId, CompilerError> {
        self.expect(TokenType::While, "while statement")?;
        self.expect(TokenType::LeftParen, "while condition")?;
        let condition = self.parse_expression()?;
        self.expect(TokenType::RightParen, "while condition")?;

        let body = self.parse_body()?;
        Ok(self.builder.while_loop(condition, body))
    }

    /// `for (name in source | begin:end[:step]) body`. The induction variable
    /// lives in a scope around header and body.
    fn parse_for_statement(&mut self) -> Result<StmtId, CompilerError> {
        self.expect(TokenType::For, "for statement")?;
        self.expect(TokenType::LeftParen, "for header")?;

        let (header, body) = self.scoped(|p| {
            let location = p.current_location();
            let name = p.expect_identifier("for header")?;
            p.expect(TokenType::In, "for header")?;
            let range = p.parse_range()?;
            p.expect(TokenType::RightParen, "for header")?;

            let header = p
                .builder
                .for_header(&name, range)
                .map_err(|e| e.at(location))?;
            let body = p.parse_body()?;
            Ok((header, body))
        })?;

        Ok(self.builder.for_loop(header, body))
    }

    /// Range of a for header: an iterable name or `begin:end[:step]`
    fn parse_range(&mut self) -> Result<ExprId, CompilerError> {
        let location = self.current_location();

        if self.check_identifier() {
            let name = self.expect_identifier("for range")?;
            let reference = self.builder.reference(&name).map_err(|e| e.at(location.clone()))?;
            let source = self.parse_postfix_chain(reference)?;
            return self.builder.array_range(source).map_err(|e| e.at(location));
        }

        let begin = self.parse_signed_integer("for range")?;
        self.expect(TokenType::Colon, "for range")?;
        let end = self.parse_signed_integer("for range")?;
        let step = if self.match_token(&TokenType::Colon) {
            self.parse_signed_integer("for range step")?
        } else {
            1
        };

        self.builder
            .indexed_range(begin, end, step)
            .map_err(|e| e.at(location))
    }

    /// Integer literal with an optional leading `-`
    fn parse_signed_integer(&mut self, context: &str) -> Result<i64, CompilerError> {
        let location = self.current_location();
        let negative = self.match_token(&TokenType::Minus);

        let value = match self.peek_nth(0) {
            Some(&TokenType::IntLiteral(value)) => value,
            _ => return Err(self.unexpected(format!("integer literal in {}", context)).into()),
        };
        self.advance();

        let value = i64::try_from(value).map_err(|_| ParseError::InvalidSyntax {
            message: format!("Integer {} is too large in {}", value, context),
            location,
        })?;
        Ok(if negative { -value } else { value })
    }

    /// `output(N, expr);`
    fn parse_output_statement(&mut self) -> Result<StmtId, CompilerError> {
        self.expect(TokenType::Output, "output statement")?;
        self.expect(TokenType::LeftParen, "output statement")?;
        let port = self.expect_u32("output port")?;
        self.expect(TokenType::Comma, "output statement")?;
        let value = self.parse_expression()?;
        self.expect(TokenType::RightParen, "output statement")?;
        self.expect(TokenType::Semicolon, "output statement")?;

        Ok(self.builder.output_statement(port, value))
    }

    /// `return expr;`
    fn parse_return_statement(&mut self) -> Result<StmtId, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::Return, "return statement")?;
        let value = self.parse_expression()?;
        self.expect(TokenType::Semicolon, "return statement")?;

        self.builder
            .return_statement(value)
            .map_err(|e| e.at(location))
    }

    /// `expr [= expr];`
    fn parse_assignment_statement(&mut self) -> Result<StmtId, CompilerError> {
        let location = self.current_location();
        let mut expr = self.parse_expression()?;

        if self.match_token(&TokenType::Equal) {
            let value = self.parse_expression()?;
            expr = self
                .builder
                .assignment(expr, value)
                .map_err(|e| e.at(location))?;
        }

        self.expect(TokenType::Semicolon, "statement")?;
        Ok(self.builder.assign_statement(expr))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{BinaryOp, ExpressionKind, Statement, StmtId};
    use crate::lexer::Lexer;
    use crate::parser::Parser;
    use crate::semantic::Builder;
    use parasl_common::CompilerError;

    fn parse(input: &str) -> Result<(Builder, Vec<StmtId>), CompilerError> {
        let mut builder = Builder::new();
        let tokens = Lexer::new(input).tokenize()?;
        let root = Parser::new(tokens, &mut builder).parse_layer()?;
        let Statement::Compound { statements } = builder.ast().stmt(root).clone() else {
            panic!("root is not a compound statement");
        };
        Ok((builder, statements))
    }

    #[test]
    fn test_block_scope_hides_names() {
        let err = parse("{ inner: int; }\noutput(0, inner);").unwrap_err();
        assert!(err.is_semantic());
        assert!(err.message().contains("\"inner\""));
    }

    #[test]
    fn test_outer_names_visible_in_block() {
        assert!(parse("outer: int; { outer = outer + 1; }").is_ok());
    }

    #[test]
    fn test_if_single_statement_body_is_wrapped() {
        let (b, stmts) = parse("x: int; if (x < 1) x = 2; else { x = 3; }").unwrap();
        let Statement::If { then_branch, else_branch: Some(else_branch), .. } = b.ast().stmt(stmts[1]) else {
            panic!("expected if with else");
        };
        assert!(matches!(b.ast().stmt(*then_branch), Statement::Compound { statements } if statements.len() == 1));
        assert!(matches!(b.ast().stmt(*else_branch), Statement::Compound { .. }));
    }

    #[test]
    fn test_if_body_declarations_are_scoped() {
        assert!(parse("if (1) t: int; output(0, t);").unwrap_err().is_semantic());
    }

    #[test]
    fn test_for_over_indexed_range() {
        let (b, stmts) = parse("s: int; for (i in 0:10:2) { s = s + i; }").unwrap();
        let Statement::For { header, .. } = b.ast().stmt(stmts[1]) else {
            panic!("expected for");
        };
        let Statement::ForHeader { range, .. } = b.ast().stmt(*header) else {
            panic!("expected for header");
        };
        assert_eq!(
            b.ast().expr(*range).kind,
            ExpressionKind::IndexedRange { begin: 0, end: 10, step: 2 }
        );
    }

    #[test]
    fn test_for_negative_bounds_and_zero_step() {
        assert!(parse("for (i in 10:-1:-1) output(0, i);").is_ok());
        let err = parse("for (i in 0:10:0) output(0, i);").unwrap_err();
        assert!(err.is_semantic());
    }

    #[test]
    fn test_for_over_array_uses_element_type() {
        assert!(parse("a: char[4]; c: char; for (x in a) c = x;").is_ok());
        assert!(parse("a: char[4]; n: int; for (x in a) n = x;").unwrap_err().is_semantic());
        assert!(parse("n: int; for (x in n) output(0, x);").unwrap_err().is_semantic());
    }

    #[test]
    fn test_induction_variable_not_visible_after_loop() {
        assert!(parse("for (i in 0:3) output(0, i); output(1, i);").unwrap_err().is_semantic());
    }

    #[test]
    fn test_while_loop() {
        let (b, stmts) = parse("n: int = 3; while (n > 0) n = n - 1;").unwrap();
        assert!(matches!(b.ast().stmt(stmts[1]), Statement::While { .. }));
    }

    #[test]
    fn test_subscript_assignment() {
        let (b, stmts) = parse("a: int[2]; a[1] = 5;").unwrap();
        let Statement::Assignment { expr } = b.ast().stmt(stmts[1]) else {
            panic!("expected assignment");
        };
        let ExpressionKind::Binary { op: BinaryOp::Assign, left, .. } = b.ast().expr(*expr).kind else {
            panic!("expected =");
        };
        assert!(matches!(
            b.ast().expr(left).kind,
            ExpressionKind::Binary { op: BinaryOp::Index, .. }
        ));
    }

    #[test]
    fn test_assignment_to_literal_fails() {
        let err = parse("1 = 2;").unwrap_err();
        assert_eq!(err.message(), "Invalid assignment target");
    }

    #[test]
    fn test_chained_assignment_is_syntax_error() {
        let err = parse("a: int; b: int; a[0] = b = 1;");
        assert!(err.is_err());
        let err = parse("p: {x}; q: int; p.x = q = 1;").unwrap_err();
        assert!(err.is_syntax());
    }

    #[test]
    fn test_return_type_mismatch_in_body() {
        let err = parse("f = { if (input(0)) return 1; return {1, 2}; };").unwrap_err();
        assert!(err.is_semantic());
        assert!(err.message().contains("Return type mismatch"));
    }

    #[test]
    fn test_missing_semicolon() {
        let err = parse("output(0, 1)").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.message(), "Unexpected end of file, expected ';' in output statement");
    }
}
