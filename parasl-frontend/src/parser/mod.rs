//! Layer language recursive descent parser
//!
//! Parses layer tokens straight into the arena AST. The parser owns no
//! nodes: every completed production is handed to the semantic `Builder`,
//! which validates it and returns a handle that the parser embeds in the
//! next production up. A failure at any step aborts the parse.

pub mod errors;
pub mod types;
pub mod declarations;
pub mod statements;
pub mod expressions;

use crate::ast::StmtId;
use crate::lexer::{Token, TokenType};
use crate::semantic::Builder;
use log::debug;
use parasl_common::{CompilerError, SourceLocation};
use std::collections::VecDeque;

pub use errors::ParseError;

/// Layer parser
pub struct Parser<'b> {
    pub(crate) tokens: VecDeque<Token>,
    pub(crate) builder: &'b mut Builder,
    eof_location: SourceLocation,
}

impl<'b> Parser<'b> {
    /// Create a new parser that builds into `builder`
    pub fn new(tokens: Vec<Token>, builder: &'b mut Builder) -> Self {
        let eof_location = tokens
            .last()
            .map(|t| t.span.start.clone())
            .unwrap_or_else(SourceLocation::dummy);

        // Comments and newlines carry no grammar
        let filtered_tokens: VecDeque<Token> = tokens
            .into_iter()
            .filter(|t| !t.token_type.is_trivia())
            .collect();

        Self {
            tokens: filtered_tokens,
            builder,
            eof_location,
        }
    }

    /// Peek at current token without consuming
    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    /// Peek `n` tokens ahead (0 is the current token)
    pub(crate) fn peek_nth(&self, n: usize) -> Option<&TokenType> {
        self.tokens.get(n).map(|t| &t.token_type)
    }

    /// Get current token and advance
    pub(crate) fn advance(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Check if current token matches expected type
    pub(crate) fn check(&self, token_type: &TokenType) -> bool {
        match self.peek() {
            Some(token) => std::mem::discriminant(&token.token_type) == std::mem::discriminant(token_type),
            None => matches!(token_type, TokenType::EndOfFile),
        }
    }

    /// Check if current token is an identifier
    pub(crate) fn check_identifier(&self) -> bool {
        matches!(self.peek_nth(0), Some(TokenType::Identifier(_)))
    }

    /// Consume token if it matches expected type
    pub(crate) fn match_token(&mut self, token_type: &TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Error for the current token not matching `expected`
    pub(crate) fn unexpected(&self, expected: String) -> ParseError {
        match self.peek() {
            Some(token) if token.token_type != TokenType::EndOfFile => ParseError::UnexpectedToken {
                expected,
                found: token.clone(),
            },
            _ => ParseError::UnexpectedEndOfFile {
                expected,
                location: self.current_location(),
            },
        }
    }

    /// Expect and consume a specific token type
    pub(crate) fn expect(&mut self, token_type: TokenType, context: &str) -> Result<Token, ParseError> {
        if self.check(&token_type) && !self.check(&TokenType::EndOfFile) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.unexpected(format!("'{}' in {}", token_type, context)))
    }

    /// Expect an identifier and return its name
    pub(crate) fn expect_identifier(&mut self, context: &str) -> Result<String, ParseError> {
        if let Some(TokenType::Identifier(name)) = self.peek_nth(0) {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.unexpected(format!("identifier in {}", context)))
        }
    }

    /// Expect an unsigned integer literal that fits in 32 bits
    pub(crate) fn expect_u32(&mut self, context: &str) -> Result<u32, ParseError> {
        let location = self.current_location();
        if let Some(&TokenType::IntLiteral(value)) = self.peek_nth(0) {
            self.advance();
            u32::try_from(value).map_err(|_| ParseError::InvalidSyntax {
                message: format!("Integer {} is too large in {}", value, context),
                location,
            })
        } else {
            Err(self.unexpected(format!("integer literal in {}", context)))
        }
    }

    /// Get current location for error reporting
    pub(crate) fn current_location(&self) -> SourceLocation {
        match self.peek() {
            Some(token) => token.span.start.clone(),
            None => self.eof_location.clone(),
        }
    }

    /// Run `parse` inside a fresh scope. The scope is closed on the error
    /// path too.
    pub(crate) fn scoped<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, CompilerError>,
    ) -> Result<T, CompilerError> {
        self.builder.enter_scope();
        let result = parse(self);
        self.builder.exit_scope();
        result
    }

    /// Parse a whole layer: statements until end of input. Returns the root
    /// compound statement.
    pub fn parse_layer(&mut self) -> Result<StmtId, CompilerError> {
        let mut statements = Vec::new();

        while !self.check(&TokenType::EndOfFile) {
            statements.push(self.parse_statement()?);
        }

        debug!("parsed layer with {} top-level statements", statements.len());
        Ok(self.builder.compound_statement(statements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExpressionKind, Statement};
    use crate::lexer::Lexer;

    fn parse(input: &str) -> Result<(Builder, StmtId), CompilerError> {
        let tokens = Lexer::new(input).tokenize()?;
        let mut builder = Builder::new();
        let root = Parser::new(tokens, &mut builder).parse_layer()?;
        Ok((builder, root))
    }

    #[test]
    fn test_empty_layer() {
        let (builder, root) = parse("// nothing here\n").unwrap();
        assert_eq!(
            builder.ast().stmt(root),
            &Statement::Compound { statements: vec![] }
        );
    }

    #[test]
    fn test_round_trip_structure() {
        let (builder, root) = parse("a: int = 1 + 2;\noutput(0, a);").unwrap();
        let ast = builder.ast();

        let Statement::Compound { statements } = ast.stmt(root) else {
            panic!("root is not a compound statement");
        };
        assert_eq!(statements.len(), 2);

        let Statement::Declaration { ident, initializer: Some(init) } = ast.stmt(statements[0]) else {
            panic!("expected a declaration");
        };
        assert_eq!(ast.symbol_name(*ident), Some("a"));
        assert!(matches!(ast.expr(*init).kind, ExpressionKind::Binary { .. }));

        let Statement::Output { port: 0, value } = ast.stmt(statements[1]) else {
            panic!("expected an output statement");
        };
        assert!(matches!(ast.expr(*value).kind, ExpressionKind::Reference { target } if target == *ident));
    }

    #[test]
    fn test_expect_reports_context() {
        let err = parse("a: int = 1").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.message(), "Unexpected end of file, expected ';' in declaration");
    }

    #[test]
    fn test_scope_closed_after_error() {
        let tokens = Lexer::new("{ x = 1; y = ; }").tokenize().unwrap();
        let mut builder = Builder::new();
        let result = Parser::new(tokens, &mut builder).parse_layer();
        assert!(result.is_err());
        assert_eq!(builder.symbols().depth(), 1);
    }

    #[test]
    fn test_literal_too_large_for_length() {
        let err = parse("a: int[99999999999];").unwrap_err();
        assert!(err.message().contains("too large"));
    }
}
