//! Unary expression parsing

use crate::ast::{ExprId, UnaryOp};
use crate::lexer::TokenType;
use crate::parser::Parser;
use parasl_common::CompilerError;

impl Parser<'_> {
    /// Parse unary expression: at most one prefix operator
    pub fn parse_unary_expression(&mut self) -> Result<ExprId, CompilerError> {
        let op = match self.peek_nth(0) {
            Some(TokenType::Plus) => UnaryOp::Plus,
            Some(TokenType::Minus) => UnaryOp::Minus,
            Some(TokenType::Bang) => UnaryOp::LogicalNot,
            _ => return self.parse_primary_expression(),
        };

        self.advance();
        let operand = self.parse_primary_expression()?;
        Ok(self.builder.unary_op(op, operand))
    }
}
