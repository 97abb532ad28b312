//! Binary expression parsing with operator precedence

use crate::ast::{BinaryOp, ExprId};
use crate::lexer::TokenType;
use crate::parser::Parser;
use parasl_common::CompilerError;

impl<'b> Parser<'b> {
    /// One left-associative precedence level: `next (op next)*`
    fn parse_binary_level(
        &mut self,
        operators: &[(TokenType, BinaryOp)],
        next: fn(&mut Parser<'b>) -> Result<ExprId, CompilerError>,
    ) -> Result<ExprId, CompilerError> {
        let mut left = next(self)?;

        loop {
            let location = self.current_location();
            let op = match self.peek_nth(0) {
                Some(current) => operators
                    .iter()
                    .find(|(token_type, _)| token_type == current)
                    .map(|(_, op)| *op),
                None => None,
            };
            let Some(op) = op else {
                break;
            };

            self.advance();
            let right = next(self)?;
            left = self
                .builder
                .binary_op(left, right, op)
                .map_err(|e| e.at(location))?;
        }

        Ok(left)
    }

    /// Parse logical OR expression
    pub fn parse_logical_or_expression(&mut self) -> Result<ExprId, CompilerError> {
        self.parse_binary_level(
            &[(TokenType::PipePipe, BinaryOp::LogicalOr)],
            Self::parse_logical_and_expression,
        )
    }

    /// Parse logical AND expression
    pub fn parse_logical_and_expression(&mut self) -> Result<ExprId, CompilerError> {
        self.parse_binary_level(
            &[(TokenType::AmpersandAmpersand, BinaryOp::LogicalAnd)],
            Self::parse_equality_expression,
        )
    }

    /// Parse equality expression
    pub fn parse_equality_expression(&mut self) -> Result<ExprId, CompilerError> {
        self.parse_binary_level(
            &[
                (TokenType::EqualEqual, BinaryOp::Equal),
                (TokenType::BangEqual, BinaryOp::NotEqual),
            ],
            Self::parse_relational_expression,
        )
    }

    /// Parse relational expression
    pub fn parse_relational_expression(&mut self) -> Result<ExprId, CompilerError> {
        self.parse_binary_level(
            &[
                (TokenType::Less, BinaryOp::Less),
                (TokenType::LessEqual, BinaryOp::LessEqual),
                (TokenType::Greater, BinaryOp::Greater),
                (TokenType::GreaterEqual, BinaryOp::GreaterEqual),
            ],
            Self::parse_additive_expression,
        )
    }

    /// Parse additive expression
    pub fn parse_additive_expression(&mut self) -> Result<ExprId, CompilerError> {
        self.parse_binary_level(
            &[
                (TokenType::Plus, BinaryOp::Add),
                (TokenType::Minus, BinaryOp::Sub),
            ],
            Self::parse_multiplicative_expression,
        )
    }

    /// Parse multiplicative expression
    pub fn parse_multiplicative_expression(&mut self) -> Result<ExprId, CompilerError> {
        self.parse_binary_level(
            &[
                (TokenType::Star, BinaryOp::Mul),
                (TokenType::Slash, BinaryOp::Div),
            ],
            Self::parse_unary_expression,
        )
    }
}
