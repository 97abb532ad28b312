//! Primary expression parsing

use crate::ast::ExprId;
use crate::lexer::TokenType;
use crate::parser::Parser;
use parasl_common::CompilerError;

impl Parser<'_> {
    /// Parse primary expression
    pub fn parse_primary_expression(&mut self) -> Result<ExprId, CompilerError> {
        let location = self.current_location();

        match self.peek_nth(0) {
            Some(&TokenType::IntLiteral(value)) => {
                self.advance();
                Ok(self.builder.literal(value))
            }
            Some(TokenType::Identifier(_)) => {
                let name = self.expect_identifier("expression")?;
                let reference = self.builder.reference(&name).map_err(|e| e.at(location))?;
                self.parse_postfix_chain(reference)
            }
            Some(TokenType::LeftParen) => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(TokenType::RightParen, "parenthesized expression")?;
                Ok(expr)
            }
            Some(TokenType::Input)
            | Some(TokenType::Repeat)
            | Some(TokenType::Glue)
            | Some(TokenType::Bind)
            | Some(TokenType::LeftBrace) => self.parse_entity_expression(),
            _ => Err(self.unexpected("expression".to_string()).into()),
        }
    }
}
