//! Postfix chains on names: `.field` and `[index]`

use crate::ast::ExprId;
use crate::lexer::TokenType;
use crate::parser::Parser;
use parasl_common::CompilerError;

impl Parser<'_> {
    /// Fold `.name` and `[expr]` segments left to right onto `base`
    pub fn parse_postfix_chain(&mut self, base: ExprId) -> Result<ExprId, CompilerError> {
        let mut expr = base;

        loop {
            let location = self.current_location();
            if self.match_token(&TokenType::Dot) {
                let field = self.expect_identifier("member access")?;
                expr = self
                    .builder
                    .member_access(expr, &field)
                    .map_err(|e| e.at(location))?;
            } else if self.match_token(&TokenType::LeftBracket) {
                let index = self.parse_expression()?;
                self.expect(TokenType::RightBracket, "subscript")?;
                expr = self
                    .builder
                    .subscript_access(expr, index)
                    .map_err(|e| e.at(location))?;
            } else {
                return Ok(expr);
            }
        }
    }
}
