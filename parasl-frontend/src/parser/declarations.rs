//! Declaration parsing: `name [: Type] [= initializer];`

use crate::ast::StmtId;
use crate::lexer::TokenType;
use crate::parser::Parser;
use crate::semantic::DeclOutcome;
use parasl_common::CompilerError;

impl Parser<'_> {
    /// True when the current tokens start a declaration
    pub(crate) fn is_declaration_start(&self) -> bool {
        self.check_identifier()
            && matches!(
                self.peek_nth(1),
                Some(TokenType::Colon | TokenType::Equal | TokenType::Semicolon)
            )
    }

    /// Parse a declaration. A name that is already visible turns the
    /// declaration into an assignment statement.
    pub fn parse_declaration(&mut self) -> Result<StmtId, CompilerError> {
        let location = self.current_location();
        let name = self.expect_identifier("declaration")?;

        let ty = if self.match_token(&TokenType::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        // The initializer is built before the name is bound
        let init = if self.match_token(&TokenType::Equal) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect(TokenType::Semicolon, "declaration")?;

        let outcome = self
            .builder
            .declaration(&name, ty, init)
            .map_err(|e| e.at(location))?;

        Ok(match outcome {
            DeclOutcome::Declared(stmt) => stmt,
            DeclOutcome::Assigned(expr) => self.builder.assign_statement(expr),
        })
    }
}
