//! Expression parsing for the layer language
//!
//! Precedence ladder, loosest first: `||`, `&&`, `== !=`, `< <= > >=`,
//! `+ -`, `* /`, a single optional prefix `+ - !`, then primaries.

mod binary;
mod unary;
mod primary;
mod postfix;
mod entity;

use crate::ast::ExprId;
use crate::parser::Parser;
use parasl_common::CompilerError;

impl Parser<'_> {
    /// Parse expression (top level)
    pub fn parse_expression(&mut self) -> Result<ExprId, CompilerError> {
        self.parse_logical_or_expression()
    }
}
