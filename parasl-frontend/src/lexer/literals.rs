//! Literal scanning for the layer lexer
//!
//! The language only has unsigned decimal integer literals; signs are
//! unary operators handled by the parser.

use crate::lexer::{Lexer, TokenType};
use parasl_common::CompilerError;

impl Lexer {
    /// Tokenize an integer literal
    pub fn tokenize_integer(&mut self) -> Result<TokenType, CompilerError> {
        let start = self.current_location();
        let mut number = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        // `12abc` is neither a number nor an identifier
        if let Some(ch) = self.current_char() {
            if ch.is_alphabetic() || ch == '_' {
                return Err(CompilerError::lexer_error(
                    format!("Invalid suffix '{}' on integer literal {}", ch, number),
                    self.current_location(),
                ));
            }
        }

        let value = number.parse::<u64>().map_err(|_| {
            CompilerError::lexer_error(format!("Integer literal out of range: {}", number), start)
        })?;

        Ok(TokenType::IntLiteral(value))
    }
}
