//! Parse error types for the layer parser
//!
//! This module defines all error types that can occur during parsing.

use crate::lexer::Token;
use parasl_common::{CompilerError, SourceLocation};

/// Parse error types specific to the parser
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnexpectedToken {
        expected: String,
        found: Token,
    },
    UnexpectedEndOfFile {
        expected: String,
        location: SourceLocation,
    },
    InvalidSyntax {
        message: String,
        location: SourceLocation,
    },
}

impl From<ParseError> for CompilerError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::UnexpectedToken { expected, found } => CompilerError::parse_error(
                format!("Expected {}, found '{}'", expected, found.token_type),
                found.span.start,
            ),
            ParseError::UnexpectedEndOfFile { expected, location } => CompilerError::parse_error(
                format!("Unexpected end of file, expected {}", expected),
                location,
            ),
            ParseError::InvalidSyntax { message, location } => {
                CompilerError::parse_error(message, location)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenType;
    use parasl_common::SourceSpan;

    #[test]
    fn test_unexpected_token_message() {
        let found = Token::new(
            TokenType::If,
            SourceSpan::from_location(SourceLocation::new_simple(2, 4)),
        );
        let err: CompilerError = ParseError::UnexpectedToken {
            expected: "';' in declaration".to_string(),
            found,
        }
        .into();
        assert_eq!(err.message(), "Expected ';' in declaration, found 'if'");
        assert_eq!(err.location(), Some(&SourceLocation::new_simple(2, 4)));
    }

    #[test]
    fn test_end_of_file_message() {
        let err: CompilerError = ParseError::UnexpectedEndOfFile {
            expected: "')' in if condition".to_string(),
            location: SourceLocation::new_simple(1, 9),
        }
        .into();
        assert_eq!(err.message(), "Unexpected end of file, expected ')' in if condition");
    }
}
