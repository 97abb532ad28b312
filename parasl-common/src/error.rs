//! Error handling for the parasl front end
//!
//! A parse ends either with a validated tree or with exactly one
//! `CompilerError`. Phase-local error enums (lexer, parser, semantic
//! builder) convert into it before crossing crate boundaries.

use crate::source_loc::{SourceLocation, SourceSpan};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main error type that encompasses all phases of the front end
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilerError {
    #[error("Lexical error at {location}: {message}")]
    LexError {
        location: SourceLocation,
        message: String,
    },

    #[error("Parse error at {location}: {message}")]
    ParseError {
        location: SourceLocation,
        message: String,
    },

    #[error("Semantic error at {location}: {message}")]
    SemanticError {
        location: SourceLocation,
        message: String,
    },

    #[error("IO error: {message}")]
    IoError { message: String },

    #[error("Internal compiler error: {message}")]
    InternalError { message: String },
}

impl CompilerError {
    /// Create a lexer error
    pub fn lexer_error(message: String, location: SourceLocation) -> Self {
        CompilerError::LexError { location, message }
    }

    /// Create a parse error
    pub fn parse_error(message: String, location: SourceLocation) -> Self {
        CompilerError::ParseError { location, message }
    }

    /// Create a semantic error
    pub fn semantic_error(message: String, location: SourceLocation) -> Self {
        CompilerError::SemanticError { location, message }
    }

    /// True for errors raised by the semantic builder
    pub fn is_semantic(&self) -> bool {
        matches!(self, CompilerError::SemanticError { .. })
    }

    /// True for syntax errors (lexical or grammatical)
    pub fn is_syntax(&self) -> bool {
        matches!(self, CompilerError::LexError { .. } | CompilerError::ParseError { .. })
    }

    /// Bare message without the phase and location prefix
    pub fn message(&self) -> &str {
        match self {
            CompilerError::LexError { message, .. }
            | CompilerError::ParseError { message, .. }
            | CompilerError::SemanticError { message, .. }
            | CompilerError::IoError { message }
            | CompilerError::InternalError { message } => message,
        }
    }

    /// Location of the error, if it has one
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            CompilerError::LexError { location, .. }
            | CompilerError::ParseError { location, .. }
            | CompilerError::SemanticError { location, .. } => Some(location),
            CompilerError::IoError { .. } | CompilerError::InternalError { .. } => None,
        }
    }

    /// Render as a user-facing diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let span = self
            .location()
            .cloned()
            .map(SourceSpan::from_location)
            .unwrap_or_else(|| SourceSpan::from_location(SourceLocation::dummy()));
        let diagnostic = Diagnostic::error(self.message().to_string(), span);
        match self {
            CompilerError::LexError { .. } => diagnostic.with_note("while reading tokens".to_string()),
            CompilerError::ParseError { .. } => diagnostic.with_note("syntax error".to_string()),
            CompilerError::SemanticError { .. } => diagnostic.with_note("semantic error".to_string()),
            _ => diagnostic,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A diagnostic message with location and severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: SourceSpan,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: String, span: SourceSpan) -> Self {
        Self {
            severity: Severity::Error,
            message,
            span,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.span, self.severity, self.message)?;

        for note in &self.notes {
            write!(f, "\n  note: {}", note)?;
        }

        Ok(())
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for CompilerError {
    fn from(err: std::io::Error) -> Self {
        CompilerError::IoError {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_includes_location() {
        let err = CompilerError::semantic_error(
            "Symbol \"b\" has not been declared in this scope".to_string(),
            SourceLocation::new("net.psl", 3, 5),
        );
        assert_eq!(
            err.to_string(),
            "Semantic error at net.psl:3:5: Symbol \"b\" has not been declared in this scope"
        );
        assert!(err.is_semantic());
        assert!(!err.is_syntax());
    }

    #[test]
    fn test_error_kinds() {
        let lex = CompilerError::lexer_error("bad".to_string(), SourceLocation::dummy());
        let parse = CompilerError::parse_error("bad".to_string(), SourceLocation::dummy());
        assert!(lex.is_syntax());
        assert!(parse.is_syntax());
        assert_eq!(parse.message(), "bad");
    }

    #[test]
    fn test_io_error_has_no_location() {
        let err: CompilerError = std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.location().is_none());
        assert_eq!(err.message(), "missing");
    }

    #[test]
    fn test_diagnostic_rendering() {
        let err = CompilerError::parse_error(
            "Expected ';' in declaration, found 'if'".to_string(),
            SourceLocation::new("net.psl", 1, 9),
        );
        let diag = err.to_diagnostic();
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.notes, vec!["syntax error".to_string()]);
        assert_eq!(
            diag.to_string(),
            "net.psl:1:9: error: Expected ';' in declaration, found 'if'\n  note: syntax error"
        );
    }
}
