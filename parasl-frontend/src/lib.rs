//! Parasl layer language - Frontend
//!
//! This crate turns layer source text into a semantically validated AST in
//! a single pass:
//! - Lexer: tokenizes layer source
//! - Parser: recursive descent over the token stream
//! - Semantic builder: constructs and validates every AST node
//! - Types: interning type store
//! - Printer: textual tree dump

pub mod lexer;
pub mod parser;
pub mod ast;
pub mod types;
pub mod semantic;
pub mod printer;

pub use lexer::{Lexer, Token, TokenType};
pub use parser::{ParseError, Parser};
pub use ast::{Ast, BinaryOp, ExprId, Expression, ExpressionKind, NodeRef, Statement, StmtId, UnaryOp};
pub use types::{PrimitiveKind, StructField, Type, TypeContext, TypeId};
pub use semantic::{Builder, Program, SemanticError};
pub use printer::TreePrinter;

use log::debug;
use parasl_common::CompilerError;

/// High-level frontend interface
pub struct Frontend;

impl Frontend {
    /// Parse layer source into a validated program
    pub fn parse_source(source: &str) -> Result<Program, CompilerError> {
        Self::parse_named(source, "<input>")
    }

    /// Parse layer source; error locations name `filename`
    pub fn parse_named(source: &str, filename: &str) -> Result<Program, CompilerError> {
        let tokens = Lexer::with_filename(source, filename).tokenize()?;
        debug!("{}: {} tokens", filename, tokens.len());

        let mut builder = Builder::new();
        let root = Parser::new(tokens, &mut builder).parse_layer()?;
        Ok(builder.finish(root))
    }

    /// Tokenize source code (for debugging)
    pub fn tokenize_source(source: &str) -> Result<Vec<Token>, CompilerError> {
        Lexer::new(source).tokenize()
    }
}
