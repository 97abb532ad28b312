//! Token definitions for the layer lexer
//!
//! This module defines token types and the Token struct.

use parasl_common::SourceSpan;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Layer language token types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TokenType {
    // Literals
    IntLiteral(u64),

    // Identifiers
    Identifier(String),

    // Keywords
    Layer, Input, Output, Repeat, Glue, Bind,
    If, Else, For, In, While, Return,
    Char, Int, Float, Double, Vector,

    // Operators
    Plus,           // +
    Minus,          // -
    Star,           // *
    Slash,          // /
    Bang,           // !
    Equal,          // =
    Less,           // <
    Greater,        // >
    Colon,          // :

    // Compound operators
    LessEqual,      // <=
    GreaterEqual,   // >=
    EqualEqual,     // ==
    BangEqual,      // !=
    AmpersandAmpersand, // &&
    PipePipe,       // ||

    // Delimiters
    LeftParen,      // (
    RightParen,     // )
    LeftBrace,      // {
    RightBrace,     // }
    LeftBracket,    // [
    RightBracket,   // ]
    Semicolon,      // ;
    Comma,          // ,
    Dot,            // .
    DotDot,         // ..

    // Special
    Newline,
    EndOfFile,

    // Comments (stripped by the parser)
    LineComment(String),
    BlockComment(String),
}

impl TokenType {
    /// Whitespace and comments that carry no grammar meaning
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenType::LineComment(_) | TokenType::BlockComment(_) | TokenType::Newline
        )
    }

    /// Keywords naming a primitive type
    pub fn is_primitive_type(&self) -> bool {
        matches!(
            self,
            TokenType::Int | TokenType::Char | TokenType::Float | TokenType::Double
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenType::IntLiteral(n) => write!(f, "{n}"),
            TokenType::Identifier(s) => write!(f, "{s}"),

            // Keywords
            TokenType::Layer => write!(f, "layer"),
            TokenType::Input => write!(f, "input"),
            TokenType::Output => write!(f, "output"),
            TokenType::Repeat => write!(f, "repeat"),
            TokenType::Glue => write!(f, "glue"),
            TokenType::Bind => write!(f, "bind"),
            TokenType::If => write!(f, "if"),
            TokenType::Else => write!(f, "else"),
            TokenType::For => write!(f, "for"),
            TokenType::In => write!(f, "in"),
            TokenType::While => write!(f, "while"),
            TokenType::Return => write!(f, "return"),
            TokenType::Char => write!(f, "char"),
            TokenType::Int => write!(f, "int"),
            TokenType::Float => write!(f, "float"),
            TokenType::Double => write!(f, "double"),
            TokenType::Vector => write!(f, "vector"),

            // Operators
            TokenType::Plus => write!(f, "+"),
            TokenType::Minus => write!(f, "-"),
            TokenType::Star => write!(f, "*"),
            TokenType::Slash => write!(f, "/"),
            TokenType::Bang => write!(f, "!"),
            TokenType::Equal => write!(f, "="),
            TokenType::Less => write!(f, "<"),
            TokenType::Greater => write!(f, ">"),
            TokenType::Colon => write!(f, ":"),
            TokenType::LessEqual => write!(f, "<="),
            TokenType::GreaterEqual => write!(f, ">="),
            TokenType::EqualEqual => write!(f, "=="),
            TokenType::BangEqual => write!(f, "!="),
            TokenType::AmpersandAmpersand => write!(f, "&&"),
            TokenType::PipePipe => write!(f, "||"),

            // Delimiters
            TokenType::LeftParen => write!(f, "("),
            TokenType::RightParen => write!(f, ")"),
            TokenType::LeftBrace => write!(f, "{{"),
            TokenType::RightBrace => write!(f, "}}"),
            TokenType::LeftBracket => write!(f, "["),
            TokenType::RightBracket => write!(f, "]"),
            TokenType::Semicolon => write!(f, ";"),
            TokenType::Comma => write!(f, ","),
            TokenType::Dot => write!(f, "."),
            TokenType::DotDot => write!(f, ".."),

            TokenType::Newline => write!(f, "newline"),
            TokenType::EndOfFile => write!(f, "end of file"),
            TokenType::LineComment(_) | TokenType::BlockComment(_) => write!(f, "comment"),
        }
    }
}

/// A token with its source span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub span: SourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, span: SourceSpan) -> Self {
        Self { token_type, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at {}", self.token_type, self.span.start)
    }
}
