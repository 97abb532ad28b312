//! Layer language lexer
//!
//! Tokenizes layer source into a stream of tokens: keywords, identifiers,
//! unsigned integer literals, operators and delimiters. Whitespace inside a
//! line is skipped; newlines and comments are kept as trivia tokens and
//! dropped by the parser.

pub mod token;
pub mod literals;
pub mod operators;

pub use token::{Token, TokenType};

use log::trace;
use parasl_common::{CompilerError, SourceLocation, SourceSpan};
use std::collections::HashMap;

/// Layer language lexer
pub struct Lexer {
    pub(crate) input: Vec<char>,
    pub(crate) position: usize,
    pub(crate) line: u32,
    pub(crate) column: u32,
    filename: String,
    keywords: HashMap<&'static str, TokenType>,
}

impl Lexer {
    /// Create a new lexer over an anonymous buffer
    pub fn new(input: &str) -> Self {
        Self::with_filename(input, "<input>")
    }

    /// Create a new lexer whose locations name `filename`
    pub fn with_filename(input: &str, filename: &str) -> Self {
        let keywords = [
            ("layer", TokenType::Layer),
            ("input", TokenType::Input),
            ("output", TokenType::Output),
            ("repeat", TokenType::Repeat),
            ("glue", TokenType::Glue),
            ("bind", TokenType::Bind),
            ("if", TokenType::If),
            ("else", TokenType::Else),
            ("for", TokenType::For),
            ("in", TokenType::In),
            ("while", TokenType::While),
            ("return", TokenType::Return),
            ("char", TokenType::Char),
            ("int", TokenType::Int),
            ("float", TokenType::Float),
            ("double", TokenType::Double),
            ("vector", TokenType::Vector),
        ];

        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            filename: filename.to_string(),
            keywords: keywords.into_iter().collect(),
        }
    }

    /// Get current character
    pub(crate) fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    pub(crate) fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    /// Advance to next character
    pub(crate) fn advance(&mut self) -> Option<char> {
        let ch = self.current_char()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Get current location
    pub(crate) fn current_location(&self) -> SourceLocation {
        SourceLocation::new(&self.filename, self.line, self.column)
    }

    /// Skip whitespace (except newlines)
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() && ch != '\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Tokenize an identifier or keyword
    fn tokenize_identifier(&mut self) -> TokenType {
        let mut identifier = String::new();

        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                identifier.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        match self.keywords.get(identifier.as_str()) {
            Some(keyword) => keyword.clone(),
            None => TokenType::Identifier(identifier),
        }
    }

    /// Consume `second` if it follows, choosing between a two-character and
    /// a one-character token
    fn one_or_two(&mut self, second: char, double: TokenType, single: TokenType) -> TokenType {
        self.advance();
        if self.current_char() == Some(second) {
            self.advance();
            double
        } else {
            single
        }
    }

    /// Get next token
    pub fn next_token(&mut self) -> Result<Token, CompilerError> {
        self.skip_whitespace();

        let start_location = self.current_location();

        let token_type = match self.current_char() {
            None => TokenType::EndOfFile,

            Some('\n') => {
                self.advance();
                TokenType::Newline
            }

            Some(ch) if ch.is_alphabetic() || ch == '_' => self.tokenize_identifier(),

            Some(ch) if ch.is_ascii_digit() => self.tokenize_integer()?,

            Some('/') => {
                if self.peek_char(1) == Some('/') {
                    self.tokenize_line_comment()
                } else if self.peek_char(1) == Some('*') {
                    self.tokenize_block_comment()?
                } else {
                    self.advance();
                    TokenType::Slash
                }
            }

            Some('&') => {
                if self.peek_char(1) == Some('&') {
                    self.advance();
                    self.advance();
                    TokenType::AmpersandAmpersand
                } else {
                    return Err(CompilerError::lexer_error(
                        "Unexpected character: & (did you mean &&?)".to_string(),
                        start_location,
                    ));
                }
            }

            Some('|') => {
                if self.peek_char(1) == Some('|') {
                    self.advance();
                    self.advance();
                    TokenType::PipePipe
                } else {
                    return Err(CompilerError::lexer_error(
                        "Unexpected character: | (did you mean ||?)".to_string(),
                        start_location,
                    ));
                }
            }

            Some('!') => self.one_or_two('=', TokenType::BangEqual, TokenType::Bang),
            Some('=') => self.one_or_two('=', TokenType::EqualEqual, TokenType::Equal),
            Some('<') => self.one_or_two('=', TokenType::LessEqual, TokenType::Less),
            Some('>') => self.one_or_two('=', TokenType::GreaterEqual, TokenType::Greater),
            Some('.') => self.one_or_two('.', TokenType::DotDot, TokenType::Dot),

            Some('+') => { self.advance(); TokenType::Plus }
            Some('-') => { self.advance(); TokenType::Minus }
            Some('*') => { self.advance(); TokenType::Star }
            Some(':') => { self.advance(); TokenType::Colon }
            Some('(') => { self.advance(); TokenType::LeftParen }
            Some(')') => { self.advance(); TokenType::RightParen }
            Some('{') => { self.advance(); TokenType::LeftBrace }
            Some('}') => { self.advance(); TokenType::RightBrace }
            Some('[') => { self.advance(); TokenType::LeftBracket }
            Some(']') => { self.advance(); TokenType::RightBracket }
            Some(';') => { self.advance(); TokenType::Semicolon }
            Some(',') => { self.advance(); TokenType::Comma }

            Some(ch) => {
                return Err(CompilerError::lexer_error(
                    format!("Unexpected character: {}", ch),
                    start_location,
                ));
            }
        };

        let end_location = self.current_location();
        let span = SourceSpan::new(start_location, end_location);

        Ok(Token::new(token_type, span))
    }

    /// Tokenize entire input into a vector of tokens
    pub fn tokenize(&mut self) -> Result<Vec<Token>, CompilerError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = matches!(token.token_type, TokenType::EndOfFile);
            tokens.push(token);

            if is_eof {
                break;
            }
        }

        trace!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }
}
