//! Type parsing for the layer language
//!
//! `int`, `int(N)`, `char`, `float`, `double`, `vector<T, N>` and inline
//! structs `{ name [: T], ... }`, each followed by any number of `[N]`
//! suffixes. The first suffix is the outermost dimension.

use crate::lexer::TokenType;
use crate::parser::Parser;
use crate::semantic::SemanticError;
use crate::types::{StructField, TypeId};
use log::trace;
use parasl_common::CompilerError;
use std::collections::HashSet;

impl Parser<'_> {
    /// Parse a full type, including array suffixes
    pub fn parse_type(&mut self) -> Result<TypeId, CompilerError> {
        let base = self.parse_base_type()?;

        let mut dimensions = Vec::new();
        while self.match_token(&TokenType::LeftBracket) {
            dimensions.push(self.expect_u32("array type")?);
            self.expect(TokenType::RightBracket, "array type")?;
        }

        // int[3][4]: three arrays of four
        let ty = dimensions
            .into_iter()
            .rev()
            .fold(base, |element, length| self.builder.types_mut().array_of(element, length));

        trace!("parsed type {}", self.builder.types().display(ty));
        Ok(ty)
    }

    fn parse_base_type(&mut self) -> Result<TypeId, CompilerError> {
        match self.peek_nth(0) {
            Some(TokenType::Int) => {
                self.advance();
                let bitwidth = if self.match_token(&TokenType::LeftParen) {
                    let bitwidth = self.expect_u32("integer width")?;
                    self.expect(TokenType::RightParen, "integer width")?;
                    bitwidth
                } else {
                    32
                };
                Ok(self.builder.types_mut().primitive_int(bitwidth))
            }
            Some(TokenType::Char) => {
                self.advance();
                Ok(self.builder.types().primitive_char())
            }
            Some(TokenType::Float) => {
                self.advance();
                Ok(self.builder.types().primitive_float())
            }
            Some(TokenType::Double) => {
                self.advance();
                Ok(self.builder.types().primitive_double())
            }
            Some(TokenType::Vector) => {
                self.advance();
                self.expect(TokenType::Less, "vector type")?;
                let element = self.parse_type()?;
                self.expect(TokenType::Comma, "vector type")?;
                let length = self.expect_u32("vector type")?;
                self.expect(TokenType::Greater, "vector type")?;
                Ok(self.builder.types_mut().vector_of(element, length))
            }
            Some(TokenType::LeftBrace) => self.parse_struct_type(),
            _ => Err(self.unexpected("type".to_string()).into()),
        }
    }

    /// `{ name [: T], ... }`; untyped fields are int(32)
    fn parse_struct_type(&mut self) -> Result<TypeId, CompilerError> {
        self.expect(TokenType::LeftBrace, "struct type")?;

        let mut fields = Vec::new();
        let mut seen = HashSet::new();
        loop {
            let location = self.current_location();
            let name = self.expect_identifier("struct field")?;
            if !seen.insert(name.clone()) {
                return Err(SemanticError::DuplicateField { name }.at(location));
            }

            let field_type = if self.match_token(&TokenType::Colon) {
                self.parse_type()?
            } else {
                self.builder.types_mut().primitive_int(32)
            };
            fields.push(StructField::new(name, field_type));

            if !self.match_token(&TokenType::Comma) {
                break;
            }
        }
        self.expect(TokenType::RightBrace, "struct type")?;

        Ok(self.builder.types_mut().struct_of(fields))
    }
}
