//! Entity expressions: `input`, `repeat`, `glue`, `bind`, initializer
//! lists and function bodies

use crate::ast::ExprId;
use crate::lexer::TokenType;
use crate::parser::{ParseError, Parser};
use crate::types::Type;
use parasl_common::CompilerError;

impl Parser<'_> {
    /// Parse an entity expression
    pub fn parse_entity_expression(&mut self) -> Result<ExprId, CompilerError> {
        match self.peek_nth(0) {
            Some(TokenType::Input) => self.parse_input_expression(),
            Some(TokenType::Repeat) => self.parse_repeat_expression(),
            Some(TokenType::Glue) => self.parse_glue_expression(),
            Some(TokenType::Bind) => self.parse_bind_expression(),
            Some(TokenType::LeftBrace) if self.is_function_body() => self.parse_function_body(),
            Some(TokenType::LeftBrace) => self.parse_initializer_list(),
            _ => Err(self.unexpected("entity expression".to_string()).into()),
        }
    }

    /// Decide, by lookahead only, whether the `{` at the current position
    /// opens a function body rather than an initializer list.
    fn is_function_body(&self) -> bool {
        match (self.peek_nth(1), self.peek_nth(2)) {
            (Some(TokenType::RightBrace), _) => return true,
            (
                Some(
                    TokenType::If
                    | TokenType::For
                    | TokenType::While
                    | TokenType::Output
                    | TokenType::Return,
                ),
                _,
            ) => return true,
            (Some(TokenType::Identifier(_)), Some(TokenType::Colon | TokenType::Equal)) => {
                return true
            }
            _ => {}
        }

        // A `;` directly inside these braces means statements
        let mut depth = 0usize;
        for token_type in self.tokens.iter().skip(1).map(|t| &t.token_type) {
            match token_type {
                TokenType::LeftBrace | TokenType::LeftParen | TokenType::LeftBracket => depth += 1,
                TokenType::RightBrace if depth == 0 => return false,
                TokenType::RightBrace | TokenType::RightParen | TokenType::RightBracket => {
                    depth = depth.saturating_sub(1)
                }
                TokenType::Semicolon if depth == 0 => return true,
                TokenType::EndOfFile => return false,
                _ => {}
            }
        }
        false
    }

    /// True when the token after a `:` starts a type rather than a name
    fn colon_starts_type(&self) -> bool {
        matches!(self.peek_nth(0), Some(TokenType::Colon))
            && matches!(
                self.peek_nth(1),
                Some(
                    TokenType::Int
                        | TokenType::Char
                        | TokenType::Float
                        | TokenType::Double
                        | TokenType::Vector
                        | TokenType::LeftBrace
                )
            )
    }

    /// `input(N)`, `input(N): T`, `input(N..M): T[K]`
    fn parse_input_expression(&mut self) -> Result<ExprId, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::Input, "input expression")?;
        self.expect(TokenType::LeftParen, "input expression")?;
        let begin = self.expect_u32("input expression")?;

        if self.match_token(&TokenType::DotDot) {
            let end = self.expect_u32("input range")?;
            self.expect(TokenType::RightParen, "input range")?;
            self.expect(TokenType::Colon, "input range")?;

            let type_location = self.current_location();
            let array = self.parse_type()?;
            let (element, length) = match self.builder.types().get(array) {
                Type::Array { element, length } => (*element, *length),
                _ => {
                    return Err(ParseError::InvalidSyntax {
                        message: format!(
                            "input range requires an array type, found {}",
                            self.builder.types().display(array)
                        ),
                        location: type_location,
                    }
                    .into())
                }
            };

            return self
                .builder
                .input_range(begin, end, element, length)
                .map_err(|e| e.at(location));
        }

        self.expect(TokenType::RightParen, "input expression")?;
        let ty = if self.colon_starts_type() {
            self.advance();
            Some(self.parse_type()?)
        } else {
            None
        };

        self.builder.input(begin, ty).map_err(|e| e.at(location))
    }

    /// `repeat(expr, N)`
    fn parse_repeat_expression(&mut self) -> Result<ExprId, CompilerError> {
        self.expect(TokenType::Repeat, "repeat expression")?;
        self.expect(TokenType::LeftParen, "repeat expression")?;
        let element = self.parse_expression()?;
        self.expect(TokenType::Comma, "repeat expression")?;
        let count = self.expect_u32("repeat expression")?;
        self.expect(TokenType::RightParen, "repeat expression")?;
        Ok(self.builder.repeat_expr(element, count))
    }

    /// `glue(expr [: name], ...)`; `glue()` is the empty struct
    fn parse_glue_expression(&mut self) -> Result<ExprId, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::Glue, "glue expression")?;
        self.expect(TokenType::LeftParen, "glue expression")?;

        let mut members = Vec::new();
        if !self.check(&TokenType::RightParen) {
            loop {
                let value = self.parse_expression()?;
                let name = if self.match_token(&TokenType::Colon) {
                    Some(self.expect_identifier("glue member name")?)
                } else {
                    None
                };
                members.push((value, name));

                if !self.match_token(&TokenType::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenType::RightParen, "glue expression")?;

        self.builder.glue(members).map_err(|e| e.at(location))
    }

    /// `bind(name, expr, ...)`
    fn parse_bind_expression(&mut self) -> Result<ExprId, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::Bind, "bind expression")?;
        self.expect(TokenType::LeftParen, "bind expression")?;
        let name = self.expect_identifier("bind expression")?;

        let mut args = Vec::new();
        while self.match_token(&TokenType::Comma) {
            args.push(self.parse_expression()?);
        }
        self.expect(TokenType::RightParen, "bind expression")?;

        self.builder.bind(&name, args).map_err(|e| e.at(location))
    }

    /// `{ e1, e2, ... }`
    fn parse_initializer_list(&mut self) -> Result<ExprId, CompilerError> {
        let location = self.current_location();
        self.expect(TokenType::LeftBrace, "initializer list")?;

        let mut elements = vec![self.parse_expression()?];
        while self.match_token(&TokenType::Comma) {
            elements.push(self.parse_expression()?);
        }
        self.expect(TokenType::RightBrace, "initializer list")?;

        self.builder
            .initializer_list(elements)
            .map_err(|e| e.at(location))
    }

    /// `{ statements }` as a function-like entity
    fn parse_function_body(&mut self) -> Result<ExprId, CompilerError> {
        let location = self.current_location();
        self.builder.begin_function();
        let body = self.parse_block()?;
        self.builder.finish_function(body).map_err(|e| e.at(location))
    }
}
