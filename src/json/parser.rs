//! Recursive descent JSON parser.
//!
//! Pulls tokens from a [`Lexer`] and builds a [`JsonValue`] tree. The first
//! error aborts the parse and is returned to the caller; there is no recovery.
//!
//! Grammar policy beyond plain JSON is taken from [`Limits`]: whether content
//! may follow the root value, and whether repeated object keys are kept or
//! rejected.

use std::collections::HashSet;

use super::lexer::{Lexer, Token};
use super::limits::{DuplicateKeys, Limits};
use super::types::{JsonValue, Property};
use crate::error::{ErrorCode, JsonResult};

/// JSON parser over a single input buffer.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    limits: Limits,
    depth: u64,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given input.
    pub fn new(input: &'a [u8], limits: Limits) -> JsonResult<Self> {
        let lexer = Lexer::new(input, limits)?;
        Ok(Self {
            lexer,
            limits,
            depth: 0,
        })
    }

    /// Parse the root value.
    pub fn parse(&mut self) -> JsonResult<JsonValue> {
        let value = self.parse_value()?;

        if !self.limits.allow_trailing_content && self.lexer.token() != &Token::EndOfFile {
            return Err(ErrorCode::E202_TrailingContent(self.lexer.span().start));
        }

        Ok(value)
    }

    fn unexpected(&self, expected: &'static str) -> ErrorCode {
        ErrorCode::E200_UnexpectedToken {
            found: self.lexer.token().kind(),
            expected,
            offset: self.lexer.span().start,
        }
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> JsonResult<JsonValue> {
        let value = match self.lexer.token() {
            Token::LeftBrace => return self.parse_object(),
            Token::LeftBracket => return self.parse_array(),
            Token::String(_) => return self.parse_string("a value").map(JsonValue::String),
            Token::Number(n) => JsonValue::Number(*n),
            Token::True => JsonValue::Bool(true),
            Token::False => JsonValue::Bool(false),
            Token::Null => JsonValue::Null,
            Token::EndOfFile
            | Token::RightBracket
            | Token::RightBrace
            | Token::Colon
            | Token::Comma => return Err(self.unexpected("a value")),
        };
        self.lexer.advance()?;
        Ok(value)
    }

    fn parse_string(&mut self, expected: &'static str) -> JsonResult<String> {
        match self.lexer.take_string()? {
            Some(text) => Ok(text.into_owned()),
            None => Err(self.unexpected(expected)),
        }
    }

    fn enter(&mut self) -> JsonResult<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            return Err(ErrorCode::E301_NestingTooDeep(
                self.depth,
                self.limits.max_nesting_depth,
            ));
        }
        Ok(())
    }

    /// Parse a JSON object.
    fn parse_object(&mut self) -> JsonResult<JsonValue> {
        self.enter()?;

        // Consume opening brace
        self.lexer.advance()?;

        let mut properties = Vec::new();
        let mut seen = HashSet::new();

        // Empty object
        if self.lexer.token() == &Token::RightBrace {
            self.lexer.advance()?;
            self.depth -= 1;
            return Ok(JsonValue::Object(properties));
        }

        loop {
            let key_offset = self.lexer.span().start;
            let name = self.parse_string("a string key")?;

            if self.limits.duplicate_keys == DuplicateKeys::Reject && !seen.insert(name.clone()) {
                return Err(ErrorCode::E203_DuplicateKey {
                    key: name,
                    offset: key_offset,
                });
            }

            if self.lexer.token() != &Token::Colon {
                return Err(self.unexpected("`:`"));
            }
            self.lexer.advance()?;

            let value = self.parse_value()?;
            properties.push(Property { name, value });

            if properties.len() as u64 > self.limits.max_object_fields {
                return Err(ErrorCode::E303_TooManyFields(
                    properties.len() as u64,
                    self.limits.max_object_fields,
                ));
            }

            match self.lexer.token() {
                Token::Comma => {
                    let comma = self.lexer.span().start;
                    self.lexer.advance()?;
                    if self.lexer.token() == &Token::RightBrace {
                        return Err(ErrorCode::E201_TrailingComma(comma));
                    }
                }
                Token::RightBrace => {
                    self.lexer.advance()?;
                    break;
                }
                _ => return Err(self.unexpected("`,` or `}`")),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Object(properties))
    }

    /// Parse a JSON array.
    fn parse_array(&mut self) -> JsonResult<JsonValue> {
        self.enter()?;

        // Consume opening bracket
        self.lexer.advance()?;

        let mut items = Vec::new();

        // Empty array
        if self.lexer.token() == &Token::RightBracket {
            self.lexer.advance()?;
            self.depth -= 1;
            return Ok(JsonValue::Array(items));
        }

        loop {
            items.push(self.parse_value()?);

            if items.len() as u64 > self.limits.max_array_length {
                return Err(ErrorCode::E304_ArrayTooLong(
                    items.len() as u64,
                    self.limits.max_array_length,
                ));
            }

            match self.lexer.token() {
                Token::Comma => {
                    let comma = self.lexer.span().start;
                    self.lexer.advance()?;
                    if self.lexer.token() == &Token::RightBracket {
                        return Err(ErrorCode::E201_TrailingComma(comma));
                    }
                }
                Token::RightBracket => {
                    self.lexer.advance()?;
                    break;
                }
                _ => return Err(self.unexpected("`,` or `]`")),
            }
        }

        self.depth -= 1;
        Ok(JsonValue::Array(items))
    }
}

/// Parse a JSON document with the default [`Limits`].
///
/// Accepts anything viewable as bytes (`&str`, `&[u8]`, `String`, ...).
pub fn parse<T: AsRef<[u8]> + ?Sized>(input: &T) -> JsonResult<JsonValue> {
    parse_with_limits(input, Limits::default())
}

/// Parse a JSON document with custom limits.
pub fn parse_with_limits<T: AsRef<[u8]> + ?Sized>(
    input: &T,
    limits: Limits,
) -> JsonResult<JsonValue> {
    let input = input.as_ref();
    tracing::debug!(len = input.len(), "parsing JSON input");

    let result = Parser::new(input, limits).and_then(|mut parser| parser.parse());
    match &result {
        Ok(value) => tracing::debug!(root = value.type_name(), "parsed JSON input"),
        Err(err) => tracing::debug!(code = err.code(), offset = ?err.offset(), %err, "rejected JSON input"),
    }
    result
}
