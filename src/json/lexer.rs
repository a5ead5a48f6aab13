//! JSON lexer/tokenizer.
//!
//! Scans the input one code point at a time and produces tokens on demand.
//! A lexer is primed on construction: [`Lexer::new`] already holds the first
//! token, and each [`Lexer::advance`] replaces it with the next one. There is
//! exactly one token of lookahead and no pushback.
//!
//! The input is taken as bytes. Lexing covers the longest valid UTF-8 prefix;
//! an invalid or truncated sequence reads as end of input.

use std::borrow::Cow;
use std::fmt;
use std::ops::Range;

use unicode_general_category::{get_general_category, GeneralCategory};

use super::limits::Limits;
use crate::error::{ErrorCode, JsonResult};

/// Token kinds, without payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input
    EndOfFile,
    /// Left bracket `[`
    LeftBracket,
    /// Left brace `{`
    LeftBrace,
    /// Right bracket `]`
    RightBracket,
    /// Right brace `}`
    RightBrace,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// True literal
    True,
    /// False literal
    False,
    /// Null literal
    Null,
    /// Number literal
    Number,
    /// String literal
    String,
}

/// Keyword spellings, keyed by the token they produce.
pub static KEYWORDS: [(Token<'static>, &str); 3] = [
    (Token::True, "true"),
    (Token::False, "false"),
    (Token::Null, "null"),
];

impl TokenKind {
    /// Spelling of a keyword kind, None for every other kind.
    pub fn keyword(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(token, _)| token.kind() == self)
            .map(|(_, text)| *text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::EndOfFile => "end of input",
            TokenKind::LeftBracket => "`[`",
            TokenKind::LeftBrace => "`{`",
            TokenKind::RightBracket => "`]`",
            TokenKind::RightBrace => "`}`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::True => "`true`",
            TokenKind::False => "`false`",
            TokenKind::Null => "`null`",
            TokenKind::Number => "number",
            TokenKind::String => "string",
        };
        f.write_str(text)
    }
}

/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// End of input; every later request yields this again
    EndOfFile,
    /// Left bracket `[`
    LeftBracket,
    /// Left brace `{`
    LeftBrace,
    /// Right bracket `]`
    RightBracket,
    /// Right brace `}`
    RightBrace,
    /// Colon `:`
    Colon,
    /// Comma `,`
    Comma,
    /// True literal
    True,
    /// False literal
    False,
    /// Null literal
    Null,
    /// Number value
    Number(f64),
    /// String value with escapes decoded; borrows the input when it had none
    String(Cow<'a, str>),
}

impl Token<'_> {
    /// The kind of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::EndOfFile => TokenKind::EndOfFile,
            Token::LeftBracket => TokenKind::LeftBracket,
            Token::LeftBrace => TokenKind::LeftBrace,
            Token::RightBracket => TokenKind::RightBracket,
            Token::RightBrace => TokenKind::RightBrace,
            Token::Colon => TokenKind::Colon,
            Token::Comma => TokenKind::Comma,
            Token::True => TokenKind::True,
            Token::False => TokenKind::False,
            Token::Null => TokenKind::Null,
            Token::Number(_) => TokenKind::Number,
            Token::String(_) => TokenKind::String,
        }
    }
}

/// Insignificant whitespace between tokens.
///
/// Tab, line tabulation, form feed, byte order mark, and every Unicode space
/// separator (which includes space and no-break space).
pub fn is_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\u{000B}' | '\u{000C}' | '\u{FEFF}')
        || get_general_category(c) == GeneralCategory::SpaceSeparator
}

/// Line and paragraph separators, also skipped between tokens.
pub fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// JSON lexer that tokenizes input.
pub struct Lexer<'a> {
    source: &'a str,
    // Offset of the code point after `code_point`.
    current: usize,
    start: usize,
    // Offset of `code_point`.
    end: usize,
    code_point: Option<char>,
    token: Token<'a>,
    limits: Limits,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at the first token of `input`.
    pub fn new(input: &'a [u8], limits: Limits) -> JsonResult<Self> {
        if input.len() as u64 > limits.max_input_size {
            return Err(ErrorCode::E300_InputTooLarge(
                input.len() as u64,
                limits.max_input_size,
            ));
        }

        let source = match std::str::from_utf8(input) {
            Ok(source) => source,
            Err(err) => {
                let valid = err.valid_up_to();
                tracing::debug!(offset = valid, "invalid UTF-8, treating as end of input");
                input
                    .get(..valid)
                    .and_then(|prefix| std::str::from_utf8(prefix).ok())
                    .unwrap_or_default()
            }
        };

        let mut lexer = Self {
            source,
            current: 0,
            start: 0,
            end: 0,
            code_point: None,
            token: Token::EndOfFile,
            limits,
        };
        lexer.step();
        lexer.advance()?;
        Ok(lexer)
    }

    /// The current token.
    pub fn token(&self) -> &Token<'a> {
        &self.token
    }

    /// Byte range of the current token.
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Take the text of the current string token and advance past it.
    ///
    /// Returns `None` and leaves the lexer untouched when the current token
    /// is not a string.
    pub fn take_string(&mut self) -> JsonResult<Option<Cow<'a, str>>> {
        let Token::String(text) = &mut self.token else {
            return Ok(None);
        };
        let text = std::mem::take(text);
        self.advance()?;
        Ok(Some(text))
    }

    /// Replace the current token with the next one.
    pub fn advance(&mut self) -> JsonResult<()> {
        loop {
            self.start = self.end;
            let Some(c) = self.code_point else {
                self.token = Token::EndOfFile;
                break;
            };

            self.token = match c {
                c if is_line_terminator(c) || is_whitespace(c) => {
                    self.step();
                    continue;
                }
                '[' => self.single(Token::LeftBracket),
                ']' => self.single(Token::RightBracket),
                '{' => self.single(Token::LeftBrace),
                '}' => self.single(Token::RightBrace),
                ',' => self.single(Token::Comma),
                ':' => self.single(Token::Colon),
                '-' | '0'..='9' => self.lex_number()?,
                '"' => self.lex_string()?,
                found => match KEYWORDS.iter().find(|(_, text)| text.starts_with(found)) {
                    Some((token, text)) => self.lex_keyword(token, *text)?,
                    None => {
                        return Err(ErrorCode::E100_UnexpectedCharacter {
                            found,
                            offset: self.start,
                        })
                    }
                },
            };
            break;
        }

        tracing::trace!(token = ?self.token, span = ?self.span(), "token");
        Ok(())
    }

    /// Decode the next code point.
    fn step(&mut self) {
        let next = self
            .source
            .get(self.current..)
            .and_then(|rest| rest.chars().next());
        self.code_point = next;
        self.end = self.current;
        self.current += next.map_or(0, char::len_utf8);
    }

    fn single(&mut self, token: Token<'a>) -> Token<'a> {
        self.step();
        token
    }

    fn at_digit(&self) -> bool {
        matches!(self.code_point, Some('0'..='9'))
    }

    fn skip_digits(&mut self) {
        while self.at_digit() {
            self.step();
        }
    }

    fn invalid_number(&self, reason: &'static str) -> ErrorCode {
        ErrorCode::E101_InvalidNumber {
            reason,
            offset: self.end,
        }
    }

    /// Read a number token.
    fn lex_number(&mut self) -> JsonResult<Token<'a>> {
        if self.code_point == Some('-') {
            self.step();
            if !self.at_digit() {
                return Err(self.invalid_number("expected digit after `-`"));
            }
        }

        // Integer part
        if self.code_point == Some('0') {
            self.step();
            if self.at_digit() {
                return Err(self.invalid_number("leading zero"));
            }
        } else {
            self.skip_digits();
        }

        // Fractional part
        if self.code_point == Some('.') {
            self.step();
            if !self.at_digit() {
                return Err(self.invalid_number("expected digit after `.`"));
            }
            self.skip_digits();
        }

        // Exponent
        if matches!(self.code_point, Some('e' | 'E')) {
            self.step();
            if matches!(self.code_point, Some('+' | '-')) {
                self.step();
            }
            if !self.at_digit() {
                return Err(self.invalid_number("expected digit in exponent"));
            }
            self.skip_digits();
        }

        let text = self.source.get(self.start..self.end).unwrap_or_default();
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| ErrorCode::E101_InvalidNumber {
                reason: "not a decimal number",
                offset: self.start,
            })
    }

    /// Read a string token, decoding escape sequences.
    fn lex_string(&mut self) -> JsonResult<Token<'a>> {
        let source = self.source;
        let body_start = self.current;
        // Stays `None` until the first escape; until then the body is a slice.
        let mut decoded: Option<String> = None;

        loop {
            self.step();
            let offset = self.end;
            match self.code_point {
                None => return Err(ErrorCode::E102_UnterminatedString(self.start)),
                Some('"') => break,
                Some('\\') => {
                    let ch = self.lex_escape(offset)?;
                    decoded
                        .get_or_insert_with(|| {
                            source.get(body_start..offset).unwrap_or_default().to_owned()
                        })
                        .push(ch);
                }
                Some(c) if c < '\u{20}' => {
                    return Err(ErrorCode::E105_ControlCharacter {
                        code: c as u32,
                        offset,
                    })
                }
                Some(c) => {
                    if let Some(buf) = decoded.as_mut() {
                        buf.push(c);
                    }
                }
            }
        }

        let body_end = self.end;
        self.step();

        let text = match decoded {
            Some(buf) => Cow::Owned(buf),
            None => Cow::Borrowed(source.get(body_start..body_end).unwrap_or_default()),
        };
        if text.len() as u64 > self.limits.max_string_length {
            return Err(ErrorCode::E302_StringTooLong(
                text.len() as u64,
                self.limits.max_string_length,
            ));
        }
        Ok(Token::String(text))
    }

    /// Read an escape sequence; `offset` is where its backslash sits.
    ///
    /// Leaves the cursor on the last character of the sequence.
    fn lex_escape(&mut self, offset: usize) -> JsonResult<char> {
        self.step();
        let ch = match self.code_point {
            None => return Err(ErrorCode::E106_UnexpectedEndOfInput(self.end)),
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{08}',
            Some('f') => '\u{0C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => return self.lex_unicode_escape(offset),
            Some(found) => return Err(ErrorCode::E103_InvalidEscape { found, offset }),
        };
        Ok(ch)
    }

    /// Read the hex digits of a `\u` escape, pairing UTF-16 surrogates.
    fn lex_unicode_escape(&mut self, offset: usize) -> JsonResult<char> {
        let invalid = ErrorCode::E104_InvalidUnicodeEscape(offset);
        let high = self.lex_hex4(offset)?;

        match high {
            0xD800..=0xDBFF => {
                self.step();
                if self.code_point != Some('\\') {
                    return Err(invalid);
                }
                self.step();
                if self.code_point != Some('u') {
                    return Err(invalid);
                }
                let low = self.lex_hex4(offset)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(invalid);
                }
                let combined = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
                char::from_u32(combined).ok_or(invalid)
            }
            0xDC00..=0xDFFF => Err(invalid),
            _ => char::from_u32(high).ok_or(invalid),
        }
    }

    fn lex_hex4(&mut self, offset: usize) -> JsonResult<u32> {
        let mut value = 0;
        for _ in 0..4 {
            self.step();
            let digit = self
                .code_point
                .and_then(|c| c.to_digit(16))
                .ok_or(ErrorCode::E104_InvalidUnicodeEscape(offset))?;
            value = (value << 4) | digit;
        }
        Ok(value)
    }

    /// Match the rest of a keyword whose first letter is the current code point.
    fn lex_keyword(
        &mut self,
        token: &Token<'static>,
        text: &'static str,
    ) -> JsonResult<Token<'a>> {
        for expected in text.chars().skip(1) {
            self.step();
            match self.code_point {
                Some(c) if c == expected => {}
                Some(found) => {
                    return Err(ErrorCode::E100_UnexpectedCharacter {
                        found,
                        offset: self.end,
                    })
                }
                None => return Err(ErrorCode::E106_UnexpectedEndOfInput(self.end)),
            }
        }
        self.step();
        Ok(token.clone())
    }
}
