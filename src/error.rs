//! Error handling for the JSON parser.
//!
//! Every failure is reported through a single [`ErrorCode`] value. Codes are
//! grouped by the stage that detected them:
//!
//! - `E1xx` lexical errors, raised while forming a token
//! - `E2xx` syntax errors, raised while arranging tokens into a value
//! - `E3xx` limit violations, raised when configured [`Limits`] are exceeded
//!
//! All of them abort the parse; there is no recovery and no partial tree.
//!
//! [`Limits`]: crate::json::Limits

use thiserror::Error;

use crate::json::lexer::TokenKind;

/// Broad classification of an [`ErrorCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed token.
    Lexical,
    /// Well-formed tokens in an invalid arrangement.
    Syntax,
    /// A configured resource limit was exceeded.
    Limit,
}

/// All errors the lexer and parser can report.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    /// Character that cannot start or continue a token (code 100)
    #[error("unexpected token `{found}` at byte {offset}")]
    E100_UnexpectedCharacter {
        /// Offending character
        found: char,
        /// Byte offset of the character
        offset: usize,
    },

    /// Malformed number literal (code 101)
    #[error("invalid number at byte {offset}: {reason}")]
    E101_InvalidNumber {
        /// What is wrong with the literal
        reason: &'static str,
        /// Byte offset where the problem was detected
        offset: usize,
    },

    /// String without a closing quote (code 102)
    #[error("unterminated string starting at byte {0}")]
    E102_UnterminatedString(usize),

    /// Backslash followed by an unknown escape character (code 103)
    #[error("invalid escape sequence `\\{found}` at byte {offset}")]
    E103_InvalidEscape {
        /// Character following the backslash
        found: char,
        /// Byte offset of the backslash
        offset: usize,
    },

    /// Malformed `\u` escape or unpaired surrogate (code 104)
    #[error("invalid unicode escape at byte {0}")]
    E104_InvalidUnicodeEscape(usize),

    /// Raw control character inside a string (code 105)
    #[error("unescaped control character U+{code:04X} in string at byte {offset}")]
    E105_ControlCharacter {
        /// Code point of the control character
        code: u32,
        /// Byte offset of the character
        offset: usize,
    },

    /// Input ended in the middle of a keyword or escape (code 106)
    #[error("unexpected end of input at byte {0}")]
    E106_UnexpectedEndOfInput(usize),

    /// Token not permitted at this point of the grammar (code 200)
    #[error("unexpected {found} at byte {offset}, expected {expected}")]
    E200_UnexpectedToken {
        /// Kind of the token that was found
        found: TokenKind,
        /// Description of what the grammar allows here
        expected: &'static str,
        /// Byte offset of the token
        offset: usize,
    },

    /// Comma directly followed by a closing bracket or brace (code 201)
    #[error("trailing comma is not permitted at byte {0}")]
    E201_TrailingComma(usize),

    /// Tokens remaining after the root value (code 202)
    #[error("unexpected trailing content at byte {0}")]
    E202_TrailingContent(usize),

    /// Repeated object key under [`DuplicateKeys::Reject`](crate::json::DuplicateKeys::Reject) (code 203)
    #[error("duplicate key `{key}` at byte {offset}")]
    E203_DuplicateKey {
        /// The repeated key, after unescaping
        key: String,
        /// Byte offset of the repeated key
        offset: usize,
    },

    /// Input larger than `max_input_size` (code 300)
    #[error("input too large: {0} bytes exceeds limit of {1}")]
    E300_InputTooLarge(u64, u64),

    /// Arrays and objects nested deeper than `max_nesting_depth` (code 301)
    #[error("nesting too deep: depth {0} exceeds limit of {1}")]
    E301_NestingTooDeep(u64, u64),

    /// Decoded string longer than `max_string_length` (code 302)
    #[error("string too long: {0} bytes exceeds limit of {1}")]
    E302_StringTooLong(u64, u64),

    /// Object with more than `max_object_fields` members (code 303)
    #[error("too many object fields: {0} exceeds limit of {1}")]
    E303_TooManyFields(u64, u64),

    /// Array with more than `max_array_length` items (code 304)
    #[error("array too long: {0} items exceeds limit of {1}")]
    E304_ArrayTooLong(u64, u64),
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::E100_UnexpectedCharacter { .. } => 100,
            ErrorCode::E101_InvalidNumber { .. } => 101,
            ErrorCode::E102_UnterminatedString(_) => 102,
            ErrorCode::E103_InvalidEscape { .. } => 103,
            ErrorCode::E104_InvalidUnicodeEscape(_) => 104,
            ErrorCode::E105_ControlCharacter { .. } => 105,
            ErrorCode::E106_UnexpectedEndOfInput(_) => 106,
            ErrorCode::E200_UnexpectedToken { .. } => 200,
            ErrorCode::E201_TrailingComma(_) => 201,
            ErrorCode::E202_TrailingContent(_) => 202,
            ErrorCode::E203_DuplicateKey { .. } => 203,
            ErrorCode::E300_InputTooLarge(..) => 300,
            ErrorCode::E301_NestingTooDeep(..) => 301,
            ErrorCode::E302_StringTooLong(..) => 302,
            ErrorCode::E303_TooManyFields(..) => 303,
            ErrorCode::E304_ArrayTooLong(..) => 304,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E100_UnexpectedCharacter { .. } => "E100_UnexpectedCharacter",
            ErrorCode::E101_InvalidNumber { .. } => "E101_InvalidNumber",
            ErrorCode::E102_UnterminatedString(_) => "E102_UnterminatedString",
            ErrorCode::E103_InvalidEscape { .. } => "E103_InvalidEscape",
            ErrorCode::E104_InvalidUnicodeEscape(_) => "E104_InvalidUnicodeEscape",
            ErrorCode::E105_ControlCharacter { .. } => "E105_ControlCharacter",
            ErrorCode::E106_UnexpectedEndOfInput(_) => "E106_UnexpectedEndOfInput",
            ErrorCode::E200_UnexpectedToken { .. } => "E200_UnexpectedToken",
            ErrorCode::E201_TrailingComma(_) => "E201_TrailingComma",
            ErrorCode::E202_TrailingContent(_) => "E202_TrailingContent",
            ErrorCode::E203_DuplicateKey { .. } => "E203_DuplicateKey",
            ErrorCode::E300_InputTooLarge(..) => "E300_InputTooLarge",
            ErrorCode::E301_NestingTooDeep(..) => "E301_NestingTooDeep",
            ErrorCode::E302_StringTooLong(..) => "E302_StringTooLong",
            ErrorCode::E303_TooManyFields(..) => "E303_TooManyFields",
            ErrorCode::E304_ArrayTooLong(..) => "E304_ArrayTooLong",
        }
    }

    /// Which stage of parsing detected the error.
    pub fn kind(&self) -> ErrorKind {
        match self.code() {
            100..=199 => ErrorKind::Lexical,
            200..=299 => ErrorKind::Syntax,
            _ => ErrorKind::Limit,
        }
    }

    /// Byte offset into the input, for errors tied to a position.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ErrorCode::E100_UnexpectedCharacter { offset, .. }
            | ErrorCode::E101_InvalidNumber { offset, .. }
            | ErrorCode::E103_InvalidEscape { offset, .. }
            | ErrorCode::E105_ControlCharacter { offset, .. }
            | ErrorCode::E200_UnexpectedToken { offset, .. }
            | ErrorCode::E203_DuplicateKey { offset, .. } => Some(*offset),
            ErrorCode::E102_UnterminatedString(offset)
            | ErrorCode::E104_InvalidUnicodeEscape(offset)
            | ErrorCode::E106_UnexpectedEndOfInput(offset)
            | ErrorCode::E201_TrailingComma(offset)
            | ErrorCode::E202_TrailingContent(offset) => Some(*offset),
            ErrorCode::E300_InputTooLarge(..)
            | ErrorCode::E301_NestingTooDeep(..)
            | ErrorCode::E302_StringTooLong(..)
            | ErrorCode::E303_TooManyFields(..)
            | ErrorCode::E304_ArrayTooLong(..) => None,
        }
    }
}

/// Result type for lexer and parser operations.
pub type JsonResult<T> = Result<T, ErrorCode>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_kinds() {
        let lexical = ErrorCode::E102_UnterminatedString(0);
        assert_eq!(lexical.code(), 102);
        assert_eq!(lexical.kind(), ErrorKind::Lexical);

        let syntax = ErrorCode::E201_TrailingComma(3);
        assert_eq!(syntax.code(), 201);
        assert_eq!(syntax.kind(), ErrorKind::Syntax);

        let limit = ErrorCode::E301_NestingTooDeep(3, 2);
        assert_eq!(limit.code(), 301);
        assert_eq!(limit.kind(), ErrorKind::Limit);
    }

    #[test]
    fn test_name_carries_code() {
        let err = ErrorCode::E101_InvalidNumber {
            reason: "leading zero",
            offset: 0,
        };
        assert!(err.name().starts_with(&format!("E{}", err.code())));
    }

    #[test]
    fn test_messages() {
        let err = ErrorCode::E100_UnexpectedCharacter {
            found: 'a',
            offset: 2,
        };
        assert_eq!(err.to_string(), "unexpected token `a` at byte 2");

        let err = ErrorCode::E200_UnexpectedToken {
            found: TokenKind::EndOfFile,
            expected: "a value",
            offset: 0,
        };
        assert_eq!(
            err.to_string(),
            "unexpected end of input at byte 0, expected a value"
        );

        let err = ErrorCode::E103_InvalidEscape {
            found: 'x',
            offset: 1,
        };
        assert_eq!(err.to_string(), "invalid escape sequence `\\x` at byte 1");
    }

    #[test]
    fn test_offsets() {
        assert_eq!(ErrorCode::E202_TrailingContent(5).offset(), Some(5));
        assert_eq!(ErrorCode::E300_InputTooLarge(10, 5).offset(), None);
    }
}
