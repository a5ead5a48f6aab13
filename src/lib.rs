//! A JSON parser built from a hand-written lexer and a recursive descent parser.
//!
//! The lexer pulls one code point at a time from the input and hands out one
//! token at a time; the parser consumes that stream and builds an immutable,
//! ordered [`JsonValue`] tree. Any malformed input yields a single
//! [`ErrorCode`] carrying a message and, where it applies, a byte offset.
//!
//! - [`json`] - Lexer, parser and value types
//! - [`error`] - Error codes
//!
//! ```
//! use jsonast::{parse, ErrorCode, JsonValue};
//!
//! assert_eq!(parse("true"), Ok(JsonValue::Bool(true)));
//! assert!(matches!(parse("00"), Err(ErrorCode::E101_InvalidNumber { .. })));
//! ```

// Library code reports every failure through `ErrorCode`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod error;
pub mod json;

// Re-export commonly used types
pub use error::{ErrorCode, ErrorKind, JsonResult};
pub use json::{parse, parse_with_limits, DuplicateKeys, JsonValue, Limits, Property};
