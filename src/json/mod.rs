//! JSON lexing and parsing.
//!
//! Input text flows one way: bytes → [`lexer`] → tokens → [`parser`] →
//! [`JsonValue`] tree, or the first [`ErrorCode`](crate::ErrorCode) found.
//!
//! - [`types`] - AST value types
//! - [`limits`] - Resource limits and grammar policy
//! - [`lexer`] - Pull-based tokenizer with escape decoding
//! - [`parser`] - Recursive descent parser
//!
//! # Example
//!
//! ```
//! use jsonast::json::{parse, JsonValue};
//!
//! let value = parse(r#"{"b": [1, true], "a": null}"#).unwrap();
//!
//! // Members keep their input order
//! let names: Vec<_> = value.as_object().unwrap().iter().map(|p| p.name.as_str()).collect();
//! assert_eq!(names, ["b", "a"]);
//! assert_eq!(value.get("a"), Some(&JsonValue::Null));
//! ```

pub mod lexer;
pub mod limits;
pub mod parser;
pub mod types;

// Re-export commonly used items
pub use lexer::{Lexer, Token, TokenKind};
pub use limits::{DuplicateKeys, Limits};
pub use parser::{parse, parse_with_limits, Parser};
pub use types::{JsonValue, Property};
