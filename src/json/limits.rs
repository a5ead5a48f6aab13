//! Parser configuration: resource limits and grammar policy.
//!
//! Limits bound the work a single parse may do. The nesting depth limit also
//! bounds recursion in the parser, so deeply nested input is rejected with
//! [`E301_NestingTooDeep`](crate::ErrorCode::E301_NestingTooDeep) rather than
//! exhausting the stack.

/// What to do when an object repeats a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DuplicateKeys {
    /// Keep every occurrence, in input order.
    #[default]
    Retain,
    /// Fail with `E203_DuplicateKey` on the second occurrence.
    Reject,
}

/// Resource limits and grammar policy for parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum total input size in bytes (E300)
    pub max_input_size: u64,
    /// Maximum nesting depth for arrays/objects (E301)
    pub max_nesting_depth: u64,
    /// Maximum decoded string length in bytes (E302)
    pub max_string_length: u64,
    /// Maximum number of fields in an object (E303)
    pub max_object_fields: u64,
    /// Maximum number of elements in an array (E304)
    pub max_array_length: u64,
    /// Accept tokens after the root value instead of failing with E202
    pub allow_trailing_content: bool,
    /// Policy for repeated object keys
    pub duplicate_keys: DuplicateKeys,
}

impl Limits {
    /// Strict JSON with generous resource caps.
    pub const fn standard() -> Self {
        Self {
            max_input_size: 64 * 1024 * 1024,    // 64 MiB
            max_nesting_depth: 128,              // 128 levels
            max_string_length: 16 * 1024 * 1024, // 16 MiB
            max_object_fields: 1_000_000,
            max_array_length: 10_000_000,
            allow_trailing_content: false,
            duplicate_keys: DuplicateKeys::Retain,
        }
    }

    /// Large caps, and content after the root value is ignored.
    pub const fn lenient() -> Self {
        Self {
            max_input_size: u64::MAX,
            max_nesting_depth: 512,
            max_string_length: u64::MAX,
            max_object_fields: u64::MAX,
            max_array_length: u64::MAX,
            allow_trailing_content: true,
            duplicate_keys: DuplicateKeys::Retain,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::standard()
    }
}
