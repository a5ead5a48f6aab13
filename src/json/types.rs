//! JSON value types.
//!
//! The tree produced by the parser. A [`JsonValue`] exclusively owns its
//! children, so a parsed document is a plain hierarchy with no sharing and no
//! back-references. There is no mutation API beyond what `Vec` offers on an
//! owned value; trees are built once by [`parse`](super::parse).

use std::str::FromStr;

use crate::error::ErrorCode;

/// One `name: value` member of a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Key text with escape sequences decoded.
    pub name: String,
    /// Member value.
    pub value: JsonValue,
}

impl Property {
    /// Create a property from a key and a value.
    pub fn new(name: impl Into<String>, value: JsonValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A parsed JSON value.
///
/// Objects keep their members in input order and keep repeated keys, so the
/// tree mirrors the document exactly. Numbers are 64-bit floats.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum JsonValue {
    /// JSON null literal
    #[default]
    Null,
    /// JSON boolean (true/false)
    Bool(bool),
    /// JSON number
    Number(f64),
    /// JSON string (escape sequences decoded)
    String(String),
    /// JSON array of values
    Array(Vec<JsonValue>),
    /// JSON object members in input order
    Object(Vec<Property>),
}

impl JsonValue {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    /// Returns true if this is a number value.
    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    /// Returns true if this is an array value.
    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    /// Returns true if this is an object value.
    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    /// Returns the boolean value if this is a Bool, None otherwise.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if this is a Number, None otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String, None otherwise.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the items if this is an Array, None otherwise.
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the members if this is an Object, None otherwise.
    pub fn as_object(&self) -> Option<&[Property]> {
        match self {
            JsonValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get a member value from an object by key.
    ///
    /// When the key occurs more than once the last occurrence wins.
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object()?
            .iter()
            .rev()
            .find(|p| p.name == key)
            .map(|p| &p.value)
    }

    /// Iterate over every member value stored under `key`, in input order.
    pub fn get_all<'s>(&'s self, key: &'s str) -> impl Iterator<Item = &'s JsonValue> + 's {
        self.as_object()
            .unwrap_or_default()
            .iter()
            .filter(move |p| p.name == key)
            .map(|p| &p.value)
    }

    /// Get a value from an array by index.
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        match self {
            JsonValue::Array(arr) => arr.get(index),
            _ => None,
        }
    }

    /// Returns the type name as a string for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }
}

impl FromStr for JsonValue {
    type Err = ErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::parse(s)
    }
}
