//! Helpers shared by the integration suites.

#![allow(dead_code)]

use jsonast::{JsonValue, Property};

/// Convert a `serde_json` value into the tree `jsonast` should produce for
/// the same document. Object members follow the map's iteration order.
pub fn from_serde(value: &serde_json::Value) -> JsonValue {
    match value {
        serde_json::Value::Null => JsonValue::Null,
        serde_json::Value::Bool(b) => JsonValue::Bool(*b),
        serde_json::Value::Number(n) => JsonValue::Number(n.as_f64().unwrap_or(f64::NAN)),
        serde_json::Value::String(s) => JsonValue::String(s.clone()),
        serde_json::Value::Array(items) => JsonValue::Array(items.iter().map(from_serde).collect()),
        serde_json::Value::Object(map) => JsonValue::Object(
            map.iter()
                .map(|(name, value)| Property::new(name.clone(), from_serde(value)))
                .collect(),
        ),
    }
}

/// Sort object members by key and keep only the last occurrence of each,
/// which is what a map-based parser observes.
pub fn normalize(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::Array(items) => JsonValue::Array(items.into_iter().map(normalize).collect()),
        JsonValue::Object(properties) => {
            let mut out: Vec<Property> = Vec::new();
            for property in properties {
                let property = Property::new(property.name, normalize(property.value));
                match out.iter_mut().find(|p| p.name == property.name) {
                    Some(existing) => *existing = property,
                    None => out.push(property),
                }
            }
            out.sort_by(|a, b| a.name.cmp(&b.name));
            JsonValue::Object(out)
        }
        other => other,
    }
}
