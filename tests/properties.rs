//! Property tests.
//!
//! Documents are generated as `serde_json` values and rendered with
//! `serde_json::to_string`, then parsed back with `jsonast`.

mod common;

use common::from_serde;
use jsonast::{parse, Limits};
use proptest::prelude::*;
use serde_json::Value;

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1_000_000_000_000i64..1_000_000_000_000).prop_map(Value::from),
        (-1.0e9f64..1.0e9).prop_map(Value::from),
        any::<String>().prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(Value::Array),
            prop::collection::btree_map(any::<String>(), inner, 0..8)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn rendered_documents_parse_to_same_tree(value in arb_json()) {
        let text = serde_json::to_string(&value).unwrap();
        prop_assert_eq!(parse(&text), Ok(from_serde(&value)));
    }

    #[test]
    fn pretty_rendering_parses_to_same_tree(value in arb_json()) {
        let text = serde_json::to_string_pretty(&value).unwrap();
        prop_assert_eq!(parse(&text), Ok(from_serde(&value)));
    }

    #[test]
    fn parsing_is_repeatable(input in ".{0,64}") {
        prop_assert_eq!(parse(&input), parse(&input));
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = parse(&bytes);
        let _ = jsonast::parse_with_limits(&bytes, Limits::lenient());
    }

    #[test]
    fn errors_point_inside_input(input in r#"[\[\]{}:, 0-9a-z"\\.eE+-]{0,48}"#) {
        if let Err(err) = parse(&input) {
            if let Some(offset) = err.offset() {
                prop_assert!(offset <= input.len(), "{} > {}", offset, input.len());
            }
        }
    }
}
