use graphdb_codec::{LogicalType, Value};
use proptest::prelude::*;
use serde_json::{Map, Value as Json};

const TAGS: &[&str] = &[
    "Null", "Bool", "Int64", "Int8", "UInt8", "Int128", "Double", "Float", "Date", "Interval",
    "Timestamp", "InternalID", "String", "Blob", "List", "Array", "Struct", "Node", "Rel",
    "RecursiveRel", "Map", "Union", "UUID", "Decimal", "Any",
];

/// Arbitrary JSON biased toward tag-shaped objects so that payload decoders
/// get exercised, not just the envelope check.
fn arb_json() -> impl Strategy<Value = Json> {
    let leaf = prop_oneof![
        Just(Json::Null),
        any::<bool>().prop_map(Json::Bool),
        any::<i64>().prop_map(Json::from),
        any::<f64>().prop_map(|f| serde_json::Number::from_f64(f).map_or(Json::Null, Json::Number)),
        prop::sample::select(TAGS).prop_map(|t| Json::String(t.to_string())),
        "[a-z0-9:.-]{0,12}".prop_map(Json::String),
    ];
    leaf.prop_recursive(6, 64, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Json::Array),
            (prop::sample::select(TAGS), inner.clone()).prop_map(|(tag, payload)| {
                let mut map = Map::new();
                map.insert(tag.to_string(), payload);
                Json::Object(map)
            }),
            prop::collection::btree_map("[a-z_]{1,10}", inner, 0..4)
                .prop_map(|m| Json::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn fuzz_decode_bytes_no_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let text = String::from_utf8_lossy(&bytes);
        let _ = Value::from_json_str(&text);
        let _ = LogicalType::from_json_str(&text);
    }

    #[test]
    fn fuzz_decode_tagged_json_no_panics(json in arb_json()) {
        let _ = Value::decode(&json);
        let _ = LogicalType::decode(&json);
    }

    #[test]
    fn decoded_values_reencode_stably(json in arb_json()) {
        // Anything that decodes must survive a second trip unchanged.
        if let Ok(value) = Value::decode(&json) {
            if let Ok(encoded) = value.encode() {
                let again = Value::decode(&encoded);
                prop_assert_eq!(again.as_ref().ok(), Some(&value));
            }
        }
    }

    #[test]
    fn int_lists_round_trip(items in prop::collection::vec(any::<i64>(), 0..32)) {
        let value = Value::list(
            LogicalType::Int64,
            items.into_iter().map(Value::Int64).collect(),
        );
        let encoded = value.encode().unwrap();
        prop_assert_eq!(Value::decode(&encoded).unwrap(), value);
    }

    #[test]
    fn finite_doubles_round_trip(f in any::<f64>().prop_filter("finite", |f| f.is_finite())) {
        let encoded = Value::Double(f).encode().unwrap();
        prop_assert_eq!(Value::decode(&encoded).unwrap(), Value::Double(f));
    }

    #[test]
    fn int128_round_trips(n in any::<i128>()) {
        let encoded = Value::Int128(n).encode().unwrap();
        prop_assert!(encoded["Int128"].is_number());
        prop_assert_eq!(Value::decode(&encoded).unwrap(), Value::Int128(n));
    }
}
