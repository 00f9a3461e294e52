//! Wire fixtures for every value and logical type variant.
//!
//! Each fixture is checked three ways: encoding produces exactly the
//! expected JSON, decoding that JSON gives back the original, and the
//! generic (registry) decoder picks the same variant as the typed one.

use std::collections::BTreeMap;

use graphdb_codec::{
    CodecError, InternalId, LogicalType, MapValue, NodeValue, RecursiveRelValue, RelValue,
    Tagged, UnionValue, Uuid, Value, ValueKind,
};
use serde_json::{json, Value as Json};
use time::macros::{date, datetime};
use time::Duration;

// ──────────────────────────────────────────────
// Test helpers
// ──────────────────────────────────────────────

fn check_value(value: Value, expected: Json) {
    let encoded = value.encode().expect("encode");
    assert_eq!(encoded, expected, "encoding of {:?}", value);

    let decoded = Value::decode(&encoded).expect("generic decode");
    assert_eq!(decoded, value, "generic decode of {}", encoded);

    let typed = Value::decode_as(value.kind(), &encoded).expect("typed decode");
    assert_eq!(typed.kind(), decoded.kind());
    assert_eq!(typed, value);
}

fn check_type(ty: LogicalType, expected: Json) {
    let encoded = ty.encode();
    assert_eq!(encoded, expected, "encoding of {:?}", ty);
    assert_eq!(LogicalType::decode(&encoded).expect("decode"), ty);
}

// ──────────────────────────────────────────────
// Logical types
// ──────────────────────────────────────────────

#[test]
fn logical_type_units() {
    check_type(LogicalType::Any, json!("Any"));
    check_type(LogicalType::Bool, json!("Bool"));
    check_type(LogicalType::Serial, json!("Serial"));
    check_type(LogicalType::Int128, json!("Int128"));
    check_type(LogicalType::TimestampSec, json!("TimestampSec"));
    check_type(LogicalType::InternalId, json!("InternalID"));
    check_type(LogicalType::RecursiveRel, json!("RecursiveRel"));
    check_type(LogicalType::Uuid, json!("UUID"));
}

#[test]
fn logical_type_list_and_array() {
    check_type(
        LogicalType::list(LogicalType::Float),
        json!({"List": {"child_type": "Float"}}),
    );
    check_type(
        LogicalType::array(LogicalType::list(LogicalType::Date), 3),
        json!({"Array": {"child_type": {"List": {"child_type": "Date"}}, "num_elements": 3}}),
    );
}

#[test]
fn logical_type_struct_and_union_keep_order() {
    check_type(
        LogicalType::structure([("z", LogicalType::Int8), ("a", LogicalType::Blob)]),
        json!({"Struct": {"fields": [["z", "Int8"], ["a", "Blob"]]}}),
    );
    check_type(
        LogicalType::union([("num", LogicalType::Int64), ("str", LogicalType::String)]),
        json!({"Union": {"fields": [["num", "Int64"], ["str", "String"]]}}),
    );
}

#[test]
fn logical_type_map_and_decimal() {
    check_type(
        LogicalType::map(LogicalType::Uuid, LogicalType::list(LogicalType::Bool)),
        json!({"Map": {"key_type": "UUID", "value_type": {"List": {"child_type": "Bool"}}}}),
    );
    check_type(
        LogicalType::decimal(18, 3),
        json!({"Decimal": {"precision": 18, "scale": 3}}),
    );
}

#[test]
fn logical_type_rejects_unknown_and_malformed() {
    let err = LogicalType::decode(&json!({"NotARealType": 1})).unwrap_err();
    assert!(matches!(err, CodecError::UnknownTag { .. }));

    let err = LogicalType::decode(&json!({"List": {}, "Array": {}})).unwrap_err();
    assert_eq!(err, CodecError::UnexpectedKeyCount { count: 2 });

    let err = LogicalType::decode(&json!({"Struct": {"fields": [["a", "Int8", "x"]]}}))
        .unwrap_err();
    assert!(matches!(err.root_cause(), CodecError::MalformedTuple { .. }));
    assert_eq!(err.context_path(), vec!["Struct", "fields"]);

    let err = LogicalType::decode(&json!({"Decimal": {"precision": -1, "scale": 0}}))
        .unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CodecError::NumberOutOfRange { .. }
    ));
}

// ──────────────────────────────────────────────
// Scalar values
// ──────────────────────────────────────────────

#[test]
fn null_values() {
    check_value(Value::Null(LogicalType::Any), json!({"Null": "Any"}));
    check_value(
        Value::Null(LogicalType::list(LogicalType::Float)),
        json!({"Null": {"List": {"child_type": "Float"}}}),
    );
}

#[test]
fn integer_values() {
    check_value(Value::Bool(true), json!({"Bool": true}));
    check_value(Value::Int64(82), json!({"Int64": 82}));
    check_value(Value::Int32(1), json!({"Int32": 1}));
    check_value(Value::Int16(100), json!({"Int16": 100}));
    check_value(Value::Int8(-6), json!({"Int8": -6}));
    check_value(Value::UInt64(0), json!({"UInt64": 0}));
    check_value(Value::UInt32(1001), json!({"UInt32": 1001}));
    check_value(Value::UInt16(212), json!({"UInt16": 212}));
    check_value(Value::UInt8(50), json!({"UInt8": 50}));
    check_value(Value::Int128(9009), json!({"Int128": 9009}));
}

#[test]
fn wide_int128_is_a_bare_number() {
    for big in [i128::from(u64::MAX) * 4, i128::MIN, i128::MAX] {
        let expected: serde_json::Value =
            serde_json::from_str(&format!(r#"{{"Int128": {}}}"#, big)).unwrap();
        check_value(Value::Int128(big), expected);
    }
    assert_eq!(
        Value::decode(&json!({"Int128": "-18446744073709551617"})).unwrap(),
        Value::Int128(-18446744073709551617)
    );
}

#[test]
fn floating_values() {
    check_value(Value::Double(-56.1234), json!({"Double": -56.1234}));
    check_value(Value::Float(90.0), json!({"Float": 90.0}));
    check_value(Value::Float(0.1), json!({"Float": 0.1}));
}

#[test]
fn non_finite_floats_fail_to_encode() {
    for value in [
        Value::Double(f64::NAN),
        Value::Double(f64::NEG_INFINITY),
        Value::Float(f32::INFINITY),
    ] {
        let err = value.encode().unwrap_err();
        assert_eq!(err.context_path(), vec![value.tag()]);
        assert!(matches!(err.root_cause(), CodecError::NonFiniteNumber { .. }));
    }

    let list = Value::list(LogicalType::Float, vec![Value::Float(1.0), Value::Float(f32::NAN)]);
    let err = list.encode().unwrap_err();
    assert_eq!(err.context_path().first(), Some(&"List"));
    assert!(matches!(err.root_cause(), CodecError::NonFiniteNumber { .. }));
}

#[test]
fn string_blob_and_ids() {
    check_value(Value::from("Hello"), json!({"String": "Hello"}));
    check_value(
        Value::Blob(vec![0, 1, 2, 3, 4]),
        json!({"Blob": [0, 1, 2, 3, 4]}),
    );
    check_value(
        Value::InternalId(InternalId::new(0, 0)),
        json!({"InternalID": {"table_id": 0, "offset": 0}}),
    );
}

#[test]
fn blob_rejects_out_of_range_bytes() {
    let err = Value::decode(&json!({"Blob": [1, 256]})).unwrap_err();
    assert!(matches!(
        err.root_cause(),
        CodecError::InvalidByteValue { .. }
    ));
}

#[test]
fn uuid_and_decimal_values() {
    check_value(
        Value::Uuid(Uuid::parse_str("00000000-0000-0000-0000-ffff00000000").unwrap()),
        json!({"UUID": "00000000-0000-0000-0000-ffff00000000"}),
    );
    check_value(
        Value::Uuid(Uuid::parse_str("8f914bce-df4e-4244-9cd4-ea96bf0c58d4").unwrap()),
        json!({"UUID": "8f914bce-df4e-4244-9cd4-ea96bf0c58d4"}),
    );
    check_value(
        Value::Decimal("12.34".parse().unwrap()),
        json!({"Decimal": "12.34"}),
    );
    check_value(
        Value::Decimal("12.3456789".parse().unwrap()),
        json!({"Decimal": "12.3456789"}),
    );
}

#[test]
fn decimal_keeps_full_precision() {
    let wide = "123456789012345678901234567890123456.78";
    check_value(Value::Decimal(wide.parse().unwrap()), json!({"Decimal": wide}));

    let decoded = Value::decode(&json!({"Decimal": wide})).unwrap();
    assert_eq!(decoded.logical_type(), LogicalType::decimal(38, 2));
    assert_eq!(decoded.to_string(), wide);

    check_value(
        Value::Decimal("-0.000000000000000000000000000000001".parse().unwrap()),
        json!({"Decimal": "-0.000000000000000000000000000000001"}),
    );
}

#[test]
fn uuid_and_decimal_reject_garbage() {
    let err = Value::decode(&json!({"UUID": "8f914bcedf4e42449cd4ea96bf0c58d4"})).unwrap_err();
    assert!(matches!(err.root_cause(), CodecError::InvalidUuid { .. }));
    let err = Value::decode(&json!({"Decimal": "12.3.4"})).unwrap_err();
    assert!(matches!(err.root_cause(), CodecError::InvalidDecimal { .. }));
}

#[test]
fn date_and_timestamps() {
    check_value(
        Value::Date(date!(2025 - 04 - 23)),
        json!({"Date": "2025-04-23"}),
    );
    let ts = datetime!(2025-04-23 13:26:21.12345 UTC);
    check_value(
        Value::Timestamp(ts),
        json!({"Timestamp": "2025-04-23T13:26:21.12345Z"}),
    );
    check_value(
        Value::TimestampTz(ts),
        json!({"TimestampTz": "2025-04-23T13:26:21.12345Z"}),
    );
    check_value(
        Value::TimestampNs(ts),
        json!({"TimestampNs": "2025-04-23T13:26:21.12345Z"}),
    );
    check_value(
        Value::TimestampMs(ts),
        json!({"TimestampMs": "2025-04-23T13:26:21.12345Z"}),
    );
    check_value(
        Value::TimestampSec(ts),
        json!({"TimestampSec": "2025-04-23T13:26:21.12345Z"}),
    );
}

#[test]
fn date_rejects_non_iso() {
    let err = Value::decode(&json!({"Date": "04/23/2025"})).unwrap_err();
    assert!(matches!(err.root_cause(), CodecError::InvalidDate { .. }));
}

#[test]
fn intervals() {
    check_value(
        Value::Interval(Duration::days(23)),
        json!({"Interval": [1987200, 0]}),
    );
    check_value(
        Value::Interval(Duration::days(23) + Duration::nanoseconds(456)),
        json!({"Interval": [1987200, 456]}),
    );
}

// ──────────────────────────────────────────────
// Structured values
// ──────────────────────────────────────────────

#[test]
fn list_and_array() {
    check_value(
        Value::list(
            LogicalType::UInt64,
            vec![Value::UInt64(0), Value::UInt64(12)],
        ),
        json!({"List": ["UInt64", [{"UInt64": 0}, {"UInt64": 12}]]}),
    );
    check_value(
        Value::array(
            LogicalType::Bool,
            vec![Value::Bool(true), Value::Bool(false)],
        ),
        json!({"Array": ["Bool", [{"Bool": true}, {"Bool": false}]]}),
    );
}

#[test]
fn struct_value() {
    check_value(
        Value::structure([("a", Value::Bool(false)), ("name", Value::from("Joe"))]),
        json!({"Struct": [["a", {"Bool": false}], ["name", {"String": "Joe"}]]}),
    );
}

#[test]
fn struct_and_union_accept_any_pair_order() {
    let reordered = json!({"Struct": [["name", {"String": "Joe"}], ["a", {"Bool": false}]]});
    assert_eq!(
        Value::decode(&reordered).unwrap(),
        Value::structure([("a", Value::Bool(false)), ("name", Value::from("Joe"))])
    );

    let forward = json!({"Union": {
        "types": [["num", "Int64"], ["str", "String"]],
        "value": {"Int64": 1}
    }});
    let backward = json!({"Union": {
        "types": [["str", "String"], ["num", "Int64"]],
        "value": {"Int64": 1}
    }});
    assert_eq!(
        Value::decode(&forward).unwrap(),
        Value::decode(&backward).unwrap()
    );
}

#[test]
fn node_and_rel() {
    check_value(
        Value::Node(NodeValue {
            id: InternalId::new(1, 10),
            label: "my-label".into(),
            properties: BTreeMap::new(),
        }),
        json!({"Node": {
            "id": {"table_id": 1, "offset": 10},
            "label": "my-label",
            "properties": []
        }}),
    );
    check_value(
        Value::Rel(RelValue {
            src_node: InternalId::new(4, 1),
            dst_node: InternalId::new(6, 0),
            label: "lab".into(),
            properties: BTreeMap::new(),
        }),
        json!({"Rel": {
            "src_node": {"table_id": 4, "offset": 1},
            "dst_node": {"table_id": 6, "offset": 0},
            "label": "lab",
            "properties": []
        }}),
    );
}

#[test]
fn recursive_rel_tags_its_members() {
    let path = RecursiveRelValue {
        nodes: vec![NodeValue {
            id: InternalId::new(0, 1),
            label: "City".into(),
            properties: [("name".to_string(), Value::from("Oslo"))].into(),
        }],
        rels: vec![RelValue {
            src_node: InternalId::new(0, 1),
            dst_node: InternalId::new(0, 2),
            label: "Road".into(),
            properties: BTreeMap::new(),
        }],
    };
    check_value(
        Value::RecursiveRel(path),
        json!({"RecursiveRel": {
            "nodes": [{"Node": {
                "id": {"table_id": 0, "offset": 1},
                "label": "City",
                "properties": [["name", {"String": "Oslo"}]]
            }}],
            "rels": [{"Rel": {
                "src_node": {"table_id": 0, "offset": 1},
                "dst_node": {"table_id": 0, "offset": 2},
                "label": "Road",
                "properties": []
            }}]
        }}),
    );
}

#[test]
fn map_value() {
    check_value(
        Value::Map(MapValue {
            key_type: LogicalType::UInt64,
            value_type: LogicalType::Bool,
            pairs: [(Value::UInt64(4), Value::Bool(false))].into(),
        }),
        json!({"Map": [["UInt64", "Bool"], [[{"UInt64": 4}, {"Bool": false}]]]}),
    );
}

#[test]
fn map_accepts_any_pair_order() {
    let sorted = json!({"Map": [["String", "Int64"], [
        [{"String": "a"}, {"Int64": 1}],
        [{"String": "b"}, {"Int64": 2}],
    ]]});
    let reversed = json!({"Map": [["String", "Int64"], [
        [{"String": "b"}, {"Int64": 2}],
        [{"String": "a"}, {"Int64": 1}],
    ]]});

    let a = Value::decode(&sorted).unwrap();
    let b = Value::decode(&reversed).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.encode().unwrap(), sorted);
    assert_eq!(b.encode().unwrap(), sorted);
}

#[test]
fn map_with_bad_entry_is_malformed_tuple() {
    let err = Value::decode(&json!({"Map": [["UInt64", "Bool"], [[{"UInt64": 4}]]]}))
        .unwrap_err();
    assert!(matches!(err.root_cause(), CodecError::MalformedTuple { .. }));
}

#[test]
fn union_value() {
    check_value(
        Value::Union(UnionValue {
            types: [
                ("num".to_string(), LogicalType::Int64),
                ("str".to_string(), LogicalType::String),
            ]
            .into(),
            value: Box::new(Value::Int64(1)),
        }),
        json!({"Union": {
            "types": [["num", "Int64"], ["str", "String"]],
            "value": {"Int64": 1}
        }}),
    );
}

#[test]
fn deeply_nested_round_trip() {
    let row_type = LogicalType::structure([
        ("id", LogicalType::Uuid),
        ("tags", LogicalType::list(LogicalType::String)),
    ]);
    let row = |id: &str, tags: &[&str]| {
        Value::structure([
            ("id", Value::Uuid(Uuid::parse_str(id).unwrap())),
            (
                "tags",
                Value::list(
                    LogicalType::String,
                    tags.iter().map(|t| Value::from(*t)).collect(),
                ),
            ),
        ])
    };
    let value = Value::list(
        row_type.clone(),
        vec![
            row("8f914bce-df4e-4244-9cd4-ea96bf0c58d4", &["a", "b"]),
            row("00000000-0000-0000-0000-ffff00000000", &[]),
            Value::Null(row_type),
        ],
    );
    let encoded = value.encode().unwrap();
    assert_eq!(Value::decode(&encoded).unwrap(), value);
    assert_eq!(
        Value::from_json_str(&value.to_json_string().unwrap()).unwrap(),
        value
    );
}

// ──────────────────────────────────────────────
// Envelope errors
// ──────────────────────────────────────────────

#[test]
fn value_envelope_errors() {
    assert!(matches!(
        Value::decode(&json!({"NotARealType": 1})),
        Err(CodecError::UnknownTag { .. })
    ));
    assert!(matches!(
        Value::decode(&json!({})),
        Err(CodecError::UnexpectedKeyCount { count: 0 })
    ));
    assert!(matches!(
        Value::decode(&json!("Bool")),
        Err(CodecError::MissingPayload { .. })
    ));
    assert!(matches!(
        Value::decode(&json!(42)),
        Err(CodecError::InvalidShape { .. })
    ));
    assert!(matches!(
        Value::from_json_str("{\"Bool\": tru"),
        Err(CodecError::InvalidJson(_))
    ));
}

#[test]
fn generic_and_typed_decoders_agree_on_every_kind() {
    let samples = [
        json!({"Null": "Int64"}),
        json!({"Bool": false}),
        json!({"Int64": -1}),
        json!({"Int32": 2}),
        json!({"Int16": 3}),
        json!({"Int8": 4}),
        json!({"UInt64": 5}),
        json!({"UInt32": 6}),
        json!({"UInt16": 7}),
        json!({"UInt8": 8}),
        json!({"Int128": "-170141183460469231731687303715884105728"}),
        json!({"Double": 1.5}),
        json!({"Float": 2.5}),
        json!({"Date": "1999-12-31"}),
        json!({"Interval": [-3, 0]}),
        json!({"Timestamp": "2000-01-01T00:00:00Z"}),
        json!({"TimestampTz": "2000-01-01T00:00:00+02:00"}),
        json!({"TimestampNs": "2000-01-01T00:00:00.000000001Z"}),
        json!({"TimestampMs": "2000-01-01T00:00:00.5Z"}),
        json!({"TimestampSec": "2000-01-01T00:00:00Z"}),
        json!({"InternalID": {"table_id": 2, "offset": 9}}),
        json!({"String": ""}),
        json!({"Blob": []}),
        json!({"List": ["Any", []]}),
        json!({"Array": ["Int8", [{"Int8": 1}]]}),
        json!({"Struct": []}),
        json!({"Node": {"id": {"table_id": 0, "offset": 0}, "label": "", "properties": []}}),
        json!({"Rel": {
            "src_node": {"table_id": 0, "offset": 0},
            "dst_node": {"table_id": 0, "offset": 1},
            "label": "",
            "properties": []
        }}),
        json!({"RecursiveRel": {"nodes": [], "rels": []}}),
        json!({"Map": [["String", "String"], []]}),
        json!({"Union": {"types": [], "value": {"Null": "Any"}}}),
        json!({"UUID": "8f914bce-df4e-4244-9cd4-ea96bf0c58d4"}),
        json!({"Decimal": "-0.001"}),
    ];
    assert_eq!(samples.len(), ValueKind::ALL.len());
    for (sample, kind) in samples.iter().zip(ValueKind::ALL) {
        let generic = Value::decode(sample).unwrap_or_else(|e| panic!("{}: {}", sample, e));
        assert_eq!(generic.kind(), kind);
        assert_eq!(Value::decode_as(kind, sample).unwrap(), generic);
        let again = Value::decode(&generic.encode().unwrap()).unwrap();
        assert_eq!(again, generic);
    }
}
