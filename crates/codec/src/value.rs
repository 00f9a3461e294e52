//! Runtime values exchanged with the graph database.
//!
//! Every [`Value`] travels as `{tag: payload}`. Collections carry their
//! element types next to their elements as `[type, values]` pairs.
//!
//! Struct fields, node and rel properties, union alternatives and map
//! entries live in sorted maps. Decoding accepts pairs in any order (last
//! duplicate wins); encoding emits them in key order. The wire order of
//! these pairs carries no meaning.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use bigdecimal::BigDecimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value as Json};
use time::{Date, Duration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use crate::error::CodecError;
use crate::logical_type::{decode_named_types, encode_named_types, LogicalType};
use crate::registry;
use crate::scalar::{
    self, field, read_array, read_bool, read_int, read_string, read_uint, InternalId,
};
use crate::tagged::{self, Tagged, TaggedPayload};
use crate::tuple;

/// A runtime value of the graph database.
#[derive(Debug, Clone)]
pub enum Value {
    /// Absence of a value of the given type.
    Null(LogicalType),
    Bool(bool),
    Int64(i64),
    Int32(i32),
    Int16(i16),
    Int8(i8),
    UInt64(u64),
    UInt32(u32),
    UInt16(u16),
    UInt8(u8),
    Int128(i128),
    Double(f64),
    Float(f32),
    Date(Date),
    Interval(Duration),
    Timestamp(OffsetDateTime),
    TimestampTz(OffsetDateTime),
    TimestampNs(OffsetDateTime),
    TimestampMs(OffsetDateTime),
    TimestampSec(OffsetDateTime),
    InternalId(InternalId),
    String(String),
    Blob(Vec<u8>),
    List(ListValue),
    Array(ListValue),
    Struct(BTreeMap<String, Value>),
    Node(NodeValue),
    Rel(RelValue),
    RecursiveRel(RecursiveRelValue),
    Map(MapValue),
    Union(UnionValue),
    Uuid(Uuid),
    Decimal(BigDecimal),
}

/// Elements of a `List` or `Array` together with their declared type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListValue {
    pub element_type: LogicalType,
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeValue {
    pub id: InternalId,
    pub label: String,
    pub properties: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RelValue {
    pub src_node: InternalId,
    pub dst_node: InternalId,
    pub label: String,
    pub properties: BTreeMap<String, Value>,
}

/// A path through the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecursiveRelValue {
    pub nodes: Vec<NodeValue>,
    pub rels: Vec<RelValue>,
}

/// A map whose keys may be any value, including composite ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MapValue {
    pub key_type: LogicalType,
    pub value_type: LogicalType,
    pub pairs: BTreeMap<Value, Value>,
}

/// The selected value of a union, along with every alternative it allows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnionValue {
    pub types: BTreeMap<String, LogicalType>,
    pub value: Box<Value>,
}

// ── Kinds ───────────────────────────────────────────────────────────

/// The tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int64,
    Int32,
    Int16,
    Int8,
    UInt64,
    UInt32,
    UInt16,
    UInt8,
    Int128,
    Double,
    Float,
    Date,
    Interval,
    Timestamp,
    TimestampTz,
    TimestampNs,
    TimestampMs,
    TimestampSec,
    InternalId,
    String,
    Blob,
    List,
    Array,
    Struct,
    Node,
    Rel,
    RecursiveRel,
    Map,
    Union,
    Uuid,
    Decimal,
}

impl ValueKind {
    pub const ALL: [ValueKind; 33] = [
        ValueKind::Null,
        ValueKind::Bool,
        ValueKind::Int64,
        ValueKind::Int32,
        ValueKind::Int16,
        ValueKind::Int8,
        ValueKind::UInt64,
        ValueKind::UInt32,
        ValueKind::UInt16,
        ValueKind::UInt8,
        ValueKind::Int128,
        ValueKind::Double,
        ValueKind::Float,
        ValueKind::Date,
        ValueKind::Interval,
        ValueKind::Timestamp,
        ValueKind::TimestampTz,
        ValueKind::TimestampNs,
        ValueKind::TimestampMs,
        ValueKind::TimestampSec,
        ValueKind::InternalId,
        ValueKind::String,
        ValueKind::Blob,
        ValueKind::List,
        ValueKind::Array,
        ValueKind::Struct,
        ValueKind::Node,
        ValueKind::Rel,
        ValueKind::RecursiveRel,
        ValueKind::Map,
        ValueKind::Union,
        ValueKind::Uuid,
        ValueKind::Decimal,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            ValueKind::Null => "Null",
            ValueKind::Bool => "Bool",
            ValueKind::Int64 => "Int64",
            ValueKind::Int32 => "Int32",
            ValueKind::Int16 => "Int16",
            ValueKind::Int8 => "Int8",
            ValueKind::UInt64 => "UInt64",
            ValueKind::UInt32 => "UInt32",
            ValueKind::UInt16 => "UInt16",
            ValueKind::UInt8 => "UInt8",
            ValueKind::Int128 => "Int128",
            ValueKind::Double => "Double",
            ValueKind::Float => "Float",
            ValueKind::Date => "Date",
            ValueKind::Interval => "Interval",
            ValueKind::Timestamp => "Timestamp",
            ValueKind::TimestampTz => "TimestampTz",
            ValueKind::TimestampNs => "TimestampNs",
            ValueKind::TimestampMs => "TimestampMs",
            ValueKind::TimestampSec => "TimestampSec",
            ValueKind::InternalId => "InternalID",
            ValueKind::String => "String",
            ValueKind::Blob => "Blob",
            ValueKind::List => "List",
            ValueKind::Array => "Array",
            ValueKind::Struct => "Struct",
            ValueKind::Node => "Node",
            ValueKind::Rel => "Rel",
            ValueKind::RecursiveRel => "RecursiveRel",
            ValueKind::Map => "Map",
            ValueKind::Union => "Union",
            ValueKind::Uuid => "UUID",
            ValueKind::Decimal => "Decimal",
        }
    }

    /// Decode the payload of a value of this kind. The tag has already been
    /// checked by the caller.
    pub(crate) fn decode_payload(self, payload: &Json) -> Result<Value, CodecError> {
        let value = match self {
            ValueKind::Null => Value::Null(LogicalType::decode(payload)?),
            ValueKind::Bool => Value::Bool(read_bool(payload)?),
            ValueKind::Int64 => Value::Int64(read_int(payload)?),
            ValueKind::Int32 => Value::Int32(read_int(payload)?),
            ValueKind::Int16 => Value::Int16(read_int(payload)?),
            ValueKind::Int8 => Value::Int8(read_int(payload)?),
            ValueKind::UInt64 => Value::UInt64(read_uint(payload)?),
            ValueKind::UInt32 => Value::UInt32(read_uint(payload)?),
            ValueKind::UInt16 => Value::UInt16(read_uint(payload)?),
            ValueKind::UInt8 => Value::UInt8(read_uint(payload)?),
            ValueKind::Int128 => Value::Int128(scalar::decode_i128(payload)?),
            ValueKind::Double => Value::Double(scalar::decode_f64(payload)?),
            ValueKind::Float => Value::Float(scalar::decode_f32(payload)?),
            ValueKind::Date => Value::Date(scalar::decode_date(payload)?),
            ValueKind::Interval => Value::Interval(scalar::decode_interval(payload)?),
            ValueKind::Timestamp => Value::Timestamp(scalar::decode_timestamp(payload)?),
            ValueKind::TimestampTz => Value::TimestampTz(scalar::decode_timestamp(payload)?),
            ValueKind::TimestampNs => Value::TimestampNs(scalar::decode_timestamp(payload)?),
            ValueKind::TimestampMs => Value::TimestampMs(scalar::decode_timestamp(payload)?),
            ValueKind::TimestampSec => Value::TimestampSec(scalar::decode_timestamp(payload)?),
            ValueKind::InternalId => Value::InternalId(InternalId::decode_payload(payload)?),
            ValueKind::String => Value::String(read_string(payload)?),
            ValueKind::Blob => Value::Blob(scalar::decode_blob(payload)?),
            ValueKind::List => Value::List(ListValue::decode_payload(payload)?),
            ValueKind::Array => Value::Array(ListValue::decode_payload(payload)?),
            ValueKind::Struct => Value::Struct(decode_properties(payload)?),
            ValueKind::Node => Value::Node(NodeValue::decode_payload(payload)?),
            ValueKind::Rel => Value::Rel(RelValue::decode_payload(payload)?),
            ValueKind::RecursiveRel => {
                Value::RecursiveRel(RecursiveRelValue::decode_payload(payload)?)
            }
            ValueKind::Map => Value::Map(MapValue::decode_payload(payload)?),
            ValueKind::Union => Value::Union(UnionValue::decode_payload(payload)?),
            ValueKind::Uuid => Value::Uuid(scalar::decode_uuid(payload)?),
            ValueKind::Decimal => Value::Decimal(scalar::decode_decimal(payload)?),
        };
        Ok(value)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ── Value ───────────────────────────────────────────────────────────

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null(_) => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int64(_) => ValueKind::Int64,
            Value::Int32(_) => ValueKind::Int32,
            Value::Int16(_) => ValueKind::Int16,
            Value::Int8(_) => ValueKind::Int8,
            Value::UInt64(_) => ValueKind::UInt64,
            Value::UInt32(_) => ValueKind::UInt32,
            Value::UInt16(_) => ValueKind::UInt16,
            Value::UInt8(_) => ValueKind::UInt8,
            Value::Int128(_) => ValueKind::Int128,
            Value::Double(_) => ValueKind::Double,
            Value::Float(_) => ValueKind::Float,
            Value::Date(_) => ValueKind::Date,
            Value::Interval(_) => ValueKind::Interval,
            Value::Timestamp(_) => ValueKind::Timestamp,
            Value::TimestampTz(_) => ValueKind::TimestampTz,
            Value::TimestampNs(_) => ValueKind::TimestampNs,
            Value::TimestampMs(_) => ValueKind::TimestampMs,
            Value::TimestampSec(_) => ValueKind::TimestampSec,
            Value::InternalId(_) => ValueKind::InternalId,
            Value::String(_) => ValueKind::String,
            Value::Blob(_) => ValueKind::Blob,
            Value::List(_) => ValueKind::List,
            Value::Array(_) => ValueKind::Array,
            Value::Struct(_) => ValueKind::Struct,
            Value::Node(_) => ValueKind::Node,
            Value::Rel(_) => ValueKind::Rel,
            Value::RecursiveRel(_) => ValueKind::RecursiveRel,
            Value::Map(_) => ValueKind::Map,
            Value::Union(_) => ValueKind::Union,
            Value::Uuid(_) => ValueKind::Uuid,
            Value::Decimal(_) => ValueKind::Decimal,
        }
    }

    pub fn list(element_type: LogicalType, values: Vec<Value>) -> Self {
        Value::List(ListValue {
            element_type,
            values,
        })
    }

    pub fn array(element_type: LogicalType, values: Vec<Value>) -> Self {
        Value::Array(ListValue {
            element_type,
            values,
        })
    }

    pub fn structure<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, Value)>,
        S: Into<String>,
    {
        Value::Struct(fields.into_iter().map(|(n, v)| (n.into(), v)).collect())
    }

    pub fn map<I>(key_type: LogicalType, value_type: LogicalType, pairs: I) -> Self
    where
        I: IntoIterator<Item = (Value, Value)>,
    {
        Value::Map(MapValue {
            key_type,
            value_type,
            pairs: pairs.into_iter().collect(),
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// The logical type this value is an instance of.
    ///
    /// Decimal precision is derived from the digits present; struct fields
    /// come out in key order.
    pub fn logical_type(&self) -> LogicalType {
        match self {
            Value::Null(ty) => ty.clone(),
            Value::Bool(_) => LogicalType::Bool,
            Value::Int64(_) => LogicalType::Int64,
            Value::Int32(_) => LogicalType::Int32,
            Value::Int16(_) => LogicalType::Int16,
            Value::Int8(_) => LogicalType::Int8,
            Value::UInt64(_) => LogicalType::UInt64,
            Value::UInt32(_) => LogicalType::UInt32,
            Value::UInt16(_) => LogicalType::UInt16,
            Value::UInt8(_) => LogicalType::UInt8,
            Value::Int128(_) => LogicalType::Int128,
            Value::Double(_) => LogicalType::Double,
            Value::Float(_) => LogicalType::Float,
            Value::Date(_) => LogicalType::Date,
            Value::Interval(_) => LogicalType::Interval,
            Value::Timestamp(_) => LogicalType::Timestamp,
            Value::TimestampTz(_) => LogicalType::TimestampTz,
            Value::TimestampNs(_) => LogicalType::TimestampNs,
            Value::TimestampMs(_) => LogicalType::TimestampMs,
            Value::TimestampSec(_) => LogicalType::TimestampSec,
            Value::InternalId(_) => LogicalType::InternalId,
            Value::String(_) => LogicalType::String,
            Value::Blob(_) => LogicalType::Blob,
            Value::List(list) => LogicalType::list(list.element_type.clone()),
            Value::Array(list) => {
                LogicalType::array(list.element_type.clone(), list.values.len() as u64)
            }
            Value::Struct(fields) => LogicalType::Struct {
                fields: fields
                    .iter()
                    .map(|(name, value)| (name.clone(), value.logical_type()))
                    .collect(),
            },
            Value::Node(_) => LogicalType::Node,
            Value::Rel(_) => LogicalType::Rel,
            Value::RecursiveRel(_) => LogicalType::RecursiveRel,
            Value::Map(map) => LogicalType::map(map.key_type.clone(), map.value_type.clone()),
            Value::Union(union) => LogicalType::Union {
                fields: union
                    .types
                    .iter()
                    .map(|(name, ty)| (name.clone(), ty.clone()))
                    .collect(),
            },
            Value::Uuid(_) => LogicalType::Uuid,
            Value::Decimal(d) => {
                let (_, scale) = d.as_bigint_and_exponent();
                let digits = d.digits();
                let (precision, scale) = match u64::try_from(scale) {
                    Ok(scale) => (digits.max(scale), scale),
                    Err(_) => (digits.saturating_add(scale.unsigned_abs()), 0),
                };
                LogicalType::decimal(
                    u32::try_from(precision).unwrap_or(u32::MAX),
                    u32::try_from(scale).unwrap_or(u32::MAX),
                )
            }
        }
    }

    /// Encode as `{tag: payload}`.
    ///
    /// Fails only for values the wire format cannot represent, such as
    /// dates outside years 0000 through 9999.
    pub fn encode(&self) -> Result<Json, CodecError> {
        let payload = self.encode_payload().map_err(|e| e.within(self.tag()))?;
        Ok(tagged::encode_variant(self, Some(payload)))
    }

    /// Decode any value, dispatching on its tag.
    pub fn decode(json: &Json) -> Result<Self, CodecError> {
        registry::decode_value(json)
    }

    /// Decode a value that must be of `kind`, without a registry lookup.
    pub fn decode_as(kind: ValueKind, json: &Json) -> Result<Self, CodecError> {
        let payload = tagged::require_payload(kind.tag(), tagged::unwrap(json, kind.tag())?)?;
        kind.decode_payload(payload).map_err(|e| e.within(kind.tag()))
    }

    pub fn to_json_string(&self) -> Result<String, CodecError> {
        Ok(self.encode()?.to_string())
    }

    pub fn from_json_str(input: &str) -> Result<Self, CodecError> {
        let json: Json =
            serde_json::from_str(input).map_err(|e| CodecError::InvalidJson(e.to_string()))?;
        Value::decode(&json).inspect_err(|e| debug!(error = %e, "value decode failed"))
    }

    fn encode_payload(&self) -> Result<Json, CodecError> {
        let payload = match self {
            Value::Null(ty) => ty.encode(),
            Value::Bool(v) => Json::Bool(*v),
            Value::Int64(v) => Json::from(*v),
            Value::Int32(v) => Json::from(*v),
            Value::Int16(v) => Json::from(*v),
            Value::Int8(v) => Json::from(*v),
            Value::UInt64(v) => Json::from(*v),
            Value::UInt32(v) => Json::from(*v),
            Value::UInt16(v) => Json::from(*v),
            Value::UInt8(v) => Json::from(*v),
            Value::Int128(v) => scalar::encode_i128(*v)?,
            Value::Double(v) => scalar::encode_f64(*v)?,
            Value::Float(v) => scalar::encode_f32(*v)?,
            Value::Date(d) => scalar::encode_date(*d)?,
            Value::Interval(d) => scalar::encode_interval(*d),
            Value::Timestamp(ts)
            | Value::TimestampTz(ts)
            | Value::TimestampNs(ts)
            | Value::TimestampMs(ts)
            | Value::TimestampSec(ts) => scalar::encode_timestamp(*ts)?,
            Value::InternalId(id) => id.encode_payload()?,
            Value::String(s) => Json::String(s.clone()),
            Value::Blob(bytes) => scalar::encode_blob(bytes),
            Value::List(list) | Value::Array(list) => list.encode_payload()?,
            Value::Struct(fields) => encode_properties(fields)?,
            Value::Node(node) => node.encode_payload()?,
            Value::Rel(rel) => rel.encode_payload()?,
            Value::RecursiveRel(path) => path.encode_payload()?,
            Value::Map(map) => map.encode_payload()?,
            Value::Union(union) => union.encode_payload()?,
            Value::Uuid(u) => scalar::encode_uuid(u),
            Value::Decimal(d) => scalar::encode_decimal(d),
        };
        Ok(payload)
    }
}

impl Tagged for Value {
    fn tag(&self) -> &'static str {
        self.kind().tag()
    }
}

// ── Payload codecs ──────────────────────────────────────────────────

fn encode_values(values: &[Value]) -> Result<Json, CodecError> {
    values
        .iter()
        .map(Value::encode)
        .collect::<Result<Vec<_>, _>>()
        .map(Json::Array)
}

fn decode_values(json: &Json) -> Result<Vec<Value>, CodecError> {
    read_array(json)?.iter().map(Value::decode).collect()
}

/// `[[name, value], ...]` for struct fields and entity properties.
fn encode_properties(properties: &BTreeMap<String, Value>) -> Result<Json, CodecError> {
    let pairs = properties
        .iter()
        .map(|(name, value)| Ok((Json::String(name.clone()), value.encode()?)))
        .collect::<Result<Vec<_>, CodecError>>()?;
    Ok(tuple::encode_pairs(pairs))
}

fn decode_properties(json: &Json) -> Result<BTreeMap<String, Value>, CodecError> {
    Ok(tuple::decode_pairs(json, read_string, Value::decode)?
        .into_iter()
        .collect())
}

impl ListValue {
    /// `[element_type, [values...]]`
    fn encode_payload(&self) -> Result<Json, CodecError> {
        Ok(tuple::encode(
            self.element_type.encode(),
            encode_values(&self.values)?,
        ))
    }

    fn decode_payload(payload: &Json) -> Result<Self, CodecError> {
        let (element_type, values) =
            tuple::decode_with(payload, LogicalType::decode, decode_values)?;
        Ok(ListValue {
            element_type,
            values,
        })
    }
}

impl TaggedPayload for NodeValue {
    const TAG: &'static str = "Node";

    fn encode_payload(&self) -> Result<Json, CodecError> {
        Ok(json!({
            "id": self.id.to_json(),
            "label": self.label,
            "properties": encode_properties(&self.properties)?,
        }))
    }

    fn decode_payload(payload: &Json) -> Result<Self, CodecError> {
        Ok(NodeValue {
            id: InternalId::from_json(field(payload, "id")?).map_err(|e| e.within("id"))?,
            label: read_string(field(payload, "label")?).map_err(|e| e.within("label"))?,
            properties: decode_properties(field(payload, "properties")?)
                .map_err(|e| e.within("properties"))?,
        })
    }
}

impl TaggedPayload for RelValue {
    const TAG: &'static str = "Rel";

    fn encode_payload(&self) -> Result<Json, CodecError> {
        Ok(json!({
            "src_node": self.src_node.to_json(),
            "dst_node": self.dst_node.to_json(),
            "label": self.label,
            "properties": encode_properties(&self.properties)?,
        }))
    }

    fn decode_payload(payload: &Json) -> Result<Self, CodecError> {
        Ok(RelValue {
            src_node: InternalId::from_json(field(payload, "src_node")?)
                .map_err(|e| e.within("src_node"))?,
            dst_node: InternalId::from_json(field(payload, "dst_node")?)
                .map_err(|e| e.within("dst_node"))?,
            label: read_string(field(payload, "label")?).map_err(|e| e.within("label"))?,
            properties: decode_properties(field(payload, "properties")?)
                .map_err(|e| e.within("properties"))?,
        })
    }
}

impl TaggedPayload for RecursiveRelValue {
    const TAG: &'static str = "RecursiveRel";

    /// Nodes and rels stay tagged inside the path.
    fn encode_payload(&self) -> Result<Json, CodecError> {
        let nodes = self
            .nodes
            .iter()
            .map(NodeValue::encode_tagged)
            .collect::<Result<Vec<_>, _>>()?;
        let rels = self
            .rels
            .iter()
            .map(RelValue::encode_tagged)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(json!({ "nodes": nodes, "rels": rels }))
    }

    fn decode_payload(payload: &Json) -> Result<Self, CodecError> {
        let nodes: Vec<NodeValue> = read_array(field(payload, "nodes")?)
            .and_then(|items| items.iter().map(NodeValue::decode_tagged).collect())
            .map_err(|e| e.within("nodes"))?;
        let rels: Vec<RelValue> = read_array(field(payload, "rels")?)
            .and_then(|items| items.iter().map(RelValue::decode_tagged).collect())
            .map_err(|e| e.within("rels"))?;
        Ok(RecursiveRelValue { nodes, rels })
    }
}

impl TaggedPayload for MapValue {
    const TAG: &'static str = "Map";

    /// `[[key_type, value_type], [[key, value], ...]]`
    fn encode_payload(&self) -> Result<Json, CodecError> {
        let types = tuple::encode(self.key_type.encode(), self.value_type.encode());
        let pairs = self
            .pairs
            .iter()
            .map(|(k, v)| Ok((k.encode()?, v.encode()?)))
            .collect::<Result<Vec<_>, CodecError>>()?;
        Ok(tuple::encode(types, tuple::encode_pairs(pairs)))
    }

    fn decode_payload(payload: &Json) -> Result<Self, CodecError> {
        let (types, pairs) = tuple::decode(payload)?;
        let (key_type, value_type) =
            tuple::decode_with(types, LogicalType::decode, LogicalType::decode)?;
        let pairs = tuple::decode_pairs(pairs, Value::decode, Value::decode)?;
        Ok(MapValue {
            key_type,
            value_type,
            pairs: pairs.into_iter().collect(),
        })
    }
}

impl TaggedPayload for UnionValue {
    const TAG: &'static str = "Union";

    fn encode_payload(&self) -> Result<Json, CodecError> {
        Ok(json!({
            "types": encode_named_types(&self.types),
            "value": self.value.encode()?,
        }))
    }

    fn decode_payload(payload: &Json) -> Result<Self, CodecError> {
        let types = decode_named_types(field(payload, "types")?)
            .map_err(|e| e.within("types"))?
            .into_iter()
            .collect();
        let value = Value::decode(field(payload, "value")?).map_err(|e| e.within("value"))?;
        Ok(UnionValue {
            types,
            value: Box::new(value),
        })
    }
}

// ── Equality, ordering and hashing ──────────────────────────────────
//
// Floats compare by their IEEE total order and hash by bit pattern, so a
// `Value` can key a `BTreeMap` or `HashMap`. Values of different kinds
// order by kind.

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null(a), Value::Null(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int64(a), Value::Int64(b)) => a.cmp(b),
            (Value::Int32(a), Value::Int32(b)) => a.cmp(b),
            (Value::Int16(a), Value::Int16(b)) => a.cmp(b),
            (Value::Int8(a), Value::Int8(b)) => a.cmp(b),
            (Value::UInt64(a), Value::UInt64(b)) => a.cmp(b),
            (Value::UInt32(a), Value::UInt32(b)) => a.cmp(b),
            (Value::UInt16(a), Value::UInt16(b)) => a.cmp(b),
            (Value::UInt8(a), Value::UInt8(b)) => a.cmp(b),
            (Value::Int128(a), Value::Int128(b)) => a.cmp(b),
            (Value::Double(a), Value::Double(b)) => a.total_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Date(a), Value::Date(b)) => a.cmp(b),
            (Value::Interval(a), Value::Interval(b)) => a.cmp(b),
            (Value::Timestamp(a), Value::Timestamp(b))
            | (Value::TimestampTz(a), Value::TimestampTz(b))
            | (Value::TimestampNs(a), Value::TimestampNs(b))
            | (Value::TimestampMs(a), Value::TimestampMs(b))
            | (Value::TimestampSec(a), Value::TimestampSec(b)) => a.cmp(b),
            (Value::InternalId(a), Value::InternalId(b)) => a.cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
            (Value::List(a), Value::List(b)) | (Value::Array(a), Value::Array(b)) => a.cmp(b),
            (Value::Struct(a), Value::Struct(b)) => a.cmp(b),
            (Value::Node(a), Value::Node(b)) => a.cmp(b),
            (Value::Rel(a), Value::Rel(b)) => a.cmp(b),
            (Value::RecursiveRel(a), Value::RecursiveRel(b)) => a.cmp(b),
            (Value::Map(a), Value::Map(b)) => a.cmp(b),
            (Value::Union(a), Value::Union(b)) => a.cmp(b),
            (Value::Uuid(a), Value::Uuid(b)) => a.cmp(b),
            (Value::Decimal(a), Value::Decimal(b)) => a.cmp(b),
            _ => self.kind().cmp(&other.kind()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Value::Null(ty) => ty.hash(state),
            Value::Bool(v) => v.hash(state),
            Value::Int64(v) => v.hash(state),
            Value::Int32(v) => v.hash(state),
            Value::Int16(v) => v.hash(state),
            Value::Int8(v) => v.hash(state),
            Value::UInt64(v) => v.hash(state),
            Value::UInt32(v) => v.hash(state),
            Value::UInt16(v) => v.hash(state),
            Value::UInt8(v) => v.hash(state),
            Value::Int128(v) => v.hash(state),
            Value::Double(v) => v.to_bits().hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Date(v) => v.hash(state),
            Value::Interval(v) => v.hash(state),
            Value::Timestamp(v)
            | Value::TimestampTz(v)
            | Value::TimestampNs(v)
            | Value::TimestampMs(v)
            | Value::TimestampSec(v) => v.hash(state),
            Value::InternalId(v) => v.hash(state),
            Value::String(v) => v.hash(state),
            Value::Blob(v) => v.hash(state),
            Value::List(v) | Value::Array(v) => v.hash(state),
            Value::Struct(v) => v.hash(state),
            Value::Node(v) => v.hash(state),
            Value::Rel(v) => v.hash(state),
            Value::RecursiveRel(v) => v.hash(state),
            Value::Map(v) => v.hash(state),
            Value::Union(v) => v.hash(state),
            Value::Uuid(v) => v.hash(state),
            Value::Decimal(v) => v.hash(state),
        }
    }
}

// ── Conversions ─────────────────────────────────────────────────────

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i64 => Int64,
    i32 => Int32,
    i16 => Int16,
    i8 => Int8,
    u64 => UInt64,
    u32 => UInt32,
    u16 => UInt16,
    u8 => UInt8,
    i128 => Int128,
    f64 => Double,
    f32 => Float,
    Date => Date,
    Duration => Interval,
    InternalId => InternalId,
    String => String,
    Vec<u8> => Blob,
    NodeValue => Node,
    RelValue => Rel,
    RecursiveRelValue => RecursiveRel,
    MapValue => Map,
    UnionValue => Union,
    Uuid => Uuid,
    BigDecimal => Decimal,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

// ── Display ─────────────────────────────────────────────────────────

fn write_joined<T, F>(f: &mut fmt::Formatter<'_>, items: T, mut item: F) -> fmt::Result
where
    T: IntoIterator,
    F: FnMut(&mut fmt::Formatter<'_>, T::Item) -> fmt::Result,
{
    for (i, entry) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item(f, entry)?;
    }
    Ok(())
}

fn write_properties(f: &mut fmt::Formatter<'_>, props: &BTreeMap<String, Value>) -> fmt::Result {
    f.write_str("{")?;
    write_joined(f, props, |f, (name, value)| write!(f, "{}: {}", name, value))?;
    f.write_str("}")
}

fn write_interval(f: &mut fmt::Formatter<'_>, duration: &Duration) -> fmt::Result {
    let nanos = duration.whole_nanoseconds();
    let sign = if nanos < 0 { "-" } else { "" };
    let nanos = nanos.unsigned_abs();
    let (secs, frac) = (nanos / 1_000_000_000, nanos % 1_000_000_000);
    if frac == 0 {
        write!(f, "{}{}s", sign, secs)
    } else {
        let frac = format!("{:09}", frac);
        write!(f, "{}{}.{}s", sign, secs, frac.trim_end_matches('0'))
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} ", self.id, self.label)?;
        write_properties(f, &self.properties)?;
        f.write_str(")")
    }
}

impl fmt::Display for RelValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})-[{} ", self.src_node, self.label)?;
        write_properties(f, &self.properties)?;
        write!(f, "]->({})", self.dst_node)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null(_) => f.write_str("NULL"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Int32(v) => write!(f, "{}", v),
            Value::Int16(v) => write!(f, "{}", v),
            Value::Int8(v) => write!(f, "{}", v),
            Value::UInt64(v) => write!(f, "{}", v),
            Value::UInt32(v) => write!(f, "{}", v),
            Value::UInt16(v) => write!(f, "{}", v),
            Value::UInt8(v) => write!(f, "{}", v),
            Value::Int128(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Date(d) => match scalar::format_date(*d) {
                Ok(text) => f.write_str(&text),
                Err(_) => write!(f, "{:?}", d),
            },
            Value::Interval(d) => write_interval(f, d),
            Value::Timestamp(ts)
            | Value::TimestampTz(ts)
            | Value::TimestampNs(ts)
            | Value::TimestampMs(ts)
            | Value::TimestampSec(ts) => match scalar::format_timestamp(*ts) {
                Ok(text) => f.write_str(&text),
                Err(_) => write!(f, "{:?}", ts),
            },
            Value::InternalId(id) => write!(f, "{}", id),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Blob(bytes) => {
                for byte in bytes {
                    write!(f, "\\x{:02X}", byte)?;
                }
                Ok(())
            }
            Value::List(list) | Value::Array(list) => {
                f.write_str("[")?;
                write_joined(f, &list.values, |f, v| write!(f, "{}", v))?;
                f.write_str("]")
            }
            Value::Struct(fields) => write_properties(f, fields),
            Value::Node(node) => write!(f, "{}", node),
            Value::Rel(rel) => write!(f, "{}", rel),
            Value::RecursiveRel(path) => {
                f.write_str("{nodes: [")?;
                write_joined(f, &path.nodes, |f, n| write!(f, "{}", n))?;
                f.write_str("], rels: [")?;
                write_joined(f, &path.rels, |f, r| write!(f, "{}", r))?;
                f.write_str("]}")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                write_joined(f, &map.pairs, |f, (k, v)| write!(f, "{}={}", k, v))?;
                f.write_str("}")
            }
            Value::Union(union) => write!(f, "{}", union.value),
            Value::Uuid(u) => write!(f, "{}", u.hyphenated()),
            Value::Decimal(d) => f.write_str(&d.to_plain_string()),
        }
    }
}

// ── serde ───────────────────────────────────────────────────────────

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode()
            .map_err(serde::ser::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        Value::decode(&json).map_err(serde::de::Error::custom)
    }
}
