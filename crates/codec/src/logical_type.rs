//! Type descriptors for graph database columns and values.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value as Json};
use tracing::debug;

use crate::error::{CodecError, Family};
use crate::registry;
use crate::scalar::{field, read_string, read_uint};
use crate::tagged::{self, Tagged};
use crate::tuple;

/// A fully resolved logical type.
///
/// Unit variants encode as their bare tag (`"Int64"`); structured variants
/// encode as `{tag: {field: ...}}`. `Struct` and `Union` keep their fields
/// in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogicalType {
    Any,
    Bool,
    Serial,
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
    List {
        child_type: Box<LogicalType>,
    },
    Array {
        child_type: Box<LogicalType>,
        num_elements: u64,
    },
    Struct {
        fields: Vec<(String, LogicalType)>,
    },
    Node,
    Rel,
    RecursiveRel,
    Map {
        key_type: Box<LogicalType>,
        value_type: Box<LogicalType>,
    },
    Union {
        fields: Vec<(String, LogicalType)>,
    },
    Uuid,
    Decimal {
        precision: u32,
        scale: u32,
    },
}

impl LogicalType {
    /// Every variant without a payload.
    pub const UNIT_TYPES: [LogicalType; 28] = [
        LogicalType::Any,
        LogicalType::Bool,
        LogicalType::Serial,
        LogicalType::Int64,
        LogicalType::Int32,
        LogicalType::Int16,
        LogicalType::Int8,
        LogicalType::UInt64,
        LogicalType::UInt32,
        LogicalType::UInt16,
        LogicalType::UInt8,
        LogicalType::Int128,
        LogicalType::Double,
        LogicalType::Float,
        LogicalType::Date,
        LogicalType::Interval,
        LogicalType::Timestamp,
        LogicalType::TimestampTz,
        LogicalType::TimestampNs,
        LogicalType::TimestampMs,
        LogicalType::TimestampSec,
        LogicalType::InternalId,
        LogicalType::String,
        LogicalType::Blob,
        LogicalType::Node,
        LogicalType::Rel,
        LogicalType::RecursiveRel,
        LogicalType::Uuid,
    ];

    /// Tags of the variants that carry a payload, with their payload decoders.
    pub(crate) const PAYLOAD_DECODERS: [(&'static str, PayloadDecoder); 6] = [
        ("List", decode_list),
        ("Array", decode_array),
        ("Struct", decode_struct),
        ("Map", decode_map),
        ("Union", decode_union),
        ("Decimal", decode_decimal),
    ];

    pub fn list(child_type: LogicalType) -> Self {
        LogicalType::List {
            child_type: Box::new(child_type),
        }
    }

    pub fn array(child_type: LogicalType, num_elements: u64) -> Self {
        LogicalType::Array {
            child_type: Box::new(child_type),
            num_elements,
        }
    }

    pub fn map(key_type: LogicalType, value_type: LogicalType) -> Self {
        LogicalType::Map {
            key_type: Box::new(key_type),
            value_type: Box::new(value_type),
        }
    }

    pub fn structure<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, LogicalType)>,
        S: Into<String>,
    {
        LogicalType::Struct {
            fields: fields.into_iter().map(|(n, t)| (n.into(), t)).collect(),
        }
    }

    pub fn union<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, LogicalType)>,
        S: Into<String>,
    {
        LogicalType::Union {
            fields: fields.into_iter().map(|(n, t)| (n.into(), t)).collect(),
        }
    }

    pub fn decimal(precision: u32, scale: u32) -> Self {
        LogicalType::Decimal { precision, scale }
    }

    pub fn is_unit(&self) -> bool {
        self.encode_payload().is_none()
    }

    pub fn encode(&self) -> Json {
        tagged::encode_variant(self, self.encode_payload())
    }

    /// Decode any logical type, dispatching on its tag.
    pub fn decode(json: &Json) -> Result<Self, CodecError> {
        registry::decode_logical_type(json)
    }

    /// Decode a logical type that must carry `tag`, without a registry
    /// lookup. Any other tag on the wire is a [`CodecError::TagMismatch`].
    pub fn decode_as(tag: &str, json: &Json) -> Result<Self, CodecError> {
        let payload = tagged::unwrap(json, tag)?;
        if let Some((_, decode)) = Self::PAYLOAD_DECODERS.iter().find(|(t, _)| *t == tag) {
            let payload = tagged::require_payload(tag, payload)?;
            return decode(payload).map_err(|e| e.within(tag));
        }
        let unit = Self::UNIT_TYPES
            .into_iter()
            .find(|ty| ty.tag() == tag)
            .ok_or_else(|| CodecError::UnknownTag {
                family: Family::LogicalType,
                tag: tag.to_string(),
            })?;
        tagged::require_unit(tag, payload)?;
        Ok(unit)
    }

    pub fn to_json_string(&self) -> String {
        self.encode().to_string()
    }

    pub fn from_json_str(input: &str) -> Result<Self, CodecError> {
        let json: Json =
            serde_json::from_str(input).map_err(|e| CodecError::InvalidJson(e.to_string()))?;
        LogicalType::decode(&json)
            .inspect_err(|e| debug!(error = %e, "logical type decode failed"))
    }

    fn encode_payload(&self) -> Option<Json> {
        match self {
            LogicalType::List { child_type } => Some(json!({ "child_type": child_type.encode() })),
            LogicalType::Array {
                child_type,
                num_elements,
            } => Some(json!({
                "child_type": child_type.encode(),
                "num_elements": num_elements,
            })),
            LogicalType::Struct { fields } | LogicalType::Union { fields } => {
                Some(json!({ "fields": encode_named_types(fields.iter().map(|(n, t)| (n, t))) }))
            }
            LogicalType::Map {
                key_type,
                value_type,
            } => Some(json!({
                "key_type": key_type.encode(),
                "value_type": value_type.encode(),
            })),
            LogicalType::Decimal { precision, scale } => Some(json!({
                "precision": precision,
                "scale": scale,
            })),
            _ => None,
        }
    }
}

impl Tagged for LogicalType {
    fn tag(&self) -> &'static str {
        match self {
            LogicalType::Any => "Any",
            LogicalType::Bool => "Bool",
            LogicalType::Serial => "Serial",
            LogicalType::Int64 => "Int64",
            LogicalType::Int32 => "Int32",
            LogicalType::Int16 => "Int16",
            LogicalType::Int8 => "Int8",
            LogicalType::UInt64 => "UInt64",
            LogicalType::UInt32 => "UInt32",
            LogicalType::UInt16 => "UInt16",
            LogicalType::UInt8 => "UInt8",
            LogicalType::Int128 => "Int128",
            LogicalType::Double => "Double",
            LogicalType::Float => "Float",
            LogicalType::Date => "Date",
            LogicalType::Interval => "Interval",
            LogicalType::Timestamp => "Timestamp",
            LogicalType::TimestampTz => "TimestampTz",
            LogicalType::TimestampNs => "TimestampNs",
            LogicalType::TimestampMs => "TimestampMs",
            LogicalType::TimestampSec => "TimestampSec",
            LogicalType::InternalId => "InternalID",
            LogicalType::String => "String",
            LogicalType::Blob => "Blob",
            LogicalType::List { .. } => "List",
            LogicalType::Array { .. } => "Array",
            LogicalType::Struct { .. } => "Struct",
            LogicalType::Node => "Node",
            LogicalType::Rel => "Rel",
            LogicalType::RecursiveRel => "RecursiveRel",
            LogicalType::Map { .. } => "Map",
            LogicalType::Union { .. } => "Union",
            LogicalType::Uuid => "UUID",
            LogicalType::Decimal { .. } => "Decimal",
        }
    }
}

// ── Payload decoders ────────────────────────────────────────────────

pub(crate) type PayloadDecoder = fn(&Json) -> Result<LogicalType, CodecError>;

fn child(payload: &Json, name: &str) -> Result<LogicalType, CodecError> {
    LogicalType::decode(field(payload, name)?).map_err(|e| e.within(name))
}

fn decode_list(payload: &Json) -> Result<LogicalType, CodecError> {
    Ok(LogicalType::list(child(payload, "child_type")?))
}

fn decode_array(payload: &Json) -> Result<LogicalType, CodecError> {
    let child_type = child(payload, "child_type")?;
    let num_elements =
        read_uint(field(payload, "num_elements")?).map_err(|e| e.within("num_elements"))?;
    Ok(LogicalType::array(child_type, num_elements))
}

fn decode_struct(payload: &Json) -> Result<LogicalType, CodecError> {
    let fields = decode_named_types(field(payload, "fields")?).map_err(|e| e.within("fields"))?;
    Ok(LogicalType::Struct { fields })
}

fn decode_map(payload: &Json) -> Result<LogicalType, CodecError> {
    Ok(LogicalType::map(
        child(payload, "key_type")?,
        child(payload, "value_type")?,
    ))
}

fn decode_union(payload: &Json) -> Result<LogicalType, CodecError> {
    let fields = decode_named_types(field(payload, "fields")?).map_err(|e| e.within("fields"))?;
    Ok(LogicalType::Union { fields })
}

fn decode_decimal(payload: &Json) -> Result<LogicalType, CodecError> {
    let precision = read_uint(field(payload, "precision")?).map_err(|e| e.within("precision"))?;
    let scale = read_uint(field(payload, "scale")?).map_err(|e| e.within("scale"))?;
    Ok(LogicalType::Decimal { precision, scale })
}

/// `[[name, type], ...]`, in the given order.
pub(crate) fn encode_named_types<'a, I>(fields: I) -> Json
where
    I: IntoIterator<Item = (&'a String, &'a LogicalType)>,
{
    tuple::encode_pairs(
        fields
            .into_iter()
            .map(|(name, ty)| (Json::String(name.clone()), ty.encode())),
    )
}

pub(crate) fn decode_named_types(json: &Json) -> Result<Vec<(String, LogicalType)>, CodecError> {
    tuple::decode_pairs(json, read_string, LogicalType::decode)
}

// ── Display ─────────────────────────────────────────────────────────

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[(String, LogicalType)]) -> fmt::Result {
    for (i, (name, ty)) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}: {}", name, ty)?;
    }
    Ok(())
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicalType::List { child_type } => write!(f, "List<{}>", child_type),
            LogicalType::Array {
                child_type,
                num_elements,
            } => write!(f, "Array<{}, {}>", child_type, num_elements),
            LogicalType::Struct { fields } => {
                write!(f, "Struct{{")?;
                write_fields(f, fields)?;
                write!(f, "}}")
            }
            LogicalType::Union { fields } => {
                write!(f, "Union{{")?;
                write_fields(f, fields)?;
                write!(f, "}}")
            }
            LogicalType::Map {
                key_type,
                value_type,
            } => write!(f, "Map<{}, {}>", key_type, value_type),
            LogicalType::Decimal { precision, scale } => {
                write!(f, "Decimal({}, {})", precision, scale)
            }
            unit => f.write_str(unit.tag()),
        }
    }
}

// ── serde ───────────────────────────────────────────────────────────

impl Serialize for LogicalType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.encode().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for LogicalType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let json = Json::deserialize(deserializer)?;
        LogicalType::decode(&json).map_err(serde::de::Error::custom)
    }
}
