//! Scalar micro-codecs.
//!
//! Several scalars have bespoke wire forms that differ from what a generic
//! serializer would produce: blobs are arrays of numbers rather than base64,
//! intervals are `[seconds, nanoseconds]` pairs, and every timestamp flavour
//! shares one RFC 3339 string form with nanosecond precision.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde_json::{json, Value as Json};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, Duration, OffsetDateTime};
use uuid::Uuid;

use crate::error::{describe, CodecError};
use crate::tagged::TaggedPayload;
use crate::tuple;

const NANOS_PER_SECOND: i64 = 1_000_000_000;

// ── JSON readers ────────────────────────────────────────────────────

pub(crate) fn read_bool(json: &Json) -> Result<bool, CodecError> {
    json.as_bool()
        .ok_or_else(|| CodecError::shape("boolean", json))
}

pub(crate) fn read_str(json: &Json) -> Result<&str, CodecError> {
    json.as_str().ok_or_else(|| CodecError::shape("string", json))
}

pub(crate) fn read_string(json: &Json) -> Result<String, CodecError> {
    read_str(json).map(str::to_string)
}

pub(crate) fn read_array(json: &Json) -> Result<&Vec<Json>, CodecError> {
    json.as_array().ok_or_else(|| CodecError::shape("array", json))
}

/// Look up a required field of a JSON object.
pub(crate) fn field<'a>(json: &'a Json, name: &str) -> Result<&'a Json, CodecError> {
    let object = json
        .as_object()
        .ok_or_else(|| CodecError::shape("object", json))?;
    object.get(name).ok_or_else(|| CodecError::MissingField {
        field: name.to_string(),
    })
}

/// Read a signed integer and narrow it to `T`.
pub(crate) fn read_int<T: TryFrom<i64>>(json: &Json) -> Result<T, CodecError> {
    let wide = match json.as_i64() {
        Some(wide) => wide,
        None if json.is_u64() => {
            return Err(CodecError::NumberOutOfRange {
                value: describe(json),
                target: std::any::type_name::<T>(),
            })
        }
        None => return Err(CodecError::shape("integer", json)),
    };
    T::try_from(wide).map_err(|_| CodecError::NumberOutOfRange {
        value: wide.to_string(),
        target: std::any::type_name::<T>(),
    })
}

/// Read an unsigned integer and narrow it to `T`.
pub(crate) fn read_uint<T: TryFrom<u64>>(json: &Json) -> Result<T, CodecError> {
    let wide = match json.as_u64() {
        Some(wide) => wide,
        None if json.is_i64() => {
            return Err(CodecError::NumberOutOfRange {
                value: describe(json),
                target: std::any::type_name::<T>(),
            })
        }
        None => return Err(CodecError::shape("unsigned integer", json)),
    };
    T::try_from(wide).map_err(|_| CodecError::NumberOutOfRange {
        value: wide.to_string(),
        target: std::any::type_name::<T>(),
    })
}

// ── Numbers ─────────────────────────────────────────────────────────

/// 128-bit integers are always bare JSON numbers. Values beyond 64 bits
/// rely on serde_json's `arbitrary_precision` feature to keep their digits.
pub fn encode_i128(value: i128) -> Result<Json, CodecError> {
    serde_json::to_value(value).map_err(|_| CodecError::NumberOutOfRange {
        value: value.to_string(),
        target: "JSON number",
    })
}

/// Accepts a JSON integer of any width, or its decimal string form.
pub fn decode_i128(json: &Json) -> Result<i128, CodecError> {
    let digits = match json {
        Json::Number(n) if !n.is_f64() => n.to_string(),
        Json::String(s) => s.clone(),
        other => return Err(CodecError::shape("integer", other)),
    };
    digits
        .parse::<i128>()
        .map_err(|_| CodecError::NumberOutOfRange {
            value: digits,
            target: "i128",
        })
}

/// NaN and the infinities cannot be written as JSON numbers and are
/// rejected rather than replaced.
pub fn encode_f64(value: f64) -> Result<Json, CodecError> {
    serde_json::Number::from_f64(value)
        .map(Json::Number)
        .ok_or_else(|| CodecError::NonFiniteNumber {
            value: value.to_string(),
        })
}

/// Encode through the shortest decimal form of the `f32` so that `90.1f32`
/// is written as `90.1` and not as its widened `f64` expansion.
pub fn encode_f32(value: f32) -> Result<Json, CodecError> {
    let wide = value
        .to_string()
        .parse::<f64>()
        .map_err(|_| CodecError::NonFiniteNumber {
            value: value.to_string(),
        })?;
    encode_f64(wide)
}

pub fn decode_f64(json: &Json) -> Result<f64, CodecError> {
    let value = json
        .as_f64()
        .ok_or_else(|| CodecError::shape("number", json))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CodecError::NumberOutOfRange {
            value: describe(json),
            target: "f64",
        })
    }
}

pub fn decode_f32(json: &Json) -> Result<f32, CodecError> {
    let wide = decode_f64(json)?;
    let narrow = wide as f32;
    if narrow.is_finite() {
        Ok(narrow)
    } else {
        Err(CodecError::NumberOutOfRange {
            value: wide.to_string(),
            target: "f32",
        })
    }
}

// ── Blob ────────────────────────────────────────────────────────────

/// Bytes travel as an array of small integers, never base64.
pub fn encode_blob(bytes: &[u8]) -> Json {
    Json::Array(bytes.iter().map(|b| Json::from(u16::from(*b))).collect())
}

pub fn decode_blob(json: &Json) -> Result<Vec<u8>, CodecError> {
    let items = json
        .as_array()
        .ok_or_else(|| CodecError::shape("array of byte values", json))?;
    items
        .iter()
        .map(|item| {
            let invalid = || CodecError::InvalidByteValue {
                value: item.to_string(),
            };
            let wide = item
                .as_u64()
                .and_then(|v| u16::try_from(v).ok())
                .ok_or_else(invalid)?;
            u8::try_from(wide).map_err(|_| invalid())
        })
        .collect()
}

/// Parse a blob from the text of its JSON array form, e.g. `[0, 1, 255]`.
pub fn parse_blob(input: &str) -> Result<Vec<u8>, CodecError> {
    let json: Json =
        serde_json::from_str(input).map_err(|e| CodecError::InvalidJson(e.to_string()))?;
    decode_blob(&json)
}

// ── Interval ────────────────────────────────────────────────────────

/// Split a duration into whole seconds, rounded to the nearest second with
/// halves away from zero, and the signed nanosecond remainder.
pub fn split_interval(duration: Duration) -> (i64, i64) {
    let secs = duration.whole_seconds();
    let nanos = i64::from(duration.subsec_nanoseconds());
    let half = NANOS_PER_SECOND / 2;
    if nanos >= half {
        if let Some(up) = secs.checked_add(1) {
            return (up, nanos - NANOS_PER_SECOND);
        }
    } else if nanos <= -half {
        if let Some(down) = secs.checked_sub(1) {
            return (down, nanos + NANOS_PER_SECOND);
        }
    }
    (secs, nanos)
}

pub fn encode_interval(duration: Duration) -> Json {
    let (secs, nanos) = split_interval(duration);
    tuple::encode(Json::from(secs), Json::from(nanos))
}

/// Reconstruct `secs * 1e9 + nanos` nanoseconds.
pub fn decode_interval(json: &Json) -> Result<Duration, CodecError> {
    let (secs, nanos) = tuple::decode_with(json, read_int::<i64>, read_int::<i64>)?;
    Duration::seconds(secs)
        .checked_add(Duration::nanoseconds(nanos))
        .ok_or_else(|| CodecError::InvalidInterval {
            reason: format!("[{}, {}] overflows the duration range", secs, nanos),
        })
}

// ── Date ────────────────────────────────────────────────────────────

pub fn format_date(date: Date) -> Result<String, CodecError> {
    date.format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| CodecError::InvalidDate {
            input: date.to_string(),
            reason: e.to_string(),
        })
}

pub fn parse_date(input: &str) -> Result<Date, CodecError> {
    Date::parse(input, format_description!("[year]-[month]-[day]")).map_err(|e| {
        CodecError::InvalidDate {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}

pub fn encode_date(date: Date) -> Result<Json, CodecError> {
    format_date(date).map(Json::String)
}

pub fn decode_date(json: &Json) -> Result<Date, CodecError> {
    parse_date(read_str(json)?)
}

// ── Timestamps ──────────────────────────────────────────────────────

/// RFC 3339 with as many fractional digits as needed, up to nanoseconds.
pub fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, CodecError> {
    timestamp
        .format(&Rfc3339)
        .map_err(|e| CodecError::InvalidTimestamp {
            input: timestamp.to_string(),
            reason: e.to_string(),
        })
}

pub fn parse_timestamp(input: &str) -> Result<OffsetDateTime, CodecError> {
    OffsetDateTime::parse(input, &Rfc3339).map_err(|e| CodecError::InvalidTimestamp {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

pub fn encode_timestamp(timestamp: OffsetDateTime) -> Result<Json, CodecError> {
    format_timestamp(timestamp).map(Json::String)
}

pub fn decode_timestamp(json: &Json) -> Result<OffsetDateTime, CodecError> {
    parse_timestamp(read_str(json)?)
}

// ── Decimal ─────────────────────────────────────────────────────────

/// Plain digits with the value's own scale, never exponent notation.
pub fn encode_decimal(value: &BigDecimal) -> Json {
    Json::String(value.to_plain_string())
}

/// Arbitrary precision: every digit and the scale of `input` are kept.
pub fn parse_decimal(input: &str) -> Result<BigDecimal, CodecError> {
    BigDecimal::from_str(input).map_err(|e| CodecError::InvalidDecimal {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

pub fn decode_decimal(json: &Json) -> Result<BigDecimal, CodecError> {
    parse_decimal(read_str(json)?)
}

// ── UUID ────────────────────────────────────────────────────────────

pub fn encode_uuid(value: &Uuid) -> Json {
    Json::String(value.hyphenated().to_string())
}

/// Only the 36-character hyphenated form is accepted.
pub fn parse_uuid(input: &str) -> Result<Uuid, CodecError> {
    if input.len() != 36 {
        return Err(CodecError::InvalidUuid {
            input: input.to_string(),
            reason: "expected the 36-character hyphenated form".to_string(),
        });
    }
    Uuid::from_str(input).map_err(|e| CodecError::InvalidUuid {
        input: input.to_string(),
        reason: e.to_string(),
    })
}

pub fn decode_uuid(json: &Json) -> Result<Uuid, CodecError> {
    parse_uuid(read_str(json)?)
}

// ── InternalID ──────────────────────────────────────────────────────

/// Identifier of a node or relationship inside the database: the table it
/// lives in and its offset within that table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InternalId {
    pub table_id: u64,
    pub offset: u64,
}

impl InternalId {
    pub fn new(table_id: u64, offset: u64) -> Self {
        InternalId { table_id, offset }
    }

    pub fn to_json(&self) -> Json {
        json!({ "table_id": self.table_id, "offset": self.offset })
    }

    pub fn from_json(json: &Json) -> Result<Self, CodecError> {
        let table_id = read_uint(field(json, "table_id")?).map_err(|e| e.within("table_id"))?;
        let offset = read_uint(field(json, "offset")?).map_err(|e| e.within("offset"))?;
        Ok(InternalId { table_id, offset })
    }
}

impl std::fmt::Display for InternalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.table_id, self.offset)
    }
}

impl TaggedPayload for InternalId {
    const TAG: &'static str = "InternalID";

    fn encode_payload(&self) -> Result<Json, CodecError> {
        Ok(self.to_json())
    }

    fn decode_payload(payload: &Json) -> Result<Self, CodecError> {
        InternalId::from_json(payload)
    }
}
