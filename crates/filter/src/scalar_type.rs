use std::fmt;
use std::str::FromStr;

use graphdb_codec::scalar;
use graphdb_codec::{Value, ValueKind};
use tracing::debug;

use crate::duration::parse_duration;
use crate::error::FilterError;

/// Type names that exist in the graph database but have no single-string
/// literal form.
const UNSUPPORTED: [&str; 12] = [
    "null",
    "any",
    "serial",
    "internalid",
    "list",
    "array",
    "struct",
    "node",
    "rel",
    "recursiverel",
    "map",
    "union",
];

/// A scalar type that can be built from a single string parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
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
    String,
    Blob,
    Uuid,
    Decimal,
}

impl ScalarType {
    pub const ALL: [ScalarType; 23] = [
        ScalarType::Bool,
        ScalarType::Int64,
        ScalarType::Int32,
        ScalarType::Int16,
        ScalarType::Int8,
        ScalarType::UInt64,
        ScalarType::UInt32,
        ScalarType::UInt16,
        ScalarType::UInt8,
        ScalarType::Int128,
        ScalarType::Double,
        ScalarType::Float,
        ScalarType::Date,
        ScalarType::Interval,
        ScalarType::Timestamp,
        ScalarType::TimestampTz,
        ScalarType::TimestampNs,
        ScalarType::TimestampMs,
        ScalarType::TimestampSec,
        ScalarType::String,
        ScalarType::Blob,
        ScalarType::Uuid,
        ScalarType::Decimal,
    ];

    /// The lowercase name used in filter definitions.
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Int64 => "int64",
            ScalarType::Int32 => "int32",
            ScalarType::Int16 => "int16",
            ScalarType::Int8 => "int8",
            ScalarType::UInt64 => "uint64",
            ScalarType::UInt32 => "uint32",
            ScalarType::UInt16 => "uint16",
            ScalarType::UInt8 => "uint8",
            ScalarType::Int128 => "int128",
            ScalarType::Double => "double",
            ScalarType::Float => "float",
            ScalarType::Date => "date",
            ScalarType::Interval => "interval",
            ScalarType::Timestamp => "timestamp",
            ScalarType::TimestampTz => "timestamptz",
            ScalarType::TimestampNs => "timestampns",
            ScalarType::TimestampMs => "timestampms",
            ScalarType::TimestampSec => "timestampsec",
            ScalarType::String => "string",
            ScalarType::Blob => "blob",
            ScalarType::Uuid => "uuid",
            ScalarType::Decimal => "decimal",
        }
    }

    /// The value variant this scalar produces.
    pub fn kind(self) -> ValueKind {
        match self {
            ScalarType::Bool => ValueKind::Bool,
            ScalarType::Int64 => ValueKind::Int64,
            ScalarType::Int32 => ValueKind::Int32,
            ScalarType::Int16 => ValueKind::Int16,
            ScalarType::Int8 => ValueKind::Int8,
            ScalarType::UInt64 => ValueKind::UInt64,
            ScalarType::UInt32 => ValueKind::UInt32,
            ScalarType::UInt16 => ValueKind::UInt16,
            ScalarType::UInt8 => ValueKind::UInt8,
            ScalarType::Int128 => ValueKind::Int128,
            ScalarType::Double => ValueKind::Double,
            ScalarType::Float => ValueKind::Float,
            ScalarType::Date => ValueKind::Date,
            ScalarType::Interval => ValueKind::Interval,
            ScalarType::Timestamp => ValueKind::Timestamp,
            ScalarType::TimestampTz => ValueKind::TimestampTz,
            ScalarType::TimestampNs => ValueKind::TimestampNs,
            ScalarType::TimestampMs => ValueKind::TimestampMs,
            ScalarType::TimestampSec => ValueKind::TimestampSec,
            ScalarType::String => ValueKind::String,
            ScalarType::Blob => ValueKind::Blob,
            ScalarType::Uuid => ValueKind::Uuid,
            ScalarType::Decimal => ValueKind::Decimal,
        }
    }

    /// Build a value of this type from its string literal.
    ///
    /// Integers are decimal and range-checked, `bool` accepts `1`, `t`,
    /// `true` and `0`, `f`, `false` in any of their usual capitalisations,
    /// intervals use duration literals (`1h30m`), timestamps use RFC 3339
    /// and blobs a JSON array of byte values.
    pub fn parse(self, input: &str) -> Result<Value, FilterError> {
        let value = match self {
            ScalarType::Bool => Value::Bool(
                parse_bool(input).ok_or_else(|| self.invalid(input, "expected a boolean"))?,
            ),
            ScalarType::Int64 => Value::Int64(self.parse_number(input)?),
            ScalarType::Int32 => Value::Int32(self.parse_number(input)?),
            ScalarType::Int16 => Value::Int16(self.parse_number(input)?),
            ScalarType::Int8 => Value::Int8(self.parse_number(input)?),
            ScalarType::UInt64 => Value::UInt64(self.parse_number(input)?),
            ScalarType::UInt32 => Value::UInt32(self.parse_number(input)?),
            ScalarType::UInt16 => Value::UInt16(self.parse_number(input)?),
            ScalarType::UInt8 => Value::UInt8(self.parse_number(input)?),
            ScalarType::Int128 => Value::Int128(self.parse_number(input)?),
            ScalarType::Double => Value::Double(self.parse_finite(input)?),
            ScalarType::Float => Value::Float(self.parse_finite(input)?),
            ScalarType::Date => Value::Date(scalar::parse_date(input)?),
            ScalarType::Interval => Value::Interval(
                parse_duration(input).map_err(|reason| self.invalid(input, reason))?,
            ),
            ScalarType::Timestamp => Value::Timestamp(scalar::parse_timestamp(input)?),
            ScalarType::TimestampTz => Value::TimestampTz(scalar::parse_timestamp(input)?),
            ScalarType::TimestampNs => Value::TimestampNs(scalar::parse_timestamp(input)?),
            ScalarType::TimestampMs => Value::TimestampMs(scalar::parse_timestamp(input)?),
            ScalarType::TimestampSec => Value::TimestampSec(scalar::parse_timestamp(input)?),
            ScalarType::String => Value::String(input.to_string()),
            ScalarType::Blob => Value::Blob(scalar::parse_blob(input)?),
            ScalarType::Uuid => Value::Uuid(scalar::parse_uuid(input)?),
            ScalarType::Decimal => Value::Decimal(scalar::parse_decimal(input)?),
        };
        debug!(scalar = self.name(), "parsed filter value");
        Ok(value)
    }

    fn parse_number<T>(self, input: &str) -> Result<T, FilterError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        input
            .parse()
            .map_err(|e: T::Err| self.invalid(input, e.to_string()))
    }

    /// Floats must stay finite at their own width: `1e40` overflows `float`.
    fn parse_finite<T>(self, input: &str) -> Result<T, FilterError>
    where
        T: FromStr + Copy + Into<f64>,
        T::Err: fmt::Display,
    {
        let value: T = self.parse_number(input)?;
        if value.into().is_finite() {
            Ok(value)
        } else {
            Err(self.invalid(input, "not a finite number"))
        }
    }

    fn invalid(self, input: &str, reason: impl Into<String>) -> FilterError {
        FilterError::InvalidInput {
            scalar: self,
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

fn parse_bool(input: &str) -> Option<bool> {
    match input {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the lowercase name or the wire tag (`timestamptz`,
/// `TimestampTz`), ignoring case.
impl FromStr for ScalarType {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if let Some(scalar) = ScalarType::ALL.into_iter().find(|t| t.name() == lower) {
            return Ok(scalar);
        }
        if UNSUPPORTED.contains(&lower.as_str()) {
            return Err(FilterError::UnsupportedFilterType {
                type_name: s.to_string(),
            });
        }
        Err(FilterError::UnknownFilterType {
            type_name: s.to_string(),
        })
    }
}
