//! Tag → decoder lookup tables for the generic decoders.
//!
//! Both tables are built on first use and read-only afterwards. Call sites
//! that already know the variant they expect should use the typed decoders
//! ([`Value::decode_as`], [`LogicalType::decode_as`],
//! [`TaggedPayload::decode_tagged`]) instead.
//!
//! [`TaggedPayload::decode_tagged`]: crate::tagged::TaggedPayload::decode_tagged

use std::collections::HashMap;
use std::sync::LazyLock;

use serde_json::Value as Json;
use tracing::trace;

use crate::error::{CodecError, Family};
use crate::logical_type::{LogicalType, PayloadDecoder};
use crate::tagged::{self, Tagged};
use crate::value::{Value, ValueKind};

#[derive(Clone)]
enum TypeDecoder {
    Unit(LogicalType),
    Payload(PayloadDecoder),
}

static LOGICAL_TYPES: LazyLock<HashMap<&'static str, TypeDecoder>> = LazyLock::new(|| {
    let mut table: HashMap<&'static str, TypeDecoder> = LogicalType::UNIT_TYPES
        .into_iter()
        .map(|ty| (ty.tag(), TypeDecoder::Unit(ty)))
        .collect();
    for (tag, decoder) in LogicalType::PAYLOAD_DECODERS {
        table.insert(tag, TypeDecoder::Payload(decoder));
    }
    table
});

static VALUE_KINDS: LazyLock<HashMap<&'static str, ValueKind>> =
    LazyLock::new(|| ValueKind::ALL.into_iter().map(|k| (k.tag(), k)).collect());

/// Decode a logical type of any variant.
pub fn decode_logical_type(json: &Json) -> Result<LogicalType, CodecError> {
    let (tag, payload) = tagged::peek(json)?;
    let decoder = LOGICAL_TYPES
        .get(tag)
        .ok_or_else(|| CodecError::UnknownTag {
            family: Family::LogicalType,
            tag: tag.to_string(),
        })?;
    trace!(tag, "decoding logical type");
    match decoder {
        TypeDecoder::Unit(ty) => {
            tagged::require_unit(tag, payload)?;
            Ok(ty.clone())
        }
        TypeDecoder::Payload(decode) => {
            let payload = tagged::require_payload(tag, payload)?;
            decode(payload).map_err(|e| e.within(tag))
        }
    }
}

/// Decode a value of any variant.
pub fn decode_value(json: &Json) -> Result<Value, CodecError> {
    let (tag, payload) = tagged::peek(json)?;
    let kind = VALUE_KINDS
        .get(tag)
        .copied()
        .ok_or_else(|| CodecError::UnknownTag {
            family: Family::Value,
            tag: tag.to_string(),
        })?;
    trace!(tag, "decoding value");
    let payload = tagged::require_payload(tag, payload)?;
    kind.decode_payload(payload).map_err(|e| e.within(tag))
}

/// Every logical type tag, sorted.
pub fn logical_type_tags() -> Vec<&'static str> {
    let mut tags: Vec<_> = LOGICAL_TYPES.keys().copied().collect();
    tags.sort_unstable();
    tags
}

/// Every value tag, sorted.
pub fn value_tags() -> Vec<&'static str> {
    let mut tags: Vec<_> = VALUE_KINDS.keys().copied().collect();
    tags.sort_unstable();
    tags
}
