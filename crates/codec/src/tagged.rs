//! The externally-tagged JSON convention.
//!
//! A variant without a payload is a bare string (`"Any"`); a variant with a
//! payload is an object with exactly one key, the tag (`{"Bool": true}`).
//! This is the representation serde uses for externally tagged enums, and
//! the graph service speaks it on the wire.
//!
//! All tag validation lives in this module. Variant families call into it
//! rather than inspecting tags themselves.

use serde_json::{Map, Value as Json};

use crate::error::CodecError;

/// A member of a closed variant family with a fixed wire tag.
pub trait Tagged {
    fn tag(&self) -> &'static str;
}

/// A payload type that always travels under one tag.
///
/// Implementors get typed [`encode_tagged`](TaggedPayload::encode_tagged) and
/// [`decode_tagged`](TaggedPayload::decode_tagged) for free; decoding skips
/// any registry lookup and fails with [`CodecError::TagMismatch`] when the
/// input carries a different tag.
pub trait TaggedPayload: Sized {
    const TAG: &'static str;

    fn encode_payload(&self) -> Result<Json, CodecError>;

    fn decode_payload(payload: &Json) -> Result<Self, CodecError>;

    fn encode_tagged(&self) -> Result<Json, CodecError> {
        let payload = self
            .encode_payload()
            .map_err(|e| e.within(Self::TAG))?;
        Ok(encode(Self::TAG, Some(payload)))
    }

    fn decode_tagged(json: &Json) -> Result<Self, CodecError> {
        let payload = require_payload(Self::TAG, unwrap(json, Self::TAG)?)?;
        Self::decode_payload(payload).map_err(|e| e.within(Self::TAG))
    }
}

/// Emit `tag` as a bare string, or `{tag: payload}` when there is a payload.
pub fn encode(tag: &str, payload: Option<Json>) -> Json {
    match payload {
        None => Json::String(tag.to_string()),
        Some(payload) => {
            let mut map = Map::new();
            map.insert(tag.to_string(), payload);
            Json::Object(map)
        }
    }
}

/// Encode any tagged variant with the given payload.
pub fn encode_variant<T: Tagged + ?Sized>(variant: &T, payload: Option<Json>) -> Json {
    encode(variant.tag(), payload)
}

/// Read the tag and optional payload without checking the tag against an
/// expected one.
pub fn peek(json: &Json) -> Result<(&str, Option<&Json>), CodecError> {
    match json {
        Json::String(tag) => Ok((tag.as_str(), None)),
        Json::Object(map) => {
            let mut entries = map.iter();
            match (entries.next(), entries.next()) {
                (Some((tag, payload)), None) => Ok((tag.as_str(), Some(payload))),
                _ => Err(CodecError::UnexpectedKeyCount { count: map.len() }),
            }
        }
        other => Err(CodecError::shape(
            "tag string or single-key object",
            other,
        )),
    }
}

/// Check that `json` carries `expected` and return its payload, if any.
pub fn unwrap<'a>(json: &'a Json, expected: &str) -> Result<Option<&'a Json>, CodecError> {
    let (tag, payload) = peek(json)?;
    if tag != expected {
        return Err(CodecError::TagMismatch {
            expected: expected.to_string(),
            found: tag.to_string(),
        });
    }
    Ok(payload)
}

/// Payload-carrying variants cannot arrive as a bare tag.
pub fn require_payload<'a>(tag: &str, payload: Option<&'a Json>) -> Result<&'a Json, CodecError> {
    payload.ok_or_else(|| CodecError::MissingPayload {
        tag: tag.to_string(),
    })
}

/// Unit variants accept a bare tag, or `{tag: null}` as serde writes them.
pub fn require_unit(tag: &str, payload: Option<&Json>) -> Result<(), CodecError> {
    match payload {
        None | Some(Json::Null) => Ok(()),
        Some(_) => Err(CodecError::UnexpectedPayload {
            tag: tag.to_string(),
        }),
    }
}
