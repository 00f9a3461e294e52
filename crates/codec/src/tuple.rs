//! Ordered pairs encoded as 2-element JSON arrays.
//!
//! Every structural association on the wire (field name and type, map key
//! and value, element type and elements, seconds and nanoseconds) is a
//! pair, because the left-hand side is frequently not a string and JSON
//! object keys cannot carry it.

use serde_json::Value as Json;

use crate::error::{describe, CodecError};

/// Encode a pair as `[first, second]`.
pub fn encode(first: Json, second: Json) -> Json {
    Json::Array(vec![first, second])
}

/// Split a 2-element array into its elements.
pub fn decode(json: &Json) -> Result<(&Json, &Json), CodecError> {
    match json.as_array().map(Vec::as_slice) {
        Some([first, second]) => Ok((first, second)),
        _ => Err(CodecError::MalformedTuple {
            found: describe(json),
        }),
    }
}

/// Decode a pair, converting each side with its own decoder.
pub fn decode_with<A, B>(
    json: &Json,
    first: impl FnOnce(&Json) -> Result<A, CodecError>,
    second: impl FnOnce(&Json) -> Result<B, CodecError>,
) -> Result<(A, B), CodecError> {
    let (a, b) = decode(json)?;
    Ok((first(a)?, second(b)?))
}

/// Encode a sequence of pairs as an array of 2-element arrays.
pub fn encode_pairs<I>(pairs: I) -> Json
where
    I: IntoIterator<Item = (Json, Json)>,
{
    Json::Array(pairs.into_iter().map(|(a, b)| encode(a, b)).collect())
}

/// Decode an array of 2-element arrays, preserving wire order.
pub fn decode_pairs<A, B>(
    json: &Json,
    mut first: impl FnMut(&Json) -> Result<A, CodecError>,
    mut second: impl FnMut(&Json) -> Result<B, CodecError>,
) -> Result<Vec<(A, B)>, CodecError> {
    let items = json
        .as_array()
        .ok_or_else(|| CodecError::shape("array of pairs", json))?;
    items
        .iter()
        .map(|item| {
            let (a, b) = decode(item)?;
            Ok((first(a)?, second(b)?))
        })
        .collect()
}
