//! Named query parameters.

use std::collections::BTreeMap;

use serde_json::{Map, Value as Json};
use tracing::debug;

use crate::error::CodecError;
use crate::value::Value;

/// Query parameters keyed by name.
pub type ParameterMap = BTreeMap<String, Value>;

/// Encode as a JSON object of `name → tagged value`.
pub fn encode_parameters(params: &ParameterMap) -> Result<Json, CodecError> {
    let mut object = Map::new();
    for (name, value) in params {
        object.insert(name.clone(), value.encode().map_err(|e| e.within(name))?);
    }
    Ok(Json::Object(object))
}

pub fn decode_parameters(json: &Json) -> Result<ParameterMap, CodecError> {
    let object = json
        .as_object()
        .ok_or_else(|| CodecError::shape("object of parameters", json))?;
    object
        .iter()
        .map(|(name, value)| {
            let value = Value::decode(value).map_err(|e| e.within(name))?;
            Ok((name.clone(), value))
        })
        .collect::<Result<ParameterMap, CodecError>>()
        .inspect_err(|e| debug!(error = %e, "parameter decode failed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logical_type::LogicalType;
    use serde_json::json;

    #[test]
    fn parameters_round_trip() {
        let params: ParameterMap = [
            ("limit".to_string(), Value::Int64(10)),
            ("name".to_string(), Value::from("Alice")),
            ("since".to_string(), Value::Null(LogicalType::Date)),
        ]
        .into();
        let json = encode_parameters(&params).unwrap();
        assert_eq!(
            json,
            json!({
                "limit": {"Int64": 10},
                "name": {"String": "Alice"},
                "since": {"Null": "Date"}
            })
        );
        assert_eq!(decode_parameters(&json).unwrap(), params);
    }

    #[test]
    fn bad_parameter_is_named_in_error() {
        let err = decode_parameters(&json!({"limit": {"Int64": "ten"}})).unwrap_err();
        assert_eq!(err.context_path(), vec!["limit", "Int64"]);
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(matches!(
            decode_parameters(&json!([1, 2])),
            Err(CodecError::InvalidShape { .. })
        ));
    }
}
