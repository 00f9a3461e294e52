use std::io::Read;
use std::path::Path;
use std::process;

use graphdb_codec::{CodecError, LogicalType, Value};
use serde_json::Value as Json;
use tracing::{debug, info};

use crate::config::DecodeSettings;
use crate::{print_json, report_error, OutputFormat};

/// Failures of `graphdb decode`, from reading the input to decoding it.
#[derive(Debug, thiserror::Error)]
pub(crate) enum DecodeError {
    #[error("could not read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("input is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input nests {depth} levels deep, the limit is {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// A decoded document, either family.
enum Decoded {
    Value(Value),
    LogicalType(LogicalType),
}

pub(crate) fn cmd_decode(
    file: Option<&Path>,
    logical_type: bool,
    settings: &DecodeSettings,
    output: OutputFormat,
    quiet: bool,
) {
    let decoded = read_input(file).and_then(|text| decode(&text, logical_type, settings));
    let decoded = match decoded {
        Ok(decoded) => decoded,
        Err(e) => {
            report_error(&e.to_string(), output, quiet);
            process::exit(1);
        }
    };

    match (output, decoded) {
        (OutputFormat::Text, Decoded::Value(value)) => {
            println!("{}", value);
            if !quiet {
                println!("type: {}", value.logical_type());
            }
        }
        (OutputFormat::Text, Decoded::LogicalType(ty)) => println!("{}", ty),
        (OutputFormat::Json, Decoded::LogicalType(ty)) => {
            print_json(&ty.encode(), settings.pretty)
        }
        (OutputFormat::Json, Decoded::Value(value)) => match value.encode() {
            Ok(json) => print_json(&json, settings.pretty),
            Err(e) => {
                report_error(&e.to_string(), output, quiet);
                process::exit(1);
            }
        },
    }
}

fn read_input(file: Option<&Path>) -> Result<String, DecodeError> {
    match file {
        Some(path) => {
            debug!(path = %path.display(), "reading input file");
            std::fs::read_to_string(path).map_err(|source| DecodeError::Read {
                path: path.display().to_string(),
                source,
            })
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| DecodeError::Read {
                    path: "<stdin>".to_string(),
                    source,
                })?;
            Ok(text)
        }
    }
}

fn decode(
    text: &str,
    logical_type: bool,
    settings: &DecodeSettings,
) -> Result<Decoded, DecodeError> {
    let json: Json = serde_json::from_str(text)?;
    let depth = nesting_depth(&json);
    if depth > settings.max_depth {
        return Err(DecodeError::DepthLimitExceeded {
            depth,
            limit: settings.max_depth,
        });
    }
    let decoded = if logical_type {
        Decoded::LogicalType(LogicalType::decode(&json)?)
    } else {
        Decoded::Value(Value::decode(&json)?)
    };
    info!(depth = depth as u64, "decoded input");
    Ok(decoded)
}

/// Depth of the deepest array or object; scalars are depth 0.
fn nesting_depth(json: &Json) -> usize {
    let mut deepest = 0;
    let mut stack = vec![(json, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        match node {
            Json::Array(items) => stack.extend(items.iter().map(|item| (item, depth + 1))),
            Json::Object(map) => stack.extend(map.values().map(|item| (item, depth + 1))),
            _ => {}
        }
    }
    deepest
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn depth_counts_containers() {
        assert_eq!(nesting_depth(&json!(1)), 0);
        assert_eq!(nesting_depth(&json!([])), 1);
        assert_eq!(nesting_depth(&json!({"Bool": true})), 1);
        assert_eq!(
            nesting_depth(&json!({"List": ["Int64", [{"Int64": 1}]]})),
            4
        );
    }

    #[test]
    fn deep_input_is_rejected_before_decoding() {
        let settings = DecodeSettings {
            max_depth: 3,
            pretty: false,
        };
        let err = decode(r#"{"List": ["Int64", [{"Int64": 1}]]}"#, false, &settings)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            DecodeError::DepthLimitExceeded { depth: 4, limit: 3 }
        ));
    }

    #[test]
    fn codec_errors_pass_through() {
        let err = decode(r#"{"Nope": 1}"#, false, &DecodeSettings::default())
            .err()
            .unwrap();
        assert!(matches!(err, DecodeError::Codec(CodecError::UnknownTag { .. })));
    }
}
