use std::fmt;

use serde_json::Value as Json;

/// The variant family a tag was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    LogicalType,
    Value,
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::LogicalType => write!(f, "logical type"),
            Family::Value => write!(f, "value"),
        }
    }
}

/// All errors produced while encoding or decoding the wire format.
///
/// Decoding is all-or-nothing: a failure anywhere in a nested structure
/// surfaces here and no partial value is returned. Failures below a tagged
/// variant are wrapped in [`CodecError::Within`] so the path of tags leading
/// to the root cause can be reported.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The tag present on the wire is not the one the caller expected.
    #[error("expected tag '{expected}', found '{found}'")]
    TagMismatch { expected: String, found: String },

    /// The tag is not part of the closed variant set of its family.
    #[error("unknown {family} tag '{tag}'")]
    UnknownTag { family: Family, tag: String },

    /// A tagged object must have exactly one key.
    #[error("tagged object must have exactly 1 key, got {count}")]
    UnexpectedKeyCount { count: usize },

    /// A pair was not encoded as a 2-element array.
    #[error("expected a 2-element array, found {found}")]
    MalformedTuple { found: String },

    #[error("invalid byte value {value}: expected an integer in 0..=255")]
    InvalidByteValue { value: String },

    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("invalid timestamp '{input}': {reason}")]
    InvalidTimestamp { input: String, reason: String },

    #[error("invalid interval: {reason}")]
    InvalidInterval { reason: String },

    #[error("invalid UUID '{input}': {reason}")]
    InvalidUuid { input: String, reason: String },

    #[error("invalid decimal '{input}': {reason}")]
    InvalidDecimal { input: String, reason: String },

    /// A payload-carrying variant arrived as a bare tag string.
    #[error("tag '{tag}' requires a payload")]
    MissingPayload { tag: String },

    /// A unit variant arrived with a non-null payload.
    #[error("tag '{tag}' does not take a payload")]
    UnexpectedPayload { tag: String },

    #[error("missing required field '{field}'")]
    MissingField { field: String },

    /// The JSON kind at this position is wrong (e.g. a string where a
    /// boolean was expected).
    #[error("expected {expected}, found {found}")]
    InvalidShape {
        expected: &'static str,
        found: String,
    },

    #[error("{value} does not fit in {target}")]
    NumberOutOfRange {
        value: String,
        target: &'static str,
    },

    /// NaN and the infinities have no JSON number form.
    #[error("{value} is not a finite number")]
    NonFiniteNumber { value: String },

    #[error("malformed JSON: {0}")]
    InvalidJson(String),

    /// Context wrapper: `source` occurred while handling `context`
    /// (a variant tag or a field name).
    #[error("in '{context}': {source}")]
    Within {
        context: String,
        source: Box<CodecError>,
    },
}

impl CodecError {
    pub(crate) fn shape(expected: &'static str, found: &Json) -> Self {
        CodecError::InvalidShape {
            expected,
            found: describe(found),
        }
    }

    /// Wrap this error with the tag or field it was raised under.
    pub fn within(self, context: &str) -> Self {
        CodecError::Within {
            context: context.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with every [`CodecError::Within`] layer removed.
    pub fn root_cause(&self) -> &CodecError {
        let mut current = self;
        while let CodecError::Within { source, .. } = current {
            current = source;
        }
        current
    }

    /// The chain of tags and fields, outermost first, leading to the root cause.
    pub fn context_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        let mut current = self;
        while let CodecError::Within { context, source } = current {
            path.push(context.as_str());
            current = source;
        }
        path
    }
}

/// Short description of a JSON value for error messages.
pub(crate) fn describe(json: &Json) -> String {
    match json {
        Json::Null => "null".to_string(),
        Json::Bool(b) => format!("boolean {}", b),
        Json::Number(n) => format!("number {}", n),
        Json::String(s) => format!("string {:?}", s),
        Json::Array(items) => format!("array of length {}", items.len()),
        Json::Object(map) => format!("object with {} keys", map.len()),
    }
}
