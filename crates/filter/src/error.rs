use graphdb_codec::CodecError;

use crate::scalar_type::ScalarType;

/// Errors raised while turning a string parameter into a filter value.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The type exists but has no single-string form (collections, graph
    /// entities, `Null`, `Any`, ...).
    #[error("type '{type_name}' is not supported as a filter value")]
    UnsupportedFilterType { type_name: String },

    #[error("unknown filter type '{type_name}'")]
    UnknownFilterType { type_name: String },

    /// The input is not a valid literal of the requested scalar.
    #[error("invalid {scalar} value '{input}': {reason}")]
    InvalidInput {
        scalar: ScalarType,
        input: String,
        reason: String,
    },

    /// A codec scalar parser rejected the input.
    #[error(transparent)]
    Codec(#[from] CodecError),
}
