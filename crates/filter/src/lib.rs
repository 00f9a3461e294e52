//! Filter values from string parameters.
//!
//! Query filters arrive as `(type name, string)` pairs. This crate turns
//! them into typed [`Value`]s for the scalar types that have a literal
//! form, and rejects collection and graph entity types.
//!
//! ```
//! use graphdb_filter::parse_filter_value;
//! use graphdb_codec::Value;
//!
//! assert_eq!(parse_filter_value("int32", "42").unwrap(), Value::Int32(42));
//! assert!(parse_filter_value("list", "[1]").is_err());
//! ```

mod duration;
pub mod error;
pub mod scalar_type;

pub use duration::parse_duration;
pub use error::FilterError;
pub use scalar_type::ScalarType;

use graphdb_codec::Value;

/// Parse `input` as a literal of the scalar named `type_name`.
pub fn parse_filter_value(type_name: &str, input: &str) -> Result<Value, FilterError> {
    type_name.parse::<ScalarType>()?.parse(input)
}
