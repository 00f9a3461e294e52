//! JSON wire codec for graph database logical types and values.
//!
//! Two parallel variant families, [`LogicalType`] and [`Value`], travel in
//! an externally tagged form: a variant without a payload is a bare string
//! (`"Int64"`), a variant with one is a single-key object
//! (`{"Int64": 42}`).
//!
//! ```
//! use graphdb_codec::{LogicalType, Value};
//! use serde_json::json;
//!
//! let value = Value::list(LogicalType::Int64, vec![Value::Int64(1)]);
//! let json = value.encode().unwrap();
//! assert_eq!(json, json!({"List": ["Int64", [{"Int64": 1}]]}));
//! assert_eq!(Value::decode(&json).unwrap(), value);
//! ```

pub mod error;
pub mod logical_type;
pub mod params;
mod registry;
pub mod scalar;
pub mod tagged;
pub mod tuple;
pub mod value;

pub use error::{CodecError, Family};
pub use logical_type::LogicalType;
pub use params::{decode_parameters, encode_parameters, ParameterMap};
pub use registry::{logical_type_tags, value_tags};
pub use scalar::InternalId;
pub use tagged::{Tagged, TaggedPayload};
pub use value::{
    ListValue, MapValue, NodeValue, RecursiveRelValue, RelValue, UnionValue, Value, ValueKind,
};

pub use bigdecimal::BigDecimal;
pub use time;
pub use uuid::Uuid;
