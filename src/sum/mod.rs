mod bytes;
mod decode;
mod encode;
mod error;
mod field;
mod layout;
mod record;
mod registry;
mod schema;
mod value;

/// Tagged record to native value conversion.
pub use decode::decode_record;
/// Native value to tagged record conversion.
pub use encode::encode_value;
/// Error and result aliases.
pub use error::{Result, SumError};
/// Field type descriptors.
pub use field::{FieldDef, FieldType, IntWidth};
/// Wire layout computation types and helpers.
pub use layout::{VariantLayout, WireLayout, field_align, field_size, packed_layout};
/// Tagged record carrier and flat wire image conversion.
pub use record::TaggedRecord;
/// Registry builder and immutable descriptor.
pub use registry::{SumType, SumTypeBuilder, VariantDef};
/// JSON schema loading entry points.
pub use schema::{load_schema, parse_schema};
/// Native-side value model.
pub use value::{SumValue, Value};
