use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, SumError>;

/// Errors produced while building registries, encoding, and decoding tagged records.
#[derive(Debug, Error)]
pub enum SumError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Schema file was not valid JSON for the expected shape.
	#[error("schema json: {0}")]
	SchemaJson(#[from] serde_json::Error),
	/// Schema field named a type outside the supported set.
	#[error("unknown field type: {type_name}")]
	UnknownFieldType {
		/// Offending type string from the schema.
		type_name: String,
	},
	/// Nested record declarations exceeded the configured depth ceiling.
	#[error("schema nesting depth exceeded (max={max_depth})")]
	SchemaDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Two variants were registered with the same discriminant.
	#[error("duplicate discriminant {discriminant}: first={first}, second={second}")]
	DuplicateDiscriminant {
		/// Discriminant value registered twice.
		discriminant: u64,
		/// Name of the variant that registered it first.
		first: String,
		/// Name of the variant that attempted to reuse it.
		second: String,
	},
	/// Two variants were registered with the same name.
	#[error("duplicate variant name: {name}")]
	DuplicateName {
		/// Variant name registered twice.
		name: String,
	},
	/// `finalize` was called on a registry with zero variants.
	#[error("sum type has no variants")]
	EmptyVariantSet,
	/// Requested variant name is not registered.
	#[error("unknown variant: {name}")]
	UnknownVariant {
		/// Requested variant name.
		name: String,
	},
	/// Value list length does not match the variant's field count.
	#[error("field count mismatch for {variant}: expected {expected}, got {got}")]
	FieldCountMismatch {
		/// Variant being constructed or encoded.
		variant: String,
		/// Declared field count.
		expected: usize,
		/// Supplied value count.
		got: usize,
	},
	/// Supplied value's shape does not match the declared field type.
	#[error("field type mismatch at {field}: expected {expected}, got {got}")]
	FieldTypeMismatch {
		/// Dotted path of the offending field.
		field: String,
		/// Declared field type label.
		expected: &'static str,
		/// Supplied value kind.
		got: &'static str,
	},
	/// Integer value does not fit the declared field width.
	#[error("value {value} out of range for {ty} field {field}")]
	IntOutOfRange {
		/// Dotted path of the offending field.
		field: String,
		/// Supplied integer value.
		value: i128,
		/// Declared integer type label.
		ty: &'static str,
	},
	/// Value was built against a different sum type descriptor.
	#[error("value does not belong to this sum type (variant index {variant_index})")]
	ForeignValue {
		/// Out-of-range variant index carried by the value.
		variant_index: usize,
	},
	/// Record discriminant is not registered in the sum type.
	#[error("unknown discriminant: {discriminant}")]
	UnknownDiscriminant {
		/// Discriminant value carried by the record.
		discriminant: u64,
	},
	/// Record payload storage does not match the descriptor's payload size.
	#[error("payload size mismatch: expected {expected}, got {got}")]
	PayloadSizeMismatch {
		/// Payload size required by the layout.
		expected: usize,
		/// Actual payload length.
		got: usize,
	},
	/// Flat wire image length does not match the descriptor's wire size.
	#[error("wire size mismatch: expected {expected}, got {got}")]
	WireSizeMismatch {
		/// Wire size required by the layout.
		expected: usize,
		/// Actual byte length.
		got: usize,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// CLI hex record argument was invalid.
	#[error("invalid hex record: {text}")]
	InvalidHex {
		/// User-provided hex string.
		text: String,
	},
	/// CLI JSON field value does not fit the declared field type.
	#[error("field {field} json value does not fit {expected}")]
	InvalidFieldJson {
		/// Dotted path of the offending field.
		field: String,
		/// Declared field type label.
		expected: &'static str,
	},
}
