/// Storage width of an integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
	/// One byte.
	W8,
	/// Two bytes.
	W16,
	/// Four bytes.
	W32,
	/// Eight bytes.
	W64,
}

impl IntWidth {
	/// Storage size in bytes.
	pub fn bytes(self) -> usize {
		match self {
			IntWidth::W8 => 1,
			IntWidth::W16 => 2,
			IntWidth::W32 => 4,
			IntWidth::W64 => 8,
		}
	}
}

/// Closed set of payload field types.
///
/// Every member has a statically known size and natural alignment, so the
/// shared payload storage size is always computable at `finalize` time.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
	/// Signed integer of the given width.
	Int(IntWidth),
	/// Unsigned integer of the given width.
	Uint(IntWidth),
	/// 32-bit IEEE float.
	F32,
	/// 64-bit IEEE float.
	F64,
	/// Address-sized opaque handle. Copied verbatim across the boundary,
	/// never dereferenced or validated; the referenced resource belongs to
	/// the caller.
	Handle,
	/// Nested record with its own ordered field list.
	Record(Vec<FieldDef>),
}

impl FieldType {
	/// Short type label used in listings and error messages.
	pub fn label(&self) -> &'static str {
		match self {
			FieldType::Int(IntWidth::W8) => "i8",
			FieldType::Int(IntWidth::W16) => "i16",
			FieldType::Int(IntWidth::W32) => "i32",
			FieldType::Int(IntWidth::W64) => "i64",
			FieldType::Uint(IntWidth::W8) => "u8",
			FieldType::Uint(IntWidth::W16) => "u16",
			FieldType::Uint(IntWidth::W32) => "u32",
			FieldType::Uint(IntWidth::W64) => "u64",
			FieldType::F32 => "f32",
			FieldType::F64 => "f64",
			FieldType::Handle => "handle",
			FieldType::Record(_) => "record",
		}
	}
}

/// One named, typed payload field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
	/// Field name, unique within its record in practice but not enforced.
	pub name: Box<str>,
	/// Field type descriptor.
	pub ty: FieldType,
}

impl FieldDef {
	/// Convenience constructor.
	pub fn new(name: impl Into<Box<str>>, ty: FieldType) -> Self {
		Self { name: name.into(), ty }
	}
}
