use crate::sum::field::{FieldDef, FieldType};

/// Handles travel as address-sized tokens.
const HANDLE_SIZE: usize = 8;

/// Round `offset` up to the next multiple of `align`.
pub(crate) fn align_up(offset: usize, align: usize) -> usize {
	debug_assert!(align.is_power_of_two());
	(offset + align - 1) & !(align - 1)
}

/// Storage size of one field in bytes.
pub fn field_size(ty: &FieldType) -> usize {
	match ty {
		FieldType::Int(width) | FieldType::Uint(width) => width.bytes(),
		FieldType::F32 => 4,
		FieldType::F64 => 8,
		FieldType::Handle => HANDLE_SIZE,
		FieldType::Record(fields) => packed_layout(fields).size,
	}
}

/// Natural alignment of one field in bytes.
pub fn field_align(ty: &FieldType) -> usize {
	match ty {
		FieldType::Int(width) | FieldType::Uint(width) => width.bytes(),
		FieldType::F32 => 4,
		FieldType::F64 => 8,
		FieldType::Handle => HANDLE_SIZE,
		FieldType::Record(fields) => fields.iter().map(|field| field_align(&field.ty)).max().unwrap_or(1),
	}
}

/// Field offsets and total extent of one variant (or nested record) shape.
///
/// Fields sit at naturally aligned offsets in declaration order; there is no
/// reordering and no trailing padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantLayout {
	/// Byte offset of each field, in declaration order.
	pub field_offsets: Vec<usize>,
	/// Bytes from the shape start to the end of its last field.
	pub size: usize,
	/// Largest field alignment, 1 for an empty field list.
	pub align: usize,
}

/// Pack an ordered field list at naturally aligned offsets.
pub fn packed_layout(fields: &[FieldDef]) -> VariantLayout {
	let mut field_offsets = Vec::with_capacity(fields.len());
	let mut offset = 0_usize;
	let mut align = 1_usize;

	for field in fields {
		let field_align = field_align(&field.ty);
		offset = align_up(offset, field_align);
		field_offsets.push(offset);
		offset += field_size(&field.ty);
		align = align.max(field_align);
	}

	VariantLayout {
		field_offsets,
		size: offset,
		align,
	}
}

/// Byte-level wire contract computed once at `finalize` time.
///
/// The flat image is `discriminant` first as a little-endian fixed-width
/// integer, then padding up to `payload_offset`, then the shared payload
/// storage. Stable for the lifetime of the owning descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireLayout {
	/// Discriminant storage width in bytes: 4, or 8 when some discriminant
	/// exceeds `u32`.
	pub discriminant_width: usize,
	/// Payload start offset in the flat image.
	pub payload_offset: usize,
	/// Shared payload storage size: the maximum variant size.
	pub payload_size: usize,
	/// Payload alignment: the maximum field alignment across variants.
	pub payload_align: usize,
	/// Per-variant shapes, in registration order.
	pub variants: Vec<VariantLayout>,
}

impl WireLayout {
	/// Compute the wire contract for the given variant shapes.
	pub(crate) fn compute(max_discriminant: u64, shapes: Vec<VariantLayout>) -> Self {
		let discriminant_width = if max_discriminant <= u64::from(u32::MAX) { 4 } else { 8 };
		let payload_size = shapes.iter().map(|shape| shape.size).max().unwrap_or(0);
		let payload_align = shapes.iter().map(|shape| shape.align).max().unwrap_or(1);
		let payload_offset = align_up(discriminant_width, payload_align);

		Self {
			discriminant_width,
			payload_offset,
			payload_size,
			payload_align,
			variants: shapes,
		}
	}

	/// Total flat image size in bytes.
	pub fn wire_size(&self) -> usize {
		self.payload_offset + self.payload_size
	}
}
