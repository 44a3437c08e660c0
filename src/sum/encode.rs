use crate::sum::field::FieldType;
use crate::sum::layout::packed_layout;
use crate::sum::record::TaggedRecord;
use crate::sum::registry::SumType;
use crate::sum::value::{SumValue, Value, check_field};
use crate::sum::{Result, SumError};

/// Encode a native value into a tagged record.
///
/// Writes the variant's discriminant and each field value at its layout
/// offset; payload bytes beyond the variant's extent stay zeroed. Any value
/// built by this descriptor's [`SumType::instance`] encodes successfully.
/// The error paths only catch values smuggled in from a different
/// descriptor, which Rust's type system cannot rule out for a runtime
/// registry.
pub fn encode_value(sum: &SumType, value: &SumValue) -> Result<TaggedRecord> {
	let idx = value.variant_index();
	let Some(variant) = sum.variants().get(idx) else {
		return Err(SumError::ForeignValue { variant_index: idx });
	};

	if value.values().len() != variant.fields.len() {
		return Err(SumError::FieldCountMismatch {
			variant: variant.name.to_string(),
			expected: variant.fields.len(),
			got: value.values().len(),
		});
	}

	let shape = &sum.layout().variants[idx];
	let mut payload = vec![0_u8; sum.layout().payload_size];

	for ((field, field_value), offset) in variant.fields.iter().zip(value.values()).zip(&shape.field_offsets) {
		check_field(&field.name, &field.ty, field_value)?;
		write_checked(&mut payload, *offset, &field.name, &field.ty, field_value)?;
	}

	Ok(TaggedRecord {
		discriminant: variant.discriminant,
		payload: payload.into_boxed_slice(),
	})
}

/// Write one already-validated value at `offset`.
///
/// The shape mismatch arm is unreachable after `check_field`, but stays an
/// error rather than a panic.
fn write_checked(payload: &mut [u8], offset: usize, path: &str, ty: &FieldType, value: &Value) -> Result<()> {
	match (ty, value) {
		(FieldType::Int(width), Value::I64(raw)) => {
			let bytes = raw.to_le_bytes();
			write_bytes(payload, offset, &bytes[..width.bytes()])
		}
		(FieldType::Uint(width), Value::U64(raw)) => {
			let bytes = raw.to_le_bytes();
			write_bytes(payload, offset, &bytes[..width.bytes()])
		}
		(FieldType::F32, Value::F32(raw)) => write_bytes(payload, offset, &raw.to_bits().to_le_bytes()),
		(FieldType::F64, Value::F64(raw)) => write_bytes(payload, offset, &raw.to_bits().to_le_bytes()),
		(FieldType::Handle, Value::Handle(raw)) => write_bytes(payload, offset, &raw.to_le_bytes()),
		(FieldType::Record(fields), Value::Record(values)) => {
			let shape = packed_layout(fields);
			for ((field, field_value), nested) in fields.iter().zip(values).zip(&shape.field_offsets) {
				let nested_path = format!("{path}.{}", field.name);
				write_checked(payload, offset + nested, &nested_path, &field.ty, field_value)?;
			}
			Ok(())
		}
		(ty, value) => Err(SumError::FieldTypeMismatch {
			field: path.to_owned(),
			expected: ty.label(),
			got: value.kind(),
		}),
	}
}

fn write_bytes(payload: &mut [u8], offset: usize, bytes: &[u8]) -> Result<()> {
	let end = offset + bytes.len();
	let Some(slot) = payload.get_mut(offset..end) else {
		return Err(SumError::UnexpectedEof {
			at: offset,
			need: bytes.len(),
			rem: payload.len().saturating_sub(offset),
		});
	};
	slot.copy_from_slice(bytes);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::encode_value;
	use crate::sum::field::{FieldDef, FieldType, IntWidth};
	use crate::sum::registry::SumTypeBuilder;
	use crate::sum::value::{SumValue, Value};
	use crate::sum::SumError;

	fn pin_sum() -> crate::sum::registry::SumType {
		let mut builder = SumTypeBuilder::new("PinState");
		builder
			.register("Open", 0, vec![FieldDef::new("id", FieldType::Int(IntWidth::W32))])
			.expect("Open registers");
		builder.register("Down", 1, vec![]).expect("Down registers");
		builder.finalize().expect("finalizes")
	}

	#[test]
	fn encode_writes_discriminant_and_field_bytes() {
		let sum = pin_sum();
		let value = sum.instance("Open", vec![Value::I64(7)]).expect("instance builds");
		let record = encode_value(&sum, &value).expect("encodes");

		assert_eq!(record.discriminant, 0);
		assert_eq!(record.payload.as_ref(), &[7, 0, 0, 0]);
	}

	#[test]
	fn fieldless_variant_payload_is_all_zero() {
		let sum = pin_sum();
		let value = sum.instance("Down", vec![]).expect("instance builds");
		let record = encode_value(&sum, &value).expect("encodes");

		assert_eq!(record.discriminant, 1);
		assert_eq!(record.payload.as_ref(), &[0, 0, 0, 0]);
	}

	#[test]
	fn bytes_beyond_the_active_variant_stay_zeroed() {
		let mut builder = SumTypeBuilder::new("Mixed");
		builder
			.register("Small", 0, vec![FieldDef::new("b", FieldType::Uint(IntWidth::W8))])
			.expect("registers");
		builder
			.register("Big", 1, vec![FieldDef::new("q", FieldType::Uint(IntWidth::W64))])
			.expect("registers");
		let sum = builder.finalize().expect("finalizes");

		let value = sum.instance("Small", vec![Value::U64(0xAB)]).expect("instance builds");
		let record = encode_value(&sum, &value).expect("encodes");
		assert_eq!(record.payload.len(), 8);
		assert_eq!(record.payload[0], 0xAB);
		assert!(record.payload[1..].iter().all(|byte| *byte == 0));
	}

	#[test]
	fn foreign_variant_index_is_rejected() {
		let sum = pin_sum();
		let foreign = SumValue {
			variant: 9,
			values: Vec::new(),
		};
		let err = encode_value(&sum, &foreign).expect_err("index 9 does not exist");
		assert!(matches!(err, SumError::ForeignValue { variant_index: 9 }));
	}
}
