use crate::sum::field::{FieldType, IntWidth};
use crate::sum::layout::packed_layout;
use crate::sum::record::TaggedRecord;
use crate::sum::registry::SumType;
use crate::sum::value::{SumValue, Value};
use crate::sum::{Result, SumError};

/// Decode a tagged record back into a native value.
///
/// The discriminant is validated against the registry before any payload
/// byte is interpreted; on a miss the record is rejected with
/// [`SumError::UnknownDiscriminant`] and no value is produced. Payload bytes
/// are then read strictly under the located variant's layout: the reader is
/// handed a slice ending at the variant's extent, so bytes belonging only to
/// larger variants are structurally out of reach.
pub fn decode_record(sum: &SumType, record: &TaggedRecord) -> Result<SumValue> {
	let (idx, variant) = sum
		.variant_by_discriminant(record.discriminant)
		.ok_or(SumError::UnknownDiscriminant {
			discriminant: record.discriminant,
		})?;

	let layout = sum.layout();
	if record.payload.len() != layout.payload_size {
		return Err(SumError::PayloadSizeMismatch {
			expected: layout.payload_size,
			got: record.payload.len(),
		});
	}

	let shape = &layout.variants[idx];
	let active = record.payload.get(..shape.size).ok_or(SumError::UnexpectedEof {
		at: 0,
		need: shape.size,
		rem: record.payload.len(),
	})?;

	let mut values = Vec::with_capacity(variant.fields.len());
	for (field, offset) in variant.fields.iter().zip(&shape.field_offsets) {
		values.push(read_field(active, *offset, &field.ty)?);
	}

	Ok(SumValue { variant: idx, values })
}

fn read_field(bytes: &[u8], offset: usize, ty: &FieldType) -> Result<Value> {
	match ty {
		FieldType::Int(width) => {
			let raw = slice_at(bytes, offset, width.bytes())?;
			Ok(Value::I64(read_signed(raw, *width)))
		}
		FieldType::Uint(width) => {
			let raw = slice_at(bytes, offset, width.bytes())?;
			Ok(Value::U64(read_unsigned(raw, *width)))
		}
		FieldType::F32 => {
			let raw = slice_at(bytes, offset, 4)?;
			let mut buf = [0_u8; 4];
			buf.copy_from_slice(raw);
			Ok(Value::F32(f32::from_bits(u32::from_le_bytes(buf))))
		}
		FieldType::F64 => {
			let raw = slice_at(bytes, offset, 8)?;
			let mut buf = [0_u8; 8];
			buf.copy_from_slice(raw);
			Ok(Value::F64(f64::from_bits(u64::from_le_bytes(buf))))
		}
		FieldType::Handle => {
			let raw = slice_at(bytes, offset, 8)?;
			let mut buf = [0_u8; 8];
			buf.copy_from_slice(raw);
			Ok(Value::Handle(u64::from_le_bytes(buf)))
		}
		FieldType::Record(fields) => {
			let shape = packed_layout(fields);
			let mut values = Vec::with_capacity(fields.len());
			for (field, nested) in fields.iter().zip(&shape.field_offsets) {
				values.push(read_field(bytes, offset + nested, &field.ty)?);
			}
			Ok(Value::Record(values))
		}
	}
}

fn read_signed(raw: &[u8], width: IntWidth) -> i64 {
	match width {
		IntWidth::W8 => i64::from(raw[0] as i8),
		IntWidth::W16 => {
			let mut buf = [0_u8; 2];
			buf.copy_from_slice(raw);
			i64::from(i16::from_le_bytes(buf))
		}
		IntWidth::W32 => {
			let mut buf = [0_u8; 4];
			buf.copy_from_slice(raw);
			i64::from(i32::from_le_bytes(buf))
		}
		IntWidth::W64 => {
			let mut buf = [0_u8; 8];
			buf.copy_from_slice(raw);
			i64::from_le_bytes(buf)
		}
	}
}

fn read_unsigned(raw: &[u8], width: IntWidth) -> u64 {
	match width {
		IntWidth::W8 => u64::from(raw[0]),
		IntWidth::W16 => {
			let mut buf = [0_u8; 2];
			buf.copy_from_slice(raw);
			u64::from(u16::from_le_bytes(buf))
		}
		IntWidth::W32 => {
			let mut buf = [0_u8; 4];
			buf.copy_from_slice(raw);
			u64::from(u32::from_le_bytes(buf))
		}
		IntWidth::W64 => {
			let mut buf = [0_u8; 8];
			buf.copy_from_slice(raw);
			u64::from_le_bytes(buf)
		}
	}
}

fn slice_at(bytes: &[u8], offset: usize, size: usize) -> Result<&[u8]> {
	bytes.get(offset..offset + size).ok_or(SumError::UnexpectedEof {
		at: offset,
		need: size,
		rem: bytes.len().saturating_sub(offset),
	})
}

#[cfg(test)]
mod tests {
	use super::decode_record;
	use crate::sum::encode::encode_value;
	use crate::sum::field::{FieldDef, FieldType, IntWidth};
	use crate::sum::record::TaggedRecord;
	use crate::sum::registry::{SumType, SumTypeBuilder};
	use crate::sum::value::Value;
	use crate::sum::SumError;

	fn pin_sum() -> SumType {
		let mut builder = SumTypeBuilder::new("PinState");
		builder
			.register("Open", 0, vec![FieldDef::new("id", FieldType::Int(IntWidth::W32))])
			.expect("Open registers");
		builder.register("Down", 1, vec![]).expect("Down registers");
		builder.finalize().expect("finalizes")
	}

	#[test]
	fn open_record_round_trips() {
		let sum = pin_sum();
		let value = sum.instance("Open", vec![Value::I64(7)]).expect("instance builds");
		let record = encode_value(&sum, &value).expect("encodes");
		let back = decode_record(&sum, &record).expect("decodes");

		assert_eq!(back, value);
		assert_eq!(back.values(), &[Value::I64(7)]);

		// re-encoding reproduces the record bit-identically
		let again = encode_value(&sum, &back).expect("re-encodes");
		assert_eq!(again, record);
	}

	#[test]
	fn unknown_discriminant_is_rejected_before_payload_reads() {
		let sum = pin_sum();
		let record = TaggedRecord {
			discriminant: 5,
			payload: vec![0xFF; sum.layout().payload_size].into(),
		};
		let err = decode_record(&sum, &record).expect_err("5 is not registered");
		match err {
			SumError::UnknownDiscriminant { discriminant } => assert_eq!(discriminant, 5),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn bytes_beyond_the_active_variant_do_not_affect_the_result() {
		let mut builder = SumTypeBuilder::new("Mixed");
		builder
			.register("Small", 0, vec![FieldDef::new("b", FieldType::Uint(IntWidth::W8))])
			.expect("registers");
		builder
			.register("Big", 1, vec![FieldDef::new("q", FieldType::Uint(IntWidth::W64))])
			.expect("registers");
		let sum = builder.finalize().expect("finalizes");

		let value = sum.instance("Small", vec![Value::U64(0x42)]).expect("instance builds");
		let clean = encode_value(&sum, &value).expect("encodes");

		let mut dirty = clean.clone();
		for byte in &mut dirty.payload[1..] {
			*byte = 0xEE;
		}

		let from_clean = decode_record(&sum, &clean).expect("clean decodes");
		let from_dirty = decode_record(&sum, &dirty).expect("dirty decodes");
		assert_eq!(from_clean, from_dirty);
	}

	#[test]
	fn handle_tokens_pass_through_bit_identically() {
		let mut builder = SumTypeBuilder::new("PinWrapper");
		builder
			.register(
				"Bound",
				0,
				vec![
					FieldDef::new("id", FieldType::Int(IntWidth::W32)),
					FieldDef::new("io_register", FieldType::Handle),
				],
			)
			.expect("registers");
		let sum = builder.finalize().expect("finalizes");

		let token = 0xDEAD_BEEF_0000_4020_u64;
		let value = sum
			.instance("Bound", vec![Value::I64(3), Value::Handle(token)])
			.expect("instance builds");
		let record = encode_value(&sum, &value).expect("encodes");
		let back = decode_record(&sum, &record).expect("decodes");

		assert_eq!(back.values()[1], Value::Handle(token));
	}

	#[test]
	fn nested_record_fields_round_trip() {
		let point = FieldType::Record(vec![
			FieldDef::new("x", FieldType::F32),
			FieldDef::new("y", FieldType::F32),
		]);
		let mut builder = SumTypeBuilder::new("Shape");
		builder
			.register("Dot", 0, vec![FieldDef::new("pos", point)])
			.expect("registers");
		let sum = builder.finalize().expect("finalizes");

		let value = sum
			.instance("Dot", vec![Value::Record(vec![Value::F32(1.5), Value::F32(-2.0)])])
			.expect("instance builds");
		let record = encode_value(&sum, &value).expect("encodes");
		let back = decode_record(&sum, &record).expect("decodes");
		assert_eq!(back, value);
	}

	#[test]
	fn payload_of_wrong_size_is_rejected() {
		let sum = pin_sum();
		let record = TaggedRecord {
			discriminant: 0,
			payload: vec![7, 0].into(),
		};
		let err = decode_record(&sum, &record).expect_err("two bytes is not the payload size");
		match err {
			SumError::PayloadSizeMismatch { expected, got } => {
				assert_eq!(expected, 4);
				assert_eq!(got, 2);
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn negative_values_sign_extend() {
		let mut builder = SumTypeBuilder::new("Level");
		builder
			.register("Set", 0, vec![FieldDef::new("delta", FieldType::Int(IntWidth::W16))])
			.expect("registers");
		let sum = builder.finalize().expect("finalizes");

		let value = sum.instance("Set", vec![Value::I64(-300)]).expect("instance builds");
		let record = encode_value(&sum, &value).expect("encodes");
		let back = decode_record(&sum, &record).expect("decodes");
		assert_eq!(back.values(), &[Value::I64(-300)]);
	}
}
