use crate::sum::field::{FieldDef, FieldType, IntWidth};
use crate::sum::{Result, SumError};

/// One native-side field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Signed integer, carried widened to 64 bits.
	I64(i64),
	/// Unsigned integer, carried widened to 64 bits.
	U64(u64),
	/// 32-bit float.
	F32(f32),
	/// 64-bit float.
	F64(f64),
	/// Opaque address-sized handle, passed through bit-identically.
	Handle(u64),
	/// Nested record values in field declaration order.
	Record(Vec<Value>),
}

impl Value {
	/// Short kind label used in error messages.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::I64(_) => "i64",
			Value::U64(_) => "u64",
			Value::F32(_) => "f32",
			Value::F64(_) => "f64",
			Value::Handle(_) => "handle",
			Value::Record(_) => "record",
		}
	}
}

/// A native sum-type value: one registered variant plus its field values.
///
/// Built through [`SumType::instance`](crate::sum::SumType::instance), which
/// validates the shape against the descriptor, so a `SumValue` always
/// matches one registered variant of the descriptor that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SumValue {
	pub(crate) variant: usize,
	pub(crate) values: Vec<Value>,
}

impl SumValue {
	/// Index of the variant within its descriptor's registration order.
	pub fn variant_index(&self) -> usize {
		self.variant
	}

	/// Field values in declaration order.
	pub fn values(&self) -> &[Value] {
		&self.values
	}
}

/// Check one value against one declared field type.
///
/// `path` is the dotted field path used for error reporting.
pub(crate) fn check_field(path: &str, ty: &FieldType, value: &Value) -> Result<()> {
	match (ty, value) {
		(FieldType::Int(width), Value::I64(raw)) => check_signed_range(path, *width, *raw),
		(FieldType::Uint(width), Value::U64(raw)) => check_unsigned_range(path, *width, *raw),
		(FieldType::F32, Value::F32(_)) => Ok(()),
		(FieldType::F64, Value::F64(_)) => Ok(()),
		(FieldType::Handle, Value::Handle(_)) => Ok(()),
		(FieldType::Record(fields), Value::Record(values)) => check_record(path, fields, values),
		(ty, value) => Err(SumError::FieldTypeMismatch {
			field: path.to_owned(),
			expected: ty.label(),
			got: value.kind(),
		}),
	}
}

fn check_record(path: &str, fields: &[FieldDef], values: &[Value]) -> Result<()> {
	if fields.len() != values.len() {
		return Err(SumError::FieldCountMismatch {
			variant: path.to_owned(),
			expected: fields.len(),
			got: values.len(),
		});
	}

	for (field, value) in fields.iter().zip(values) {
		let nested = format!("{path}.{}", field.name);
		check_field(&nested, &field.ty, value)?;
	}
	Ok(())
}

fn check_signed_range(path: &str, width: IntWidth, raw: i64) -> Result<()> {
	let fits = match width {
		IntWidth::W8 => i8::try_from(raw).is_ok(),
		IntWidth::W16 => i16::try_from(raw).is_ok(),
		IntWidth::W32 => i32::try_from(raw).is_ok(),
		IntWidth::W64 => true,
	};
	if fits {
		return Ok(());
	}
	Err(SumError::IntOutOfRange {
		field: path.to_owned(),
		value: i128::from(raw),
		ty: FieldType::Int(width).label(),
	})
}

fn check_unsigned_range(path: &str, width: IntWidth, raw: u64) -> Result<()> {
	let fits = match width {
		IntWidth::W8 => u8::try_from(raw).is_ok(),
		IntWidth::W16 => u16::try_from(raw).is_ok(),
		IntWidth::W32 => u32::try_from(raw).is_ok(),
		IntWidth::W64 => true,
	};
	if fits {
		return Ok(());
	}
	Err(SumError::IntOutOfRange {
		field: path.to_owned(),
		value: i128::from(raw),
		ty: FieldType::Uint(width).label(),
	})
}

#[cfg(test)]
mod tests {
	use super::{Value, check_field};
	use crate::sum::field::{FieldDef, FieldType, IntWidth};
	use crate::sum::SumError;

	#[test]
	fn scalar_shapes_match_their_declared_types() {
		check_field("id", &FieldType::Int(IntWidth::W32), &Value::I64(7)).expect("i32 accepts 7");
		check_field("mask", &FieldType::Uint(IntWidth::W8), &Value::U64(255)).expect("u8 accepts 255");
		check_field("reg", &FieldType::Handle, &Value::Handle(0xdead_beef)).expect("handle accepts token");
	}

	#[test]
	fn kind_mismatch_names_both_sides() {
		let err = check_field("id", &FieldType::Int(IntWidth::W32), &Value::U64(7)).expect_err("mismatch rejected");
		match err {
			SumError::FieldTypeMismatch { field, expected, got } => {
				assert_eq!(field, "id");
				assert_eq!(expected, "i32");
				assert_eq!(got, "u64");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn narrow_int_rejects_out_of_range_value() {
		let err = check_field("level", &FieldType::Int(IntWidth::W8), &Value::I64(200)).expect_err("200 exceeds i8");
		match err {
			SumError::IntOutOfRange { field, value, ty } => {
				assert_eq!(field, "level");
				assert_eq!(value, 200);
				assert_eq!(ty, "i8");
			}
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn nested_record_paths_are_dotted() {
		let point = FieldType::Record(vec![
			FieldDef::new("x", FieldType::F32),
			FieldDef::new("y", FieldType::F32),
		]);
		let bad = Value::Record(vec![Value::F32(1.0), Value::F64(2.0)]);
		let err = check_field("pos", &point, &bad).expect_err("y has wrong width");
		match err {
			SumError::FieldTypeMismatch { field, expected, got } => {
				assert_eq!(field, "pos.y");
				assert_eq!(expected, "f32");
				assert_eq!(got, "f64");
			}
			other => panic!("unexpected error: {other}"),
		}
	}
}
