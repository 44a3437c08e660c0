use std::path::PathBuf;

use sumwire::sum::{FieldDef, FieldType, Result, SumError, Value, encode_value, load_schema};

use crate::cmd::util::{emit_json, render_hex};

/// Encode a JSON-described native value into a tagged record.
///
/// `fields` is a JSON array with one entry per declared field, in
/// declaration order; a fieldless variant may omit it.
pub fn run(path: PathBuf, variant: String, fields: Option<String>, json: bool) -> Result<()> {
	let sum = load_schema(&path)?;
	let (_, def) = sum
		.variant_by_name(&variant)
		.ok_or_else(|| SumError::UnknownVariant { name: variant.clone() })?;

	let raw = fields.unwrap_or_else(|| "[]".to_owned());
	let parsed: serde_json::Value = serde_json::from_str(&raw)?;
	let values = values_from_json(def.name.as_ref(), &def.fields, &parsed)?;

	let value = sum.instance(&variant, values)?;
	let record = encode_value(&sum, &value)?;
	let wire = record.to_bytes(sum.layout())?;

	if json {
		return emit_json(&serde_json::json!({
			"variant": variant,
			"discriminant": record.discriminant,
			"payload": render_hex(&record.payload),
			"wire": render_hex(&wire),
		}));
	}

	println!("variant: {}", variant);
	println!("discriminant: {}", record.discriminant);
	println!("payload: {}", render_hex(&record.payload));
	println!("wire: {}", render_hex(&wire));
	Ok(())
}

/// Convert a JSON array into field values matching the declared list.
fn values_from_json(variant: &str, fields: &[FieldDef], raw: &serde_json::Value) -> Result<Vec<Value>> {
	let Some(items) = raw.as_array() else {
		return Err(SumError::InvalidFieldJson {
			field: variant.to_owned(),
			expected: "array",
		});
	};
	if items.len() != fields.len() {
		return Err(SumError::FieldCountMismatch {
			variant: variant.to_owned(),
			expected: fields.len(),
			got: items.len(),
		});
	}

	let mut values = Vec::with_capacity(fields.len());
	for (field, item) in fields.iter().zip(items) {
		values.push(value_from_json(&field.name, &field.ty, item)?);
	}
	Ok(values)
}

fn value_from_json(path: &str, ty: &FieldType, raw: &serde_json::Value) -> Result<Value> {
	let mismatch = || SumError::InvalidFieldJson {
		field: path.to_owned(),
		expected: ty.label(),
	};

	match ty {
		FieldType::Int(_) => raw.as_i64().map(Value::I64).ok_or_else(mismatch),
		FieldType::Uint(_) => raw.as_u64().map(Value::U64).ok_or_else(mismatch),
		FieldType::F32 => raw.as_f64().map(|value| Value::F32(value as f32)).ok_or_else(mismatch),
		FieldType::F64 => raw.as_f64().map(Value::F64).ok_or_else(mismatch),
		FieldType::Handle => handle_from_json(raw).ok_or_else(mismatch),
		FieldType::Record(fields) => {
			let nested = values_from_json(path, fields, raw)?;
			Ok(Value::Record(nested))
		}
	}
}

/// Handles accept a plain number or a `0x`-prefixed hex string.
fn handle_from_json(raw: &serde_json::Value) -> Option<Value> {
	if let Some(token) = raw.as_u64() {
		return Some(Value::Handle(token));
	}
	let text = raw.as_str()?;
	let stripped = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))?;
	u64::from_str_radix(stripped, 16).ok().map(Value::Handle)
}
