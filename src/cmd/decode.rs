use std::path::PathBuf;

use sumwire::sum::{Result, TaggedRecord, decode_record, load_schema};

use crate::cmd::util::{emit_json, parse_hex, render_value, value_json};

/// Decode a hex wire image back into a native value and print it.
pub fn run(path: PathBuf, hex: String, json: bool) -> Result<()> {
	let sum = load_schema(&path)?;
	let bytes = parse_hex(&hex)?;
	let record = TaggedRecord::from_bytes(sum.layout(), &bytes)?;
	let value = decode_record(&sum, &record)?;
	let variant = &sum.variants()[value.variant_index()];

	if json {
		let mut fields = serde_json::Map::new();
		for (field, field_value) in variant.fields.iter().zip(value.values()) {
			fields.insert(field.name.to_string(), value_json(field_value));
		}
		return emit_json(&serde_json::json!({
			"variant": variant.name.as_ref(),
			"discriminant": record.discriminant,
			"fields": fields,
		}));
	}

	println!("variant: {}", variant.name);
	println!("discriminant: {}", record.discriminant);
	for (field, field_value) in variant.fields.iter().zip(value.values()) {
		println!("  {} = {}", field.name, render_value(field_value));
	}
	Ok(())
}
