use std::path::PathBuf;

use sumwire::sum::{FieldDef, FieldType, Result, SumError, SumType, field_size, load_schema};

use crate::cmd::util::emit_json;

/// Print registry contents and the computed wire layout for a schema file.
pub fn run(path: PathBuf, variant_name: Option<String>, json: bool) -> Result<()> {
	let sum = load_schema(&path)?;

	if json {
		return emit_json(&schema_json(&sum));
	}

	println!("path: {}", path.display());
	println!("name: {}", sum.name());
	println!("variants: {}", sum.variants().len());
	let layout = sum.layout();
	println!("discriminant_width: {}", layout.discriminant_width);
	println!("payload_offset: {}", layout.payload_offset);
	println!("payload_size: {}", layout.payload_size);
	println!("wire_size: {}", layout.wire_size());

	match variant_name {
		Some(name) => {
			let (idx, _) = sum
				.variant_by_name(&name)
				.ok_or(SumError::UnknownVariant { name })?;
			print_variant(&sum, idx);
		}
		None => {
			for (idx, variant) in sum.variants().iter().enumerate() {
				println!("  {} = {} ({} fields, {} bytes)", variant.name, variant.discriminant, variant.fields.len(), layout.variants[idx].size);
			}
		}
	}

	Ok(())
}

fn print_variant(sum: &SumType, idx: usize) {
	let variant = &sum.variants()[idx];
	let shape = &sum.layout().variants[idx];
	println!("variant: {}", variant.name);
	println!("discriminant: {}", variant.discriminant);
	println!("size: {}", shape.size);
	for (field, offset) in variant.fields.iter().zip(&shape.field_offsets) {
		println!("  +{:<4} {} {}", offset, type_display(&field.ty), field.name);
	}
}

fn type_display(ty: &FieldType) -> String {
	match ty {
		FieldType::Record(fields) => {
			let inner: Vec<String> = fields.iter().map(|field| format!("{}: {}", field.name, type_display(&field.ty))).collect();
			format!("record{{{}}}", inner.join(", "))
		}
		other => other.label().to_owned(),
	}
}

#[derive(serde::Serialize)]
struct SchemaJson {
	name: String,
	discriminant_width: usize,
	payload_offset: usize,
	payload_size: usize,
	wire_size: usize,
	variants: Vec<VariantJson>,
}

#[derive(serde::Serialize)]
struct VariantJson {
	name: String,
	discriminant: u64,
	size: usize,
	fields: Vec<FieldJson>,
}

#[derive(serde::Serialize)]
struct FieldJson {
	name: String,
	#[serde(rename = "type")]
	ty: String,
	offset: usize,
	size: usize,
}

fn schema_json(sum: &SumType) -> SchemaJson {
	let layout = sum.layout();
	SchemaJson {
		name: sum.name().to_owned(),
		discriminant_width: layout.discriminant_width,
		payload_offset: layout.payload_offset,
		payload_size: layout.payload_size,
		wire_size: layout.wire_size(),
		variants: sum
			.variants()
			.iter()
			.enumerate()
			.map(|(idx, variant)| VariantJson {
				name: variant.name.to_string(),
				discriminant: variant.discriminant,
				size: layout.variants[idx].size,
				fields: field_json(&variant.fields, &layout.variants[idx].field_offsets),
			})
			.collect(),
	}
}

fn field_json(fields: &[FieldDef], offsets: &[usize]) -> Vec<FieldJson> {
	fields
		.iter()
		.zip(offsets)
		.map(|(field, offset)| FieldJson {
			name: field.name.to_string(),
			ty: type_display(&field.ty),
			offset: *offset,
			size: field_size(&field.ty),
		})
		.collect()
}
