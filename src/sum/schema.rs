use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::sum::field::{FieldDef, FieldType, IntWidth};
use crate::sum::registry::{SumType, SumTypeBuilder};
use crate::sum::{Result, SumError};

/// Nested record declarations deeper than this are rejected.
const MAX_SCHEMA_DEPTH: u32 = 16;

#[derive(Debug, Deserialize)]
struct SchemaFile {
	name: String,
	variants: Vec<SchemaVariant>,
}

#[derive(Debug, Deserialize)]
struct SchemaVariant {
	name: String,
	discriminant: u64,
	#[serde(default)]
	fields: Vec<SchemaField>,
}

#[derive(Debug, Deserialize)]
struct SchemaField {
	name: String,
	#[serde(rename = "type")]
	ty: SchemaType,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaType {
	Name(String),
	Record {
		record: Vec<SchemaField>,
	},
}

/// Load a sum type schema from a JSON file and finalize it.
pub fn load_schema(path: impl AsRef<Path>) -> Result<SumType> {
	let raw = fs::read(path)?;
	parse_schema(&raw)
}

/// Parse JSON schema bytes into a finalized descriptor.
///
/// Registration runs through the same builder as programmatic use, so the
/// duplicate and empty-set rules apply identically to file-described types.
pub fn parse_schema(bytes: &[u8]) -> Result<SumType> {
	let schema: SchemaFile = serde_json::from_slice(bytes)?;

	let mut builder = SumTypeBuilder::new(schema.name);
	for variant in &schema.variants {
		let fields = convert_fields(&variant.fields, 0)?;
		builder.register(&variant.name, variant.discriminant, fields)?;
	}
	builder.finalize()
}

fn convert_fields(raw: &[SchemaField], depth: u32) -> Result<Vec<FieldDef>> {
	let mut fields = Vec::with_capacity(raw.len());
	for field in raw {
		fields.push(FieldDef::new(field.name.as_str(), convert_type(&field.ty, depth)?));
	}
	Ok(fields)
}

fn convert_type(raw: &SchemaType, depth: u32) -> Result<FieldType> {
	if depth >= MAX_SCHEMA_DEPTH {
		return Err(SumError::SchemaDepthExceeded {
			max_depth: MAX_SCHEMA_DEPTH,
		});
	}

	match raw {
		SchemaType::Name(name) => scalar_type(name),
		SchemaType::Record { record } => Ok(FieldType::Record(convert_fields(record, depth + 1)?)),
	}
}

fn scalar_type(name: &str) -> Result<FieldType> {
	let ty = match name {
		"i8" => FieldType::Int(IntWidth::W8),
		"i16" => FieldType::Int(IntWidth::W16),
		"i32" => FieldType::Int(IntWidth::W32),
		"i64" => FieldType::Int(IntWidth::W64),
		"u8" => FieldType::Uint(IntWidth::W8),
		"u16" => FieldType::Uint(IntWidth::W16),
		"u32" => FieldType::Uint(IntWidth::W32),
		"u64" => FieldType::Uint(IntWidth::W64),
		"f32" => FieldType::F32,
		"f64" => FieldType::F64,
		"handle" => FieldType::Handle,
		other => {
			return Err(SumError::UnknownFieldType {
				type_name: other.to_owned(),
			});
		}
	};
	Ok(ty)
}
