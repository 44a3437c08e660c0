use std::collections::HashMap;

use crate::sum::field::FieldDef;
use crate::sum::layout::{WireLayout, packed_layout};
use crate::sum::value::{SumValue, Value, check_field};
use crate::sum::{Result, SumError};

/// One registered variant: name, discriminant, ordered field list.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantDef {
	/// Variant name, unique within the sum type.
	pub name: Box<str>,
	/// Integer tag, unique within the sum type and never reassigned.
	pub discriminant: u64,
	/// Payload fields in declaration order.
	pub fields: Vec<FieldDef>,
}

/// Accumulates variant registrations before `finalize`.
///
/// Registration is single-threaded by construction (`&mut self`); the
/// finalized [`SumType`] is immutable and may be shared freely.
#[derive(Debug, Default)]
pub struct SumTypeBuilder {
	name: Box<str>,
	variants: Vec<VariantDef>,
}

impl SumTypeBuilder {
	/// Start an empty registry for a sum type called `name`.
	pub fn new(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			variants: Vec::new(),
		}
	}

	/// Register one variant.
	///
	/// Fails if the discriminant or the name is already taken. Registration
	/// order is preserved and becomes the variant iteration order.
	pub fn register(&mut self, name: &str, discriminant: u64, fields: Vec<FieldDef>) -> Result<()> {
		for existing in &self.variants {
			if existing.discriminant == discriminant {
				return Err(SumError::DuplicateDiscriminant {
					discriminant,
					first: existing.name.to_string(),
					second: name.to_owned(),
				});
			}
			if existing.name.as_ref() == name {
				return Err(SumError::DuplicateName { name: name.to_owned() });
			}
		}

		self.variants.push(VariantDef {
			name: name.into(),
			discriminant,
			fields,
		});
		Ok(())
	}

	/// Seal the registry and compute the wire layout.
	///
	/// Fails with [`SumError::EmptyVariantSet`] when nothing was registered;
	/// a sum type with no variants can neither be constructed nor decoded.
	pub fn finalize(self) -> Result<SumType> {
		if self.variants.is_empty() {
			return Err(SumError::EmptyVariantSet);
		}

		let shapes = self.variants.iter().map(|variant| packed_layout(&variant.fields)).collect();
		let max_discriminant = self.variants.iter().map(|variant| variant.discriminant).max().unwrap_or(0);
		let layout = WireLayout::compute(max_discriminant, shapes);

		let mut by_discriminant = HashMap::with_capacity(self.variants.len());
		for (idx, variant) in self.variants.iter().enumerate() {
			by_discriminant.insert(variant.discriminant, idx);
		}

		Ok(SumType {
			name: self.name,
			variants: self.variants,
			by_discriminant,
			layout,
		})
	}
}

/// Immutable sum type descriptor: variants plus the computed wire layout.
///
/// Read-only after construction, so concurrent `encode`/`decode` calls need
/// no locking; publish it once (for example behind an `Arc` or `OnceLock`)
/// before spawning traffic.
#[derive(Debug)]
pub struct SumType {
	name: Box<str>,
	variants: Vec<VariantDef>,
	by_discriminant: HashMap<u64, usize>,
	layout: WireLayout,
}

impl SumType {
	/// Sum type name.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Registered variants in registration order.
	pub fn variants(&self) -> &[VariantDef] {
		&self.variants
	}

	/// Computed wire layout contract.
	pub fn layout(&self) -> &WireLayout {
		&self.layout
	}

	/// Look up a variant by discriminant.
	pub fn variant_by_discriminant(&self, discriminant: u64) -> Option<(usize, &VariantDef)> {
		self.by_discriminant
			.get(&discriminant)
			.map(|idx| (*idx, &self.variants[*idx]))
	}

	/// Look up a variant by name.
	pub fn variant_by_name(&self, name: &str) -> Option<(usize, &VariantDef)> {
		self.variants
			.iter()
			.enumerate()
			.find(|(_, variant)| variant.name.as_ref() == name)
	}

	/// Build a checked native value of the named variant.
	///
	/// Validates variant existence, field arity, field shapes, and integer
	/// ranges. The returned value is guaranteed to encode under this
	/// descriptor.
	pub fn instance(&self, variant_name: &str, values: Vec<Value>) -> Result<SumValue> {
		let (idx, variant) = self
			.variant_by_name(variant_name)
			.ok_or_else(|| SumError::UnknownVariant { name: variant_name.to_owned() })?;

		if values.len() != variant.fields.len() {
			return Err(SumError::FieldCountMismatch {
				variant: variant.name.to_string(),
				expected: variant.fields.len(),
				got: values.len(),
			});
		}

		for (field, value) in variant.fields.iter().zip(&values) {
			check_field(&field.name, &field.ty, value)?;
		}

		Ok(SumValue { variant: idx, values })
	}
}
