use crate::sum::bytes::Cursor;
use crate::sum::layout::WireLayout;
use crate::sum::{Result, SumError};

/// Foreign-compatible tagged record: a discriminant plus shared payload
/// storage sized to the largest variant.
///
/// Records are transient carriers: produced by `encode` or
/// [`TaggedRecord::from_bytes`], consumed by `decode` or
/// [`TaggedRecord::to_bytes`]. The payload bytes are only meaningful under
/// the variant named by `discriminant`; `decode` re-validates both on every
/// call, so a record arriving from the foreign side is never trusted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedRecord {
	/// Variant tag.
	pub discriminant: u64,
	/// Shared payload storage, exactly `layout.payload_size` bytes.
	pub payload: Box<[u8]>,
}

impl TaggedRecord {
	/// Emit the flat little-endian wire image for this record.
	///
	/// Discriminant first at its fixed width, zero padding up to the payload
	/// offset, then the payload storage. A record whose payload length does
	/// not match the layout belongs to a different descriptor and is
	/// rejected.
	pub fn to_bytes(&self, layout: &WireLayout) -> Result<Vec<u8>> {
		if self.payload.len() != layout.payload_size {
			return Err(SumError::PayloadSizeMismatch {
				expected: layout.payload_size,
				got: self.payload.len(),
			});
		}

		let mut out = vec![0_u8; layout.wire_size()];
		let disc = self.discriminant.to_le_bytes();
		out[..layout.discriminant_width].copy_from_slice(&disc[..layout.discriminant_width]);
		out[layout.payload_offset..layout.payload_offset + self.payload.len()].copy_from_slice(&self.payload);
		Ok(out)
	}

	/// Parse a flat wire image back into a record.
	///
	/// The image length must match the layout's wire size exactly; a record
	/// for a different descriptor or a truncated transmission is rejected
	/// before any field interpretation happens.
	pub fn from_bytes(layout: &WireLayout, bytes: &[u8]) -> Result<Self> {
		if bytes.len() != layout.wire_size() {
			return Err(SumError::WireSizeMismatch {
				expected: layout.wire_size(),
				got: bytes.len(),
			});
		}

		let mut cursor = Cursor::new(bytes);
		let discriminant = match layout.discriminant_width {
			8 => cursor.read_u64_le()?,
			_ => u64::from(cursor.read_u32_le()?),
		};
		cursor.skip(layout.payload_offset - layout.discriminant_width)?;
		let payload = cursor.read_exact(layout.payload_size)?;

		Ok(Self {
			discriminant,
			payload: payload.into(),
		})
	}
}
