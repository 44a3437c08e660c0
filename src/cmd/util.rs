use sumwire::sum::{Result, SumError, Value};

/// Parse a hex byte string, with optional `0x` prefix and embedded spaces.
pub(crate) fn parse_hex(text: &str) -> Result<Vec<u8>> {
	let stripped = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
	let compact: String = stripped.chars().filter(|ch| !ch.is_whitespace()).collect();

	if compact.is_empty() || compact.len() % 2 != 0 {
		return Err(SumError::InvalidHex { text: text.to_owned() });
	}

	let mut out = Vec::with_capacity(compact.len() / 2);
	for pair in compact.as_bytes().chunks_exact(2) {
		let (Some(high), Some(low)) = (hex_digit(pair[0]), hex_digit(pair[1])) else {
			return Err(SumError::InvalidHex { text: text.to_owned() });
		};
		out.push((high << 4) | low);
	}
	Ok(out)
}

fn hex_digit(byte: u8) -> Option<u8> {
	match byte {
		b'0'..=b'9' => Some(byte - b'0'),
		b'a'..=b'f' => Some(byte - b'a' + 10),
		b'A'..=b'F' => Some(byte - b'A' + 10),
		_ => None,
	}
}

/// Render bytes as lowercase hex.
pub(crate) fn render_hex(bytes: &[u8]) -> String {
	let mut out = String::with_capacity(bytes.len() * 2);
	for byte in bytes {
		out.push_str(&format!("{byte:02x}"));
	}
	out
}

/// Pretty-print a serializable value as JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

/// Render a decoded field value as a JSON value.
pub(crate) fn value_json(value: &Value) -> serde_json::Value {
	match value {
		Value::I64(raw) => serde_json::json!(raw),
		Value::U64(raw) => serde_json::json!(raw),
		Value::F32(raw) => serde_json::json!(raw),
		Value::F64(raw) => serde_json::json!(raw),
		Value::Handle(raw) => serde_json::json!(format!("0x{raw:016x}")),
		Value::Record(values) => serde_json::Value::Array(values.iter().map(value_json).collect()),
	}
}

/// Render a decoded field value as a single display token.
pub(crate) fn render_value(value: &Value) -> String {
	match value {
		Value::I64(raw) => raw.to_string(),
		Value::U64(raw) => raw.to_string(),
		Value::F32(raw) => raw.to_string(),
		Value::F64(raw) => raw.to_string(),
		Value::Handle(raw) => format!("0x{raw:016x}"),
		Value::Record(values) => {
			let inner: Vec<String> = values.iter().map(render_value).collect();
			format!("{{{}}}", inner.join(", "))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{parse_hex, render_hex};
	use sumwire::sum::SumError;

	#[test]
	fn hex_parses_with_and_without_prefix() {
		assert_eq!(parse_hex("0001ff").expect("parses"), vec![0, 1, 255]);
		assert_eq!(parse_hex("0x0001FF").expect("parses"), vec![0, 1, 255]);
		assert_eq!(parse_hex("00 01 ff").expect("parses"), vec![0, 1, 255]);
	}

	#[test]
	fn odd_length_and_bad_digits_are_rejected() {
		assert!(matches!(parse_hex("abc").expect_err("odd length"), SumError::InvalidHex { .. }));
		assert!(matches!(parse_hex("zz").expect_err("bad digit"), SumError::InvalidHex { .. }));
		assert!(matches!(parse_hex("").expect_err("empty"), SumError::InvalidHex { .. }));
	}

	#[test]
	fn hex_rendering_round_trips() {
		let bytes = [0_u8, 7, 0xAB, 0xFF];
		assert_eq!(render_hex(&bytes), "0007abff");
		assert_eq!(parse_hex(&render_hex(&bytes)).expect("parses"), bytes);
	}
}
