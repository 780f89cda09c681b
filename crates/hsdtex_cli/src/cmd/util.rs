/// Print `value` as pretty JSON on stdout.
pub(crate) fn emit_json<T: serde::Serialize>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: failed to encode json: {err}"),
	}
}

/// Render an offset as `0x`-prefixed hex.
pub(crate) fn offset_hex(value: u32) -> String {
	format!("0x{value:08x}")
}

#[cfg(test)]
mod tests {
	use super::offset_hex;

	#[test]
	fn offsets_render_zero_padded() {
		assert_eq!(offset_hex(0), "0x00000000");
		assert_eq!(offset_hex(0xFEE), "0x00000fee");
	}
}
