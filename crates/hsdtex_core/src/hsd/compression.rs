use crate::hsd::{LzssVariant, Result, decompress_with};

/// Compression mode detected for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
	/// Raw uncompressed stream.
	None,
	/// LZSS stream behind a recognised magic header.
	Lzss(LzssVariant),
}

impl Compression {
	/// Render compression mode as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::None => "none",
			Self::Lzss(LzssVariant::Gs) => "lzss-gs",
			Self::Lzss(LzssVariant::LzS) => "lzss-lzs",
			Self::Lzss(LzssVariant::Headerless) => "lzss-headerless",
		}
	}
}

/// Detect and decode compression, returning `(mode, decoded_bytes)`.
///
/// Only magic-bearing headers are recognised; a headerless stream is
/// indistinguishable from raw data and passes through untouched.
pub fn decode_bytes(raw: Vec<u8>) -> Result<(Compression, Vec<u8>)> {
	match LzssVariant::detect(&raw) {
		LzssVariant::Headerless => Ok((Compression::None, raw)),
		variant => {
			let out = decompress_with(variant, &raw)?;
			Ok((Compression::Lzss(variant), out))
		}
	}
}
