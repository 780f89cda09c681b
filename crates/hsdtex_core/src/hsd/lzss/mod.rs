use tracing::debug;

use crate::hsd::bytes::{Cursor, first4};
use crate::hsd::{HsdError, Result, SizeKind};

/// History window size in bytes.
pub const WINDOW_SIZE: usize = 4096;
/// Initial write position inside the zeroed history window.
pub const WINDOW_START: usize = 0xFEE;
/// Magic of the big-endian `LZSS` header.
pub const GS_MAGIC: &[u8] = b"LZSS";
/// Magic of the little-endian `LzS` header.
pub const LZS_MAGIC: &[u8] = b"LzS";

const MIN_MATCH: usize = 3;
// Upper bound of output bytes per input byte: 8 references of 18 bytes per 17 input bytes.
const MAX_EXPANSION: usize = 9;

/// Header layout wrapping an LZSS token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LzssVariant {
	/// Four-byte little-endian decompressed size, no magic.
	Headerless,
	/// `LzS` magic with little-endian sizes at 8 and 12.
	LzS,
	/// `LZSS` magic with big-endian sizes at 4 and 8.
	Gs,
}

impl LzssVariant {
	/// Guess the variant from leading magic. Headerless streams carry none.
	///
	/// A magic only counts when a token stream follows the 16-byte header.
	pub fn detect(input: &[u8]) -> Self {
		if input.len() <= 16 {
			Self::Headerless
		} else if input.starts_with(GS_MAGIC) {
			Self::Gs
		} else if input.starts_with(LZS_MAGIC) {
			Self::LzS
		} else {
			Self::Headerless
		}
	}

	/// Bytes preceding the token stream.
	pub fn header_len(self) -> usize {
		match self {
			Self::Headerless => 4,
			Self::LzS | Self::Gs => 16,
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Headerless => "headerless",
			Self::LzS => "lzs",
			Self::Gs => "gs",
		}
	}
}

/// Decompress `input`, detecting the header variant from its magic.
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
	decompress_with(LzssVariant::detect(input), input)
}

/// Decompress `input` using an explicit header variant.
pub fn decompress_with(variant: LzssVariant, input: &[u8]) -> Result<Vec<u8>> {
	let declared = read_header(variant, input)?;
	debug!(variant = variant.as_str(), input_len = input.len(), declared, "lzss decompress");

	let out = decode_tokens(input, variant.header_len(), declared as usize)?;
	if out.len() as u64 != u64::from(declared) {
		return Err(HsdError::SizeMismatch {
			kind: SizeKind::Decompressed,
			declared: u64::from(declared),
			actual: out.len() as u64,
		});
	}

	Ok(out)
}

/// Validate the header and return the declared decompressed size.
fn read_header(variant: LzssVariant, input: &[u8]) -> Result<u32> {
	let mut cursor = Cursor::new(input);
	match variant {
		LzssVariant::Headerless => cursor.read_u32_le(),
		LzssVariant::LzS => {
			if input.len() <= 16 || !input.starts_with(LZS_MAGIC) {
				return Err(HsdError::InvalidMagic {
					expected: LZS_MAGIC,
					got: first4(input),
				});
			}
			cursor.seek(8)?;
			let decompressed = cursor.read_u32_le()?;
			let compressed = cursor.read_u32_le()?;
			check_compressed_len(u64::from(compressed) + 16, input.len())?;
			Ok(decompressed)
		}
		LzssVariant::Gs => {
			if input.len() <= 16 || !input.starts_with(GS_MAGIC) {
				return Err(HsdError::InvalidMagic {
					expected: GS_MAGIC,
					got: first4(input),
				});
			}
			cursor.seek(4)?;
			let decompressed = cursor.read_u32_be()?;
			let compressed = cursor.read_u32_be()?;
			cursor.skip(4)?;
			check_compressed_len(u64::from(compressed), input.len())?;
			Ok(decompressed)
		}
	}
}

fn check_compressed_len(expected_total: u64, actual: usize) -> Result<()> {
	if expected_total != actual as u64 {
		return Err(HsdError::SizeMismatch {
			kind: SizeKind::Compressed,
			declared: expected_total,
			actual: actual as u64,
		});
	}
	Ok(())
}

/// Run the token automaton over `input[start..]`.
fn decode_tokens(input: &[u8], start: usize, size_hint: usize) -> Result<Vec<u8>> {
	let mut out = Vec::with_capacity(size_hint.min(input.len().saturating_mul(MAX_EXPANSION)));
	let mut window = [0_u8; WINDOW_SIZE];
	let mut write = WINDOW_START;
	let mut pos = start;

	while pos < input.len() {
		let mut flags = input[pos];
		pos += 1;

		for _ in 0..8 {
			if pos >= input.len() {
				break;
			}

			if flags & 1 != 0 {
				let byte = input[pos];
				pos += 1;
				out.push(byte);
				window[write] = byte;
				write = (write + 1) % WINDOW_SIZE;
			} else {
				let Some(pair) = input.get(pos..pos + 2) else {
					return Err(HsdError::UnexpectedEof {
						at: pos,
						need: 2,
						rem: input.len() - pos,
					});
				};
				let (low, high) = (pair[0], pair[1]);
				pos += 2;

				let mut read = usize::from(low) | (usize::from(high & 0xF0) << 4);
				let len = usize::from(high & 0x0F) + MIN_MATCH;
				for _ in 0..len {
					let byte = window[read];
					out.push(byte);
					window[write] = byte;
					read = (read + 1) % WINDOW_SIZE;
					write = (write + 1) % WINDOW_SIZE;
				}
			}

			flags >>= 1;
		}
	}

	Ok(out)
}
