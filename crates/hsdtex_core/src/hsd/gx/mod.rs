use crate::hsd::{HsdError, Result};

/// GX texture pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
	/// 4-bit intensity.
	I4,
	/// 8-bit intensity.
	I8,
	/// 4-bit intensity with 4-bit alpha.
	IA4,
	/// 8-bit intensity with 8-bit alpha.
	IA8,
	/// 16-bit colour.
	RGB565,
	/// 16-bit colour with optional 3-bit alpha.
	RGB5A3,
	/// 32-bit colour with alpha, split across two cache lines per block.
	RGBA32,
	/// 4-bit palette index.
	C4,
	/// 8-bit palette index.
	C8,
	/// 14-bit palette index.
	C14X2,
	/// S3TC-style compressed blocks.
	CMPR,
}

impl ImageFormat {
	/// Convert a raw GX format code.
	pub fn from_code(code: u32) -> Result<Self> {
		Ok(match code {
			0x00 => Self::I4,
			0x01 => Self::I8,
			0x02 => Self::IA4,
			0x03 => Self::IA8,
			0x04 => Self::RGB565,
			0x05 => Self::RGB5A3,
			0x06 => Self::RGBA32,
			0x08 => Self::C4,
			0x09 => Self::C8,
			0x0A => Self::C14X2,
			0x0E => Self::CMPR,
			_ => return Err(HsdError::UnknownImageFormat { code }),
		})
	}

	/// Raw GX format code.
	pub fn code(self) -> u32 {
		match self {
			Self::I4 => 0x00,
			Self::I8 => 0x01,
			Self::IA4 => 0x02,
			Self::IA8 => 0x03,
			Self::RGB565 => 0x04,
			Self::RGB5A3 => 0x05,
			Self::RGBA32 => 0x06,
			Self::C4 => 0x08,
			Self::C8 => 0x09,
			Self::C14X2 => 0x0A,
			Self::CMPR => 0x0E,
		}
	}

	/// Stable uppercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::I4 => "I4",
			Self::I8 => "I8",
			Self::IA4 => "IA4",
			Self::IA8 => "IA8",
			Self::RGB565 => "RGB565",
			Self::RGB5A3 => "RGB5A3",
			Self::RGBA32 => "RGBA32",
			Self::C4 => "C4",
			Self::C8 => "C8",
			Self::C14X2 => "C14X2",
			Self::CMPR => "CMPR",
		}
	}

	/// Whether pixels index into a palette.
	pub fn is_paletted(self) -> bool {
		matches!(self, Self::C4 | Self::C8 | Self::C14X2)
	}

	/// Largest palette the format can index, `0` for direct-colour formats.
	pub fn max_palette_entries(self) -> u32 {
		match self {
			Self::C4 => 1 << 4,
			Self::C8 => 1 << 8,
			Self::C14X2 => 1 << 14,
			_ => 0,
		}
	}

	/// Bits stored per pixel.
	pub fn bits_per_pixel(self) -> u32 {
		match self {
			Self::I4 | Self::C4 | Self::CMPR => 4,
			Self::I8 | Self::IA4 | Self::C8 => 8,
			Self::IA8 | Self::RGB565 | Self::RGB5A3 | Self::C14X2 => 16,
			Self::RGBA32 => 32,
		}
	}

	/// Block footprint in pixels as `(width, height)`.
	pub fn block_dims(self) -> (u32, u32) {
		match self {
			Self::I4 | Self::C4 | Self::CMPR => (8, 8),
			Self::I8 | Self::IA4 | Self::C8 => (8, 4),
			Self::IA8 | Self::RGB565 | Self::RGB5A3 | Self::RGBA32 | Self::C14X2 => (4, 4),
		}
	}

	/// Encoded byte size of the base level, padded out to whole blocks.
	pub fn encoded_size(self, width: u32, height: u32) -> usize {
		let (block_w, block_h) = self.block_dims();
		let padded_w = width.div_ceil(block_w) as usize * block_w as usize;
		let padded_h = height.div_ceil(block_h) as usize * block_h as usize;
		padded_w * padded_h * self.bits_per_pixel() as usize / 8
	}
}

/// GX palette (TLUT) entry layout. Entries are always two bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PaletteFormat {
	/// 8-bit intensity with 8-bit alpha.
	#[default]
	IA8,
	/// 16-bit colour.
	RGB565,
	/// 16-bit colour with optional 3-bit alpha.
	RGB5A3,
}

impl PaletteFormat {
	/// Bytes per palette entry.
	pub const ENTRY_SIZE: usize = 2;

	/// Convert a raw GX palette format code.
	pub fn from_code(code: u32) -> Result<Self> {
		Ok(match code {
			0 => Self::IA8,
			1 => Self::RGB565,
			2 => Self::RGB5A3,
			_ => return Err(HsdError::UnknownPaletteFormat { code }),
		})
	}

	/// Raw GX palette format code.
	pub fn code(self) -> u32 {
		match self {
			Self::IA8 => 0,
			Self::RGB565 => 1,
			Self::RGB5A3 => 2,
		}
	}

	/// Stable uppercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::IA8 => "IA8",
			Self::RGB565 => "RGB565",
			Self::RGB5A3 => "RGB5A3",
		}
	}
}

/// Texture coordinate wrap behavior for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WrapMode {
	/// Clamp to the edge texel.
	#[default]
	Clamp,
	/// Tile.
	Repeat,
	/// Tile with mirroring.
	Mirror,
}

impl WrapMode {
	/// Convert a raw GX wrap mode.
	pub fn from_code(code: u32) -> Result<Self> {
		Ok(match code {
			0 => Self::Clamp,
			1 => Self::Repeat,
			2 => Self::Mirror,
			_ => return Err(HsdError::UnknownWrapMode { code }),
		})
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Clamp => "clamp",
			Self::Repeat => "repeat",
			Self::Mirror => "mirror",
		}
	}
}
