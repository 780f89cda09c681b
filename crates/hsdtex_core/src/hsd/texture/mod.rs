use crate::hsd::bytes::slice_at;
use crate::hsd::{ImageFormat, PaletteFormat, Result, WrapMode};

/// Palette attached to an index-format texture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
	/// Entry layout.
	pub format: PaletteFormat,
	/// Number of two-byte entries.
	pub entry_count: u32,
	/// Offset of the entries in the source buffer.
	pub data_offset: u32,
	/// Raw entry bytes, `entry_count * 2` long.
	pub data: Vec<u8>,
}

/// Texture located inside a scene or standalone texture file.
///
/// Pixel bytes stay in the source buffer; `data_offset` points at them.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureDescriptor {
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
	/// Pixel layout.
	pub format: ImageFormat,
	/// Offset of the base-level pixel data in the source buffer.
	pub data_offset: u32,
	/// Palette, present for index formats.
	pub palette: Option<Palette>,
	/// S-axis wrap mode.
	pub wrap_s: WrapMode,
	/// T-axis wrap mode.
	pub wrap_t: WrapMode,
	/// S-axis repeat count.
	pub repeat_s: u8,
	/// T-axis repeat count.
	pub repeat_t: u8,
	/// Texture object id word, `0` when the source has none.
	pub texture_id: i32,
	/// Offset of the node the texture was first found at.
	pub source_offset: u32,
}

impl TextureDescriptor {
	/// Identity used to collapse repeated references to the same texture.
	pub fn key(&self) -> TextureKey {
		TextureKey {
			width: self.width,
			height: self.height,
			format: self.format,
			palette_format: self.palette.as_ref().map(|palette| palette.format).unwrap_or_default(),
			data_offset: self.data_offset,
			palette_offset: self.palette.as_ref().map_or(0, |palette| palette.data_offset),
		}
	}

	/// Byte length of the base-level pixel data.
	pub fn encoded_size(&self) -> usize {
		self.format.encoded_size(self.width, self.height)
	}

	/// Borrow the pixel bytes and palette out of `source`.
	pub fn source<'a>(&'a self, source: &'a [u8]) -> Result<TextureSource<'a>> {
		let raw = slice_at(source, self.data_offset, self.encoded_size())?;
		Ok(TextureSource {
			format: self.format,
			raw,
			palette: self.palette.as_ref().map(|palette| (palette.format, palette.data.as_slice())),
			width: self.width,
			height: self.height,
		})
	}
}

/// Structural identity of a texture reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureKey {
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
	/// Pixel layout.
	pub format: ImageFormat,
	/// Palette layout, `IA8` when there is no palette.
	pub palette_format: PaletteFormat,
	/// Pixel data offset.
	pub data_offset: u32,
	/// Palette data offset, `0` when there is no palette.
	pub palette_offset: u32,
}

/// Everything a pixel decoder needs for one texture.
#[derive(Debug, Clone, Copy)]
pub struct TextureSource<'a> {
	/// Pixel layout.
	pub format: ImageFormat,
	/// Base-level encoded blocks.
	pub raw: &'a [u8],
	/// Palette layout and entries for index formats.
	pub palette: Option<(PaletteFormat, &'a [u8])>,
	/// Width in pixels.
	pub width: u32,
	/// Height in pixels.
	pub height: u32,
}

/// External GX block decoder producing pixels from encoded texture data.
pub trait TextureBlockDecoder {
	/// Decoder output, typically an RGBA buffer.
	type Output;
	/// Decoder failure.
	type Error;

	/// Decode one texture.
	fn decode(&self, format: ImageFormat, raw: &[u8], palette: Option<(PaletteFormat, &[u8])>, width: u32, height: u32) -> std::result::Result<Self::Output, Self::Error>;
}

/// Slice `descriptor` out of `source` and hand it to `decoder`.
pub fn decode_texture<D>(decoder: &D, source: &[u8], descriptor: &TextureDescriptor) -> std::result::Result<D::Output, D::Error>
where
	D: TextureBlockDecoder,
	D::Error: From<crate::hsd::HsdError>,
{
	let item = descriptor.source(source)?;
	decoder.decode(item.format, item.raw, item.palette, item.width, item.height)
}
