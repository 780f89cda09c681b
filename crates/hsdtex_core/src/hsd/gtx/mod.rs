use crate::hsd::bytes::{Cursor, read_u32_be_at, slice_at};
use crate::hsd::{HsdError, ImageFormat, Palette, PaletteFormat, Result, TextureDescriptor, WrapMode};

const IMAGE_OFFSET: u32 = 0x28;
const PALETTE_OFFSET: u32 = 0x48;
const GTX_C14X2_PALETTE_ENTRIES: u32 = 0x400;

/// Parse a standalone GTX texture header into a descriptor over `bytes`.
///
/// Paletted GTX textures carry a fixed-size palette per format.
pub fn parse_gtx(bytes: &[u8]) -> Result<TextureDescriptor> {
	let mut cursor = Cursor::new(bytes);
	let width = u32::from(cursor.read_u16_be()?);
	let height = u32::from(cursor.read_u16_be()?);
	cursor.skip(4)?;
	let format = gtx_image_format(cursor.read_u32_be()?)?;
	let raw_palette_format = cursor.read_u32_be()?;
	let wrap_s = WrapMode::from_code(cursor.read_u32_be()?)?;
	let wrap_t = WrapMode::from_code(cursor.read_u32_be()?)?;

	let data_offset = read_u32_be_at(bytes, IMAGE_OFFSET)?;
	let palette_offset = read_u32_be_at(bytes, PALETTE_OFFSET)?;

	let palette = if format.is_paletted() {
		if palette_offset == 0 {
			return Err(HsdError::MissingPalette { offset: 0, format });
		}
		let entry_count = gtx_palette_entries(format);
		Some(Palette {
			format: gtx_palette_format(raw_palette_format)?,
			entry_count,
			data_offset: palette_offset,
			data: slice_at(bytes, palette_offset, entry_count as usize * PaletteFormat::ENTRY_SIZE)?.to_vec(),
		})
	} else {
		None
	};

	Ok(TextureDescriptor {
		width,
		height,
		format,
		data_offset,
		palette,
		wrap_s,
		wrap_t,
		repeat_s: 0,
		repeat_t: 0,
		texture_id: 0,
		source_offset: 0,
	})
}

/// GTX stores a full palette for C4 and C8 but only 1024 entries for C14X2.
fn gtx_palette_entries(format: ImageFormat) -> u32 {
	match format {
		ImageFormat::C14X2 => GTX_C14X2_PALETTE_ENTRIES,
		other => other.max_palette_entries(),
	}
}

/// GTX uses its own format numbering.
fn gtx_image_format(code: u32) -> Result<ImageFormat> {
	Ok(match code {
		0x00 => ImageFormat::C4,
		0x01 => ImageFormat::C8,
		0x30 => ImageFormat::C14X2,
		0x40 => ImageFormat::I4,
		0x41 => ImageFormat::IA4,
		0x42 | 0xA0..=0xA3 => ImageFormat::I8,
		0x43 => ImageFormat::IA8,
		0x44 => ImageFormat::RGB565,
		0x45 => ImageFormat::RGBA32,
		0x90 => ImageFormat::RGB5A3,
		0xB0 => ImageFormat::CMPR,
		_ => return Err(HsdError::UnknownImageFormat { code }),
	})
}

fn gtx_palette_format(code: u32) -> Result<PaletteFormat> {
	match code {
		0x01 => Ok(PaletteFormat::IA8),
		0x02 => Ok(PaletteFormat::RGB565),
		0x03 => Ok(PaletteFormat::RGB5A3),
		_ => Err(HsdError::UnknownPaletteFormat { code }),
	}
}

#[cfg(test)]
mod tests;
