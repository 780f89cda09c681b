use crate::hsd::bytes::{Cursor, slice_at};
use crate::hsd::{HsdError, Result};

const SCENE_MARKER: u16 = 0x0C;
const ENTRY_TABLE_START: u64 = 0x84;
const ENTRY_SIZE: u64 = 208;

/// Locate the scene archive embedded in a PKX model file.
pub fn pkx_scene_slice(bytes: &[u8]) -> Result<&[u8]> {
	let mut cursor = Cursor::new(bytes);
	let archive_size = cursor.read_u32_be()?;
	let _header_04 = cursor.read_u32_be()?;
	let header_08 = cursor.read_u32_be()?;
	let _header_0c = cursor.read_u32_be()?;
	let entry_count = cursor.read_u32_be()?;
	let _header_14 = cursor.read_u32_be()?;
	let _header_18 = cursor.read_u16_be()?;
	let marker = cursor.read_u16_be()?;

	if marker != SCENE_MARKER {
		return Err(HsdError::UnsupportedPkxHeader { marker });
	}

	let start = align32(ENTRY_TABLE_START + u64::from(entry_count) * ENTRY_SIZE);
	let start = align32(start + u64::from(header_08));
	let start = u32::try_from(start).map_err(|_| HsdError::UnexpectedEof {
		at: bytes.len(),
		need: archive_size as usize,
		rem: 0,
	})?;
	slice_at(bytes, start, archive_size as usize)
}

fn align32(value: u64) -> u64 {
	(value + 31) & !31
}
