use std::sync::Arc;

use tracing::debug;

use crate::hsd::bytes::{Cursor, first4, read_u32_be_at, slice_at};
use crate::hsd::{HsdError, LzssVariant, Result, decompress_with};

/// FSYS package magic.
pub const FSYS_MAGIC: &[u8] = b"FSYS";

const ID_OFFSET: usize = 0x08;
const ENTRY_TABLE_OFFSET: u32 = 0x40;
const COMPRESSED_FLAG: u32 = 0x8000_0000;
const NULL_NAME: &[u8] = b"(null)";

/// Content type recorded for a packaged file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsysFileKind {
	/// Scene archive (map floor or model).
	Scene,
	/// Standalone GTX texture.
	Texture,
	/// PKX model wrapper.
	Pkx,
	/// Anything else, keeping the raw type code.
	Other(u32),
}

impl FsysFileKind {
	/// Map a raw type code.
	pub fn from_code(code: u32) -> Self {
		match code {
			0x01 | 0x02 => Self::Scene,
			0x09 => Self::Texture,
			0x0F => Self::Pkx,
			other => Self::Other(other),
		}
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Scene => "scene",
			Self::Texture => "texture",
			Self::Pkx => "pkx",
			Self::Other(_) => "other",
		}
	}
}

/// One packaged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsysEntry {
	/// Position in the entry table.
	pub index: u32,
	/// File id word.
	pub id: u32,
	/// Offset of the stored bytes in the package.
	pub offset: u32,
	/// Size after decompression.
	pub size: u32,
	/// Stored size; equals `size` when uncompressed.
	pub stored_size: u32,
	/// Stored bytes are an `LZSS` stream.
	pub compressed: bool,
	/// Content type.
	pub kind: FsysFileKind,
	/// Index joined with the recorded name, e.g. `3_pikachu`.
	pub name: Arc<str>,
}

/// Parsed FSYS package directory.
#[derive(Debug, Clone)]
pub struct FsysArchive {
	/// Package id word.
	pub id: u32,
	/// Entries in table order.
	pub entries: Vec<FsysEntry>,
}

impl FsysArchive {
	/// Parse the package directory.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		if !bytes.starts_with(FSYS_MAGIC) {
			return Err(HsdError::InvalidMagic {
				expected: FSYS_MAGIC,
				got: first4(bytes),
			});
		}

		let mut cursor = Cursor::at(bytes, ID_OFFSET)?;
		let id = cursor.read_u32_be()?;
		let count = cursor.read_u32_be()?;

		let mut table = Cursor::at(bytes, read_u32_be_at(bytes, ENTRY_TABLE_OFFSET)? as usize)?;
		let mut entries = Vec::new();
		for index in 0..count {
			let entry_offset = table.read_u32_be()?;
			entries.push(read_entry(bytes, index, entry_offset)?);
		}

		debug!(id, entries = entries.len(), "fsys parsed");
		Ok(Self { id, entries })
	}

	/// Borrow an entry's stored bytes.
	pub fn stored_bytes<'a>(&self, bytes: &'a [u8], entry: &FsysEntry) -> Result<&'a [u8]> {
		slice_at(bytes, entry.offset, entry.stored_size as usize)
	}

	/// Return an entry's contents, decompressing when flagged.
	pub fn read_entry(&self, bytes: &[u8], entry: &FsysEntry) -> Result<Vec<u8>> {
		let stored = self.stored_bytes(bytes, entry)?;
		if entry.compressed {
			decompress_with(LzssVariant::Gs, stored)
		} else {
			Ok(stored.to_vec())
		}
	}
}

fn read_entry(bytes: &[u8], index: u32, at: u32) -> Result<FsysEntry> {
	let mut cursor = Cursor::at(bytes, at as usize)?;
	let id = cursor.read_u32_be()?;
	let offset = cursor.read_u32_be()?;
	let size = cursor.read_u32_be()?;
	let flags = cursor.read_u32_be()?;
	let _flags2 = cursor.read_u32_be()?;
	let stored_size = cursor.read_u32_be()?;
	let _unknown = cursor.read_u32_be()?;
	let file_name_offset = cursor.read_u32_be()?;
	let kind = FsysFileKind::from_code(cursor.read_u32_be()?);
	let name_offset = cursor.read_u32_be()?;

	let mut name = index.to_string();
	let recorded = match read_name(bytes, name_offset)? {
		Some(value) if value != NULL_NAME => Some(value),
		_ => read_name(bytes, file_name_offset)?,
	};
	if let Some(value) = recorded {
		name.push('_');
		name.push_str(&String::from_utf8_lossy(value));
	}

	Ok(FsysEntry {
		index,
		id,
		offset,
		size,
		stored_size,
		compressed: flags & COMPRESSED_FLAG != 0,
		kind,
		name: Arc::<str>::from(name),
	})
}

fn read_name(bytes: &[u8], offset: u32) -> Result<Option<&[u8]>> {
	if offset == 0 {
		return Ok(None);
	}
	Ok(Some(Cursor::at(bytes, offset as usize)?.read_cstring_bytes()?))
}
