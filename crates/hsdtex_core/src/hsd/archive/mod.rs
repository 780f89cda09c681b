use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::hsd::bytes::Cursor;
use crate::hsd::{HsdError, Result, SizeKind};

/// Fixed archive header fields. All values are big-endian on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveHeader {
	/// Declared total archive length.
	pub file_size: u32,
	/// Data segment length.
	pub data_size: u32,
	/// Number of relocation table entries.
	pub relocation_count: u32,
	/// Number of public symbol entries.
	pub public_count: u32,
	/// Number of extern symbol entries.
	pub extern_count: u32,
	/// Archive version word.
	pub version: u32,
	/// Two reserved words following the version.
	pub reserved: [u32; 2],
}

impl ArchiveHeader {
	/// Header size; the data segment starts right after it.
	pub const SIZE: usize = 0x20;

	/// Parse the header from the beginning of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		let mut cursor = Cursor::new(bytes);
		Ok(Self {
			file_size: cursor.read_u32_be()?,
			data_size: cursor.read_u32_be()?,
			relocation_count: cursor.read_u32_be()?,
			public_count: cursor.read_u32_be()?,
			extern_count: cursor.read_u32_be()?,
			version: cursor.read_u32_be()?,
			reserved: [cursor.read_u32_be()?, cursor.read_u32_be()?],
		})
	}

	/// Compute region boundaries implied by the header counts.
	pub fn layout(&self) -> ArchiveLayout {
		let data_offset = Self::SIZE as u64;
		let relocation_offset = data_offset + u64::from(self.data_size);
		let public_offset = relocation_offset + u64::from(self.relocation_count) * 4;
		let extern_offset = public_offset + u64::from(self.public_count) * 8;
		let symbols_offset = extern_offset + u64::from(self.extern_count) * 8;
		ArchiveLayout {
			data_offset,
			relocation_offset,
			public_offset,
			extern_offset,
			symbols_offset,
		}
	}
}

/// File offsets of each archive region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveLayout {
	/// Start of the data segment.
	pub data_offset: u64,
	/// Start of the relocation table.
	pub relocation_offset: u64,
	/// Start of the public symbol table.
	pub public_offset: u64,
	/// Start of the extern symbol table.
	pub extern_offset: u64,
	/// Start of the symbol name string table.
	pub symbols_offset: u64,
}

impl ArchiveLayout {
	/// Region labels paired with the boundary that ends them.
	fn boundaries(&self) -> [(&'static str, u64); 4] {
		[
			("data", self.relocation_offset),
			("relocations", self.public_offset),
			("public symbols", self.extern_offset),
			("extern symbols", self.symbols_offset),
		]
	}
}

/// One resolved symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
	/// Symbol name from the string table.
	pub name: Arc<str>,
	/// Offset into the data segment.
	pub offset: u32,
}

/// Name to data-offset mapping in table order.
///
/// Names are unique; when a table repeats a name the first entry wins and
/// later ones are dropped.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
	entries: Vec<Symbol>,
	by_name: HashMap<Arc<str>, usize>,
}

impl SymbolTable {
	/// Insert a symbol, returning `false` if the name was already present.
	pub fn insert(&mut self, name: &str, offset: u32) -> bool {
		if self.by_name.contains_key(name) {
			return false;
		}

		let name = Arc::<str>::from(name);
		self.by_name.insert(name.clone(), self.entries.len());
		self.entries.push(Symbol { name, offset });
		true
	}

	/// Look up a symbol offset by name.
	pub fn get(&self, name: &str) -> Option<u32> {
		self.by_name.get(name).map(|idx| self.entries[*idx].offset)
	}

	/// Iterate symbols in first-seen order.
	pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
		self.entries.iter()
	}

	/// Number of unique names.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the table holds no symbols.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Linked relocatable archive: data segment plus resolved symbol tables.
///
/// Offsets inside the data segment are already segment-relative, so the
/// relocation table is recorded but never applied.
#[derive(Debug, Clone)]
pub struct HsdArchive {
	/// Parsed header.
	pub header: ArchiveHeader,
	/// Relocation table entries in file order.
	pub relocations: Vec<u32>,
	/// Public symbols (`scene_data` and friends).
	pub public_symbols: SymbolTable,
	/// Symbols resolved by other archives.
	pub extern_symbols: SymbolTable,
	data: Vec<u8>,
}

impl HsdArchive {
	/// Link an archive from its complete byte image.
	pub fn read(bytes: &[u8]) -> Result<Self> {
		let header = ArchiveHeader::parse(bytes)?;
		if u64::from(header.file_size) != bytes.len() as u64 {
			return Err(HsdError::SizeMismatch {
				kind: SizeKind::File,
				declared: u64::from(header.file_size),
				actual: bytes.len() as u64,
			});
		}

		let layout = header.layout();
		for (region, end) in layout.boundaries() {
			if end > bytes.len() as u64 {
				return Err(HsdError::LayoutMismatch {
					region,
					expected: end,
					actual: bytes.len() as u64,
				});
			}
		}
		debug!(?header, ?layout, "archive layout");

		// The bounds loop above rejects bad layouts; the per-region checks below are a read-order self-check.
		let mut cursor = Cursor::at(bytes, ArchiveHeader::SIZE)?;
		let data = cursor.read_exact(header.data_size as usize)?.to_vec();
		expect_boundary(&cursor, "data", layout.relocation_offset)?;

		let mut relocations = Vec::with_capacity(header.relocation_count as usize);
		for _ in 0..header.relocation_count {
			relocations.push(cursor.read_u32_be()?);
		}
		expect_boundary(&cursor, "relocations", layout.public_offset)?;

		let public_symbols = read_symbols(&mut cursor, bytes, header.public_count, layout.symbols_offset)?;
		expect_boundary(&cursor, "public symbols", layout.extern_offset)?;

		let extern_symbols = read_symbols(&mut cursor, bytes, header.extern_count, layout.symbols_offset)?;
		expect_boundary(&cursor, "extern symbols", layout.symbols_offset)?;

		debug!(
			relocations = relocations.len(),
			public = public_symbols.len(),
			extern_symbols = extern_symbols.len(),
			"archive linked"
		);

		Ok(Self {
			header,
			relocations,
			public_symbols,
			extern_symbols,
			data,
		})
	}

	/// Borrow the data segment. Node offsets are relative to its start.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Look up a public symbol, failing when it is absent.
	pub fn require_public(&self, name: &str) -> Result<u32> {
		self.public_symbols.get(name).ok_or_else(|| HsdError::MissingSymbol { name: name.to_owned() })
	}
}

fn expect_boundary(cursor: &Cursor<'_>, region: &'static str, expected: u64) -> Result<()> {
	let actual = cursor.pos() as u64;
	if actual != expected {
		return Err(HsdError::LayoutMismatch { region, expected, actual });
	}
	Ok(())
}

fn read_symbols(cursor: &mut Cursor<'_>, bytes: &[u8], count: u32, names_base: u64) -> Result<SymbolTable> {
	let mut table = SymbolTable::default();
	for _ in 0..count {
		let offset = cursor.read_u32_be()?;
		let name_offset = cursor.read_u32_be()?;

		let name_pos = usize::try_from(names_base + u64::from(name_offset)).unwrap_or(usize::MAX);
		let raw = Cursor::at(bytes, name_pos)?.read_cstring_bytes()?;
		let name = String::from_utf8_lossy(raw);

		if table.insert(&name, offset) {
			debug!(name = %name, offset, "symbol resolved");
		} else {
			warn!(name = %name, offset, "duplicate symbol ignored");
		}
	}
	Ok(table)
}
