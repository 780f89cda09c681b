use crate::scene::SceneData;

/// Builds a relocatable archive image around a data segment.
#[derive(Debug, Clone, Default)]
pub struct ArchiveBuilder {
	data: Vec<u8>,
	relocations: Vec<u32>,
	public: Vec<(String, u32)>,
	externs: Vec<(String, u32)>,
	version: u32,
}

impl ArchiveBuilder {
	/// Start from a data segment.
	pub fn new(data: Vec<u8>) -> Self {
		Self {
			data,
			..Self::default()
		}
	}

	/// Append a relocation entry.
	pub fn relocation(mut self, offset: u32) -> Self {
		self.relocations.push(offset);
		self
	}

	/// Append a public symbol.
	pub fn public(mut self, name: &str, offset: u32) -> Self {
		self.public.push((name.to_owned(), offset));
		self
	}

	/// Append an extern symbol.
	pub fn extern_symbol(mut self, name: &str, offset: u32) -> Self {
		self.externs.push((name.to_owned(), offset));
		self
	}

	/// Set the header version word.
	pub fn version(mut self, version: u32) -> Self {
		self.version = version;
		self
	}

	/// Serialize header, data, tables and string table.
	pub fn build(&self) -> Vec<u8> {
		let mut strings = Vec::new();
		let mut symbol_table = Vec::new();
		for (name, offset) in self.public.iter().chain(self.externs.iter()) {
			symbol_table.extend_from_slice(&offset.to_be_bytes());
			symbol_table.extend_from_slice(&(strings.len() as u32).to_be_bytes());
			strings.extend_from_slice(name.as_bytes());
			strings.push(0);
		}

		let file_size = 0x20 + self.data.len() + self.relocations.len() * 4 + symbol_table.len() + strings.len();

		let mut out = Vec::with_capacity(file_size);
		for word in [
			file_size as u32,
			self.data.len() as u32,
			self.relocations.len() as u32,
			self.public.len() as u32,
			self.externs.len() as u32,
			self.version,
			0,
			0,
		] {
			out.extend_from_slice(&word.to_be_bytes());
		}
		out.extend_from_slice(&self.data);
		for offset in &self.relocations {
			out.extend_from_slice(&offset.to_be_bytes());
		}
		out.extend_from_slice(&symbol_table);
		out.extend_from_slice(&strings);
		out
	}
}

/// Overwrite header word `index` (0 = file size, 1 = data size, ...).
pub fn patch_header_word(bytes: &mut [u8], index: usize, value: u32) {
	bytes[index * 4..index * 4 + 4].copy_from_slice(&value.to_be_bytes());
}

/// Archive whose only public symbol is `scene_data` at `root`.
pub fn scene_archive(data: SceneData, root: u32) -> Vec<u8> {
	ArchiveBuilder::new(data.into_bytes()).public("scene_data", root).build()
}
