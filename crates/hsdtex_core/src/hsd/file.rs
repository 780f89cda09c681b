use std::fs;
use std::path::Path;

use crate::hsd::compression::decode_bytes;
use crate::hsd::{Compression, ExtractOptions, ExtractResult, HsdArchive, Result, extract_textures_with};

/// Opened scene archive with compression already removed.
#[derive(Debug, Clone)]
pub struct SceneFile {
	/// Compression detected on the source bytes.
	pub compression: Compression,
	/// Linked archive.
	pub archive: HsdArchive,
}

impl SceneFile {
	/// Read, decompress, and link a scene archive from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		Self::from_bytes(raw)
	}

	/// Decompress and link an in-memory scene archive.
	pub fn from_bytes(raw: Vec<u8>) -> Result<Self> {
		let (compression, bytes) = decode_bytes(raw)?;
		let archive = HsdArchive::read(&bytes)?;
		Ok(Self { compression, archive })
	}

	/// Extract unique textures with `options`.
	pub fn textures(&self, options: &ExtractOptions) -> Result<ExtractResult> {
		extract_textures_with(&self.archive, options)
	}
}
