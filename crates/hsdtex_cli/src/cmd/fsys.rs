use std::fs;
use std::path::PathBuf;

use hsdtex::hsd::{FsysArchive, FsysEntry, FsysFileKind, Result};
use tracing::debug;

use crate::cmd::util::{emit_json, offset_hex};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Write every entry, decompressed, into this directory.
	#[arg(long)]
	pub extract: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// List FSYS entries and optionally unpack them.
pub fn run(args: Args) -> Result<()> {
	let Args { path, extract, json } = args;

	let bytes = fs::read(&path)?;
	let package = FsysArchive::parse(&bytes)?;

	let mut written = Vec::new();
	if let Some(dir) = &extract {
		fs::create_dir_all(dir)?;
		for entry in &package.entries {
			let contents = package.read_entry(&bytes, entry)?;
			let target = dir.join(file_name(entry));
			fs::write(&target, &contents)?;
			debug!(name = %entry.name, len = contents.len(), "entry written");
			written.push(target.display().to_string());
		}
	}

	if json {
		let payload = FsysJson {
			path: path.display().to_string(),
			id: offset_hex(package.id),
			count: package.entries.len(),
			entries: package.entries.iter().map(entry_json).collect(),
			written,
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("id: {}", offset_hex(package.id));
	println!("count: {}", package.entries.len());
	for entry in &package.entries {
		println!(
			"  {} {} offset={} size={} stored={}{}",
			entry.name,
			kind_label(entry.kind),
			offset_hex(entry.offset),
			entry.size,
			entry.stored_size,
			if entry.compressed { " lzss" } else { "" }
		);
	}
	for target in &written {
		println!("wrote: {target}");
	}

	Ok(())
}

fn file_name(entry: &FsysEntry) -> String {
	entry.name.replace(['/', '\\'], "_")
}

fn kind_label(kind: FsysFileKind) -> String {
	match kind {
		FsysFileKind::Other(code) => format!("other(0x{code:02x})"),
		known => known.as_str().to_owned(),
	}
}

fn entry_json(entry: &FsysEntry) -> EntryJson {
	EntryJson {
		index: entry.index,
		name: entry.name.to_string(),
		kind: kind_label(entry.kind),
		offset: offset_hex(entry.offset),
		size: entry.size,
		stored_size: entry.stored_size,
		compressed: entry.compressed,
	}
}

#[derive(serde::Serialize)]
struct FsysJson {
	path: String,
	id: String,
	count: usize,
	entries: Vec<EntryJson>,
	written: Vec<String>,
}

#[derive(serde::Serialize)]
struct EntryJson {
	index: u32,
	name: String,
	kind: String,
	offset: String,
	size: u32,
	stored_size: u32,
	compressed: bool,
}
