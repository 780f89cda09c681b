use std::path::PathBuf;

use hsdtex::hsd::{Result, SceneFile, SymbolTable};

use crate::cmd::util::{emit_json, offset_hex};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print archive header fields, region layout and symbol tables.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let scene = SceneFile::open(&path)?;
	let header = &scene.archive.header;
	let layout = header.layout();

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			compression: scene.compression.as_str(),
			file_size: header.file_size,
			data_size: header.data_size,
			version: header.version,
			relocation_count: header.relocation_count,
			layout: LayoutJson {
				data: layout.data_offset,
				relocations: layout.relocation_offset,
				public_symbols: layout.public_offset,
				extern_symbols: layout.extern_offset,
				strings: layout.symbols_offset,
			},
			public_symbols: symbols_json(&scene.archive.public_symbols),
			extern_symbols: symbols_json(&scene.archive.extern_symbols),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("compression: {}", scene.compression.as_str());
	println!("file_size: {}", header.file_size);
	println!("data_size: {}", header.data_size);
	println!("version: {}", header.version);
	println!("relocation_count: {}", header.relocation_count);
	println!("public_symbols: {}", scene.archive.public_symbols.len());
	for symbol in scene.archive.public_symbols.iter() {
		println!("  {} {}", offset_hex(symbol.offset), symbol.name);
	}
	println!("extern_symbols: {}", scene.archive.extern_symbols.len());
	for symbol in scene.archive.extern_symbols.iter() {
		println!("  {} {}", offset_hex(symbol.offset), symbol.name);
	}

	Ok(())
}

fn symbols_json(table: &SymbolTable) -> Vec<SymbolJson> {
	table
		.iter()
		.map(|symbol| SymbolJson {
			name: symbol.name.to_string(),
			offset: offset_hex(symbol.offset),
		})
		.collect()
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	compression: &'static str,
	file_size: u32,
	data_size: u32,
	version: u32,
	relocation_count: u32,
	layout: LayoutJson,
	public_symbols: Vec<SymbolJson>,
	extern_symbols: Vec<SymbolJson>,
}

#[derive(serde::Serialize)]
struct LayoutJson {
	data: u64,
	relocations: u64,
	public_symbols: u64,
	extern_symbols: u64,
	strings: u64,
}

#[derive(serde::Serialize)]
struct SymbolJson {
	name: String,
	offset: String,
}
