use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::ValueEnum;
use hsdtex::hsd::{ExtractOptions, ExtractStats, HsdArchive, MAX_TEXTURE_DIMENSION, Result, SCENE_SYMBOL, SceneFile, TextureDescriptor, extract_textures_with, parse_gtx, pkx_scene_slice};

use crate::cmd::util::{emit_json, offset_hex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceKind {
	/// Scene archive, optionally LZSS wrapped.
	Scene,
	/// PKX model wrapping a scene archive.
	Pkx,
	/// Standalone GTX texture.
	Gtx,
}

impl SourceKind {
	fn as_str(self) -> &'static str {
		match self {
			Self::Scene => "scene",
			Self::Pkx => "pkx",
			Self::Gtx => "gtx",
		}
	}
}

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long, value_enum, default_value_t = SourceKind::Scene)]
	pub kind: SourceKind,
	#[arg(long, default_value = SCENE_SYMBOL)]
	pub root_symbol: String,
	#[arg(long, default_value_t = MAX_TEXTURE_DIMENSION)]
	pub max_dimension: u32,
	#[arg(long)]
	pub json: bool,
}

/// List unique textures with their layout and provenance.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		kind,
		root_symbol,
		max_dimension,
		json,
	} = args;

	let options = ExtractOptions {
		root_symbol: Arc::from(root_symbol),
		max_dimension,
	};

	let (textures, stats) = match kind {
		SourceKind::Scene => {
			let result = SceneFile::open(&path)?.textures(&options)?;
			(result.textures, Some(result.stats))
		}
		SourceKind::Pkx => {
			let bytes = fs::read(&path)?;
			let archive = HsdArchive::read(pkx_scene_slice(&bytes)?)?;
			let result = extract_textures_with(&archive, &options)?;
			(result.textures, Some(result.stats))
		}
		SourceKind::Gtx => (vec![parse_gtx(&fs::read(&path)?)?], None),
	};

	if json {
		let payload = TexturesJson {
			path: path.display().to_string(),
			kind: kind.as_str(),
			count: textures.len(),
			textures: textures.iter().enumerate().map(|(index, texture)| texture_json(index, texture)).collect(),
			stats: stats.map(stats_json),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("kind: {}", kind.as_str());
	println!("count: {}", textures.len());
	for (index, texture) in textures.iter().enumerate() {
		let palette = match &texture.palette {
			Some(palette) => format!(" palette={}x{}@{}", palette.format.as_str(), palette.entry_count, offset_hex(palette.data_offset)),
			None => String::new(),
		};
		println!(
			"  [{index}] {}x{} {} data={} wrap={}/{}{}",
			texture.width,
			texture.height,
			texture.format.as_str(),
			offset_hex(texture.data_offset),
			texture.wrap_s.as_str(),
			texture.wrap_t.as_str(),
			palette
		);
	}
	if let Some(stats) = stats {
		println!(
			"stats: models={} joints={} draw_objects={} materials={} texture_objects={} duplicates={}",
			stats.models, stats.joints, stats.draw_objects, stats.materials, stats.texture_objects, stats.duplicates
		);
	}

	Ok(())
}

fn texture_json(index: usize, texture: &TextureDescriptor) -> TextureJson {
	TextureJson {
		index,
		width: texture.width,
		height: texture.height,
		format: texture.format.as_str(),
		data_offset: offset_hex(texture.data_offset),
		encoded_size: texture.encoded_size(),
		palette: texture.palette.as_ref().map(|palette| PaletteJson {
			format: palette.format.as_str(),
			entries: palette.entry_count,
			data_offset: offset_hex(palette.data_offset),
		}),
		wrap_s: texture.wrap_s.as_str(),
		wrap_t: texture.wrap_t.as_str(),
		repeat_s: texture.repeat_s,
		repeat_t: texture.repeat_t,
		texture_id: texture.texture_id,
		source_offset: offset_hex(texture.source_offset),
	}
}

fn stats_json(stats: ExtractStats) -> StatsJson {
	StatsJson {
		models: stats.models,
		joints: stats.joints,
		draw_objects: stats.draw_objects,
		materials: stats.materials,
		texture_objects: stats.texture_objects,
		duplicates: stats.duplicates,
	}
}

#[derive(serde::Serialize)]
struct TexturesJson {
	path: String,
	kind: &'static str,
	count: usize,
	textures: Vec<TextureJson>,
	stats: Option<StatsJson>,
}

#[derive(serde::Serialize)]
struct TextureJson {
	index: usize,
	width: u32,
	height: u32,
	format: &'static str,
	data_offset: String,
	encoded_size: usize,
	palette: Option<PaletteJson>,
	wrap_s: &'static str,
	wrap_t: &'static str,
	repeat_s: u8,
	repeat_t: u8,
	texture_id: i32,
	source_offset: String,
}

#[derive(serde::Serialize)]
struct PaletteJson {
	format: &'static str,
	entries: u32,
	data_offset: String,
}

#[derive(serde::Serialize)]
struct StatsJson {
	models: usize,
	joints: usize,
	draw_objects: usize,
	materials: usize,
	texture_objects: usize,
	duplicates: usize,
}
