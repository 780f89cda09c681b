use std::fs;
use std::path::PathBuf;

use clap::ValueEnum;
use hsdtex::hsd::{LzssVariant, Result, decompress_with};

use crate::cmd::util::emit_json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
	Auto,
	Headerless,
	Lzs,
	Gs,
}

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub out: PathBuf,
	#[arg(long, value_enum, default_value_t = VariantArg::Auto)]
	pub variant: VariantArg,
	#[arg(long)]
	pub json: bool,
}

/// Decompress an LZSS stream to `--out`.
pub fn run(args: Args) -> Result<()> {
	let Args { path, out, variant, json } = args;

	let input = fs::read(&path)?;
	let variant = match variant {
		VariantArg::Auto => LzssVariant::detect(&input),
		VariantArg::Headerless => LzssVariant::Headerless,
		VariantArg::Lzs => LzssVariant::LzS,
		VariantArg::Gs => LzssVariant::Gs,
	};
	let output = decompress_with(variant, &input)?;
	fs::write(&out, &output)?;

	if json {
		emit_json(&DecompressJson {
			path: path.display().to_string(),
			out: out.display().to_string(),
			variant: variant.as_str(),
			input_len: input.len(),
			output_len: output.len(),
		});
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("out: {}", out.display());
	println!("variant: {}", variant.as_str());
	println!("input_len: {}", input.len());
	println!("output_len: {}", output.len());
	Ok(())
}

#[derive(serde::Serialize)]
struct DecompressJson {
	path: String,
	out: String,
	variant: &'static str,
	input_len: usize,
	output_len: usize,
}
