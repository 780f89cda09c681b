#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "hsdtex", about = "HSD scene texture recovery tools")]
struct Cli {
	/// Log debug events to stderr when RUST_LOG is unset.
	#[arg(short, long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Archive header, layout and symbols.
	Info(cmd::info::Args),
	/// Unique textures referenced by a scene, PKX or GTX file.
	Textures(cmd::textures::Args),
	/// Decompress an LZSS stream.
	Decompress(cmd::decompress::Args),
	/// List or unpack an FSYS package.
	Fsys(cmd::fsys::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_tracing(verbose: bool) {
	let default = if verbose { "debug" } else { "warn" };
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
		.with_writer(std::io::stderr)
		.init();
}

fn run(command: Commands) -> hsdtex::hsd::Result<()> {
	match command {
		Commands::Info(args) => cmd::info::run(args),
		Commands::Textures(args) => cmd::textures::run(args),
		Commands::Decompress(args) => cmd::decompress::run(args),
		Commands::Fsys(args) => cmd::fsys::run(args),
	}
}
