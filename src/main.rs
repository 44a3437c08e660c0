#![allow(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "sumwire", about = "Sum-type schema and tagged-union codec tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Schema {
		path: PathBuf,
		#[arg(long = "variant")]
		variant_name: Option<String>,
		#[arg(long)]
		json: bool,
	},
	Encode {
		path: PathBuf,
		#[arg(long)]
		variant: String,
		#[arg(long)]
		fields: Option<String>,
		#[arg(long)]
		json: bool,
	},
	Decode {
		path: PathBuf,
		#[arg(long)]
		hex: String,
		#[arg(long)]
		json: bool,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> sumwire::sum::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Schema { path, variant_name, json } => cmd::schema::run(path, variant_name, json),
		Commands::Encode { path, variant, fields, json } => cmd::encode::run(path, variant, fields, json),
		Commands::Decode { path, hex, json } => cmd::decode::run(path, hex, json),
	}
}
