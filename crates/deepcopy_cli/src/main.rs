#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "deepcopy", about = "Deep copy and inspect dynamically typed documents")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Deep copy a JSON document, verify the copy, and print it.
	Copy(cmd::copy::Args),
	/// List the shape category of every node in a JSON document.
	Shape(cmd::shape::Args),
	/// List the built-in type table.
	Types(cmd::types::Args),
}

fn main() {
	init_tracing();

	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> deepcopy::reflect::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Copy(args) => cmd::copy::run(args),
		Commands::Shape(args) => cmd::shape::run(args),
		Commands::Types(args) => cmd::types::run(args),
	}
}

fn init_tracing() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}
