//! Hufftable CLI - command-line interface for hufftable.
//!
//! This is the main entry point for the `hufftable` command-line tool.

mod commands;

use clap::{Parser, Subcommand};
use commands::{BuildCommand, DecodeCommand, EncodeCommand};

#[derive(Parser)]
#[command(name = "hufftable")]
#[command(about = "Corpus-trained prefix codes for compact text", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a code table from a corpus file
    Build(BuildCommand),
    /// Encode text with a code table
    Encode(EncodeCommand),
    /// Decode text produced by `encode`
    Decode(DecodeCommand),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("hufftable=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build(cmd) => commands::build::run(cmd)?,
        Commands::Encode(cmd) => commands::encode::run(cmd)?,
        Commands::Decode(cmd) => commands::decode::run(cmd)?,
    }

    Ok(())
}
