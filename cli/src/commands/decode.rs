//! Decode command implementation.

use clap::Parser;

/// Decode command arguments.
#[derive(Parser)]
pub struct DecodeCommand {
    /// Directory containing the code table
    #[arg(short, long)]
    pub table: String,

    /// Encoded text ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Input is in the compact alphabet
    #[arg(short, long, default_value_t = false)]
    pub compact: bool,
}

use super::read_input;
use anyhow::Result as AnyhowResult;
use hufftable_codec::Codec;
use std::path::Path;

pub fn run(cmd: DecodeCommand) -> AnyhowResult<()> {
    let codec = Codec::load(Path::new(&cmd.table))?;
    let encoded = read_input(cmd.input)?;

    let text = codec.decode(&encoded, cmd.compact)?;

    println!("{}", text);

    Ok(())
}
