//! Encode command implementation.

use clap::Parser;

/// Encode command arguments.
#[derive(Parser)]
pub struct EncodeCommand {
    /// Directory containing the code table
    #[arg(short, long)]
    pub table: String,

    /// Text to encode ("-" reads stdin)
    #[arg(short, long)]
    pub input: String,

    /// Fold the bit-string into the compact alphabet
    #[arg(short, long, default_value_t = false)]
    pub compact: bool,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<String>,
}

use super::read_input;
use anyhow::Result as AnyhowResult;
use hufftable_codec::Codec;
use std::path::Path;

pub fn run(cmd: EncodeCommand) -> AnyhowResult<()> {
    let codec = Codec::load(Path::new(&cmd.table))?;
    let input_text = read_input(cmd.input)?;

    let encoded = codec.encode(&input_text, cmd.compact)?;

    match &cmd.output {
        Some(path) => {
            std::fs::write(path, &encoded)?;
            println!(
                "Encoded {} characters into {} symbols at {}",
                input_text.chars().count(),
                encoded.len(),
                path
            );
        }
        None => {
            println!("{}", encoded);
        }
    }

    Ok(())
}
