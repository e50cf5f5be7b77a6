//! Build command implementation.

use clap::Parser;

/// Build command arguments.
#[derive(Parser)]
pub struct BuildCommand {
    /// Path to the corpus file, one entry per line
    #[arg(short, long)]
    pub input: String,

    /// Output directory for the table
    #[arg(short, long)]
    pub output: String,

    /// Longest substring treated as a token
    #[arg(short, long, default_value_t = 1)]
    pub max_length: usize,

    /// Use whole corpus entries as tokens (overrides --max-length)
    #[arg(short, long, default_value_t = false)]
    pub whole_words: bool,

    /// Version number stored with the table
    #[arg(long, default_value_t = 0)]
    pub table_version: u32,
}

use anyhow::Result as AnyhowResult;
use hufftable_codec::{TableBuilder, TableConfig, TableSaver, MAX_LENGTH_WHOLE_WORDS};
use std::fs;
use std::path::Path;
use tracing::info;

pub fn run(cmd: BuildCommand) -> AnyhowResult<()> {
    let data = fs::read_to_string(&cmd.input)?;
    let corpus: Vec<&str> = data.lines().filter(|line| !line.is_empty()).collect();

    let max_token_length = if cmd.whole_words {
        MAX_LENGTH_WHOLE_WORDS
    } else {
        cmd.max_length
    };

    info!(
        input = %cmd.input,
        entries = corpus.len(),
        max_token_length,
        "building code table"
    );

    let table = TableBuilder::new(TableConfig {
        max_token_length,
        version: cmd.table_version,
        parallel: true,
    })
    .build(&corpus)?;

    TableSaver::new(&table).save(Path::new(&cmd.output))?;

    println!("Built {} codes into {}", table.len(), cmd.output);
    println!(
        "  Code length: {}..={} bits",
        table.min_code_length(),
        table.max_code_length()
    );

    Ok(())
}
