//! CLI commands for hufftable.

pub mod build;
pub mod decode;
pub mod encode;

pub use build::BuildCommand;
pub use decode::DecodeCommand;
pub use encode::EncodeCommand;

/// Read the input argument, or stdin when it is "-".
pub(crate) fn read_input(input: String) -> std::io::Result<String> {
    if input != "-" {
        return Ok(input);
    }

    use std::io::Read;
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;
    // Trailing newline from `echo` or a terminal is not part of the text
    Ok(buffer.trim_end_matches(['\r', '\n']).to_string())
}
