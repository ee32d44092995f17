//! Reads `.ls8` program text into the byte image consumed by the machine.
//!
//! Program files carry one instruction byte per line, written in binary.
//! Everything from a `#` to the end of the line is a comment, and lines whose
//! remainder does not parse as a base-2 byte are skipped silently.

use std::fs;
use std::io;
use std::path::Path;

/// An error that might occur while reading a program file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The program file could not be read at all.
    #[error("couldn't read {path}: {source}")]
    Io {
        /// The path that was handed to the loader.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Reads the program file at `path` into a byte image.
pub fn load_program(path: &Path) -> Result<Vec<u8>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Ok(parse_program(&text))
}

/// Parses program text into the byte image it describes.
///
/// Malformed lines are recovered locally by skipping them; they never stop the
/// load.
pub fn parse_program(text: &str) -> Vec<u8> {
    text.lines()
        .filter_map(|line| {
            let code = line.find('#').map_or(line, |at| &line[..at]);
            u8::from_str_radix(code.trim(), 2).ok()
        })
        .collect()
}
