//! parser for Modelfile documents

use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::language::{Command, LoadingError, ReadingError};

pub mod parser;

pub use parser::ParsingError;

/// Read a file and return an owned String. Reading is separate from parsing
/// so the caller can keep the source text around for error reporting.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Parse text into a list of Commands, or return the first error
/// encountered.
pub fn parse(content: &str) -> Result<Vec<Command>, ParsingError> {
    let result = parser::parse_commands(content);

    match result {
        Ok(commands) => {
            debug!(
                "Found {} command{}",
                commands.len(),
                if commands.len() == 1 { "" } else { "s" }
            );
            Ok(commands)
        }
        Err(error) => {
            debug!(%error);
            Err(error)
        }
    }
}

/// Drain a reader and parse what it produced. A failure of the underlying
/// stream (including text that isn't valid UTF-8) aborts before any
/// scanning happens.
pub fn parse_reader(mut reader: impl Read) -> Result<Vec<Command>, ReadingError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;

    let commands = parse(&content)?;
    Ok(commands)
}
