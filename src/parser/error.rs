use owo_colors::OwoColorize;
use std::io;
use thiserror::Error;

/// Represents any kind of error the parser may find
#[derive(Debug, Error)]
pub enum ParserError {
    /// Not the parser's fault, some std::io went wrong
    #[error("Couldn't read '{}': {source}", .file.bright_yellow())]
    IO { file: String, source: io::Error },
}
