use owo_colors::OwoColorize;
use std::io;
use thiserror::Error;

/// Errors that abort a simulation. `pos` is always the index of the offending token.
#[derive(Debug, Error)]
pub enum SimulatorError {
    #[error("'{}' is neither a register nor an integer literal", .token.bright_yellow())]
    MalformedOperand { token: String, pos: usize },

    #[error("Memory address {} is out of range, memory only has {size} words", .address.bright_yellow())]
    OutOfRangeAddress { address: i32, size: usize, pos: usize },

    #[error("Instruction '{}' is missing operands at the end of the program", .opcode.bright_yellow())]
    TruncatedInstruction { opcode: &'static str, pos: usize },

    #[error("Jump to token {} lands before the start of the program", .target.bright_yellow())]
    InvalidJumpTarget { target: i64, pos: usize },

    /// The reporter failed to write a snapshot
    #[error("I/O Error while reporting state: {0}")]
    Report(#[from] io::Error),
}

impl SimulatorError {
    /// Index of the token that caused the error, if it came from the program
    pub fn position(&self) -> Option<usize> {
        use SimulatorError::*;
        match *self {
            MalformedOperand { pos, .. }
            | OutOfRangeAddress { pos, .. }
            | TruncatedInstruction { pos, .. }
            | InvalidJumpTarget { pos, .. } => Some(pos),
            Report(_) => None,
        }
    }
}
