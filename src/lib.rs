//!
//! mipsim interprets a small subset of MIPS: `j`, `beq`, `add`, `addi`, `sub`, `sw`, `lw`,
//! `sll`, `srl`, `mult`, `and`, `or` and `nop`.
//!
//! Programs are not assembled into machine code. The source is split into a flat stream of
//! tokens and the simulator walks that stream directly: each instruction is a frame of four
//! tokens (opcode and three operands), except `nop`, which is a single token. Jump targets and
//! branch offsets are therefore counted in tokens, not bytes or words.
//!
//! Memory is a flat array of 2000 words addressed by word index. Accessing anything outside
//! of it stops the simulation with an error.
//!

pub mod config;
pub mod error;
pub mod instruction;
pub mod parser;
pub mod report;
pub mod simulator;
pub(crate) mod utf8_lossy_lines;

pub use error::Error;
pub use simulator::Simulator;
