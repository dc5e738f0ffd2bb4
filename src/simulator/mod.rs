//!
//! Runs a tokenized program instruction by instruction.
//!
//! Every step decodes the frame at the program counter into its [control signals](crate::instruction::ControlSignals),
//! resolves the operands, runs the [ALU](alu::execute), then the memory and write-back stages,
//! and finally moves the program counter. Only one instruction is ever in flight.
//!

use crate::instruction::{ControlSignals, Instruction, FRAME_LEN};
use crate::parser::{self, token::Context, Parsed};
use crate::report::{Reporter, Snapshot};
use tracing::{debug, warn};

pub mod alu;
pub mod error;
mod executor;
pub mod memory;
pub mod register_names;
pub mod registers;

pub use error::SimulatorError;
pub use executor::resolve;
use alu::Branch;
use memory::Memory;
use registers::Registers;

/// Simulates the CPU. Generally initialized by calling [load_file](struct.Simulator.html#method.load_file)
/// and ran by calling [run](struct.Simulator.html#method.run).
///
/// A simulator runs its program once; use a fresh one for every run.
#[derive(Debug, Default)]
pub struct Simulator {
    pub registers: Registers,
    pub memory: Memory,
    pc: usize,
    /// Instructions executed so far, skipped tokens not included
    steps: usize,
    /// Report the state after every instruction, not only at the end
    trace: bool,

    pub code: Vec<String>,
    pub code_ctx: Vec<Context>,
}

impl Simulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_memory(mut self, memory: Memory) -> Self {
        self.memory = memory;
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Uses `code` as the program. Mostly useful for tests, where there's no source file
    pub fn with_code<I, S>(mut self, code: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.code = code.into_iter().map(Into::into).collect();
        self.code_ctx = vec![Context::empty(); self.code.len()];
        self
    }

    pub fn load(&mut self, parsed: Parsed) {
        let Parsed { code, code_ctx } = parsed;
        self.code = code;
        self.code_ctx = code_ctx;
    }

    pub fn load_file(&mut self, path: &str) -> Result<(), parser::error::ParserError> {
        self.load(parser::tokenize_file(path)?);
        Ok(())
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.pc >= self.code.len()
    }

    /// Where the token at `pos` came from, if the program was loaded from source
    pub fn context_of(&self, pos: usize) -> Option<&Context> {
        self.code_ctx.get(pos)
    }

    pub fn snapshot(&self, signals: Option<ControlSignals>, terminal: bool) -> Snapshot<'_> {
        Snapshot {
            step: self.steps,
            pc: self.pc,
            registers: &self.registers,
            memory: &self.memory,
            signals,
            terminal,
        }
    }

    /// Executes the instruction at the program counter. Returns its control signals, or
    /// `None` if the token there isn't an opcode, in which case a whole frame is skipped.
    pub fn step(&mut self) -> Result<Option<ControlSignals>, SimulatorError> {
        let pc = self.pc;

        let instr = match Instruction::decode(&self.code, pc)? {
            Some(instr) => instr,
            None => {
                warn!(pc, token = ?self.code.get(pc), "skipping unrecognized opcode");
                self.pc += FRAME_LEN;
                return Ok(None);
            }
        };

        let signals = instr.opcode.control();
        let [rd, rs1, rs2] = self.resolve_all(&instr.operands)?;
        debug!(pc, opcode = %instr.opcode, rd, rs1, rs2, "executing");

        let out = alu::execute(signals.alu_op, rd, rs1, rs2);
        let destination = instr.destination().map(str::to_owned);
        let frame_len = instr.opcode.frame_len();

        if let Some(value) = self.memory_access(signals, out, pc)? {
            self.write_back(destination.as_deref(), value);
        }

        self.pc = next_pc(pc, frame_len, out.branch)?;
        self.steps += 1;
        Ok(Some(signals))
    }

    /// Runs the program to completion. The reporter gets a snapshot after every instruction
    /// if tracing is enabled, and always one last snapshot once the program ends.
    ///
    /// On error, the registers and memory are left as they were when the error happened.
    pub fn run<R: Reporter + ?Sized>(&mut self, reporter: &mut R) -> Result<(), SimulatorError> {
        let mut last_signals = None;

        while !self.is_finished() {
            let signals = self.step()?;
            if signals.is_some() {
                last_signals = signals;
            }

            if self.trace {
                reporter.report(&self.snapshot(signals, false))?;
            }
        }

        debug!(steps = self.steps, "program finished");
        reporter.report(&self.snapshot(last_signals, true))?;
        Ok(())
    }
}

/// Where the program counter goes after the instruction at `pc`
fn next_pc(pc: usize, frame_len: usize, branch: Option<Branch>) -> Result<usize, SimulatorError> {
    let target = match branch {
        Some(Branch::Absolute(target)) => target as i64,
        Some(Branch::Relative(offset)) => pc as i64 + offset as i64 + FRAME_LEN as i64,
        None => return Ok(pc + frame_len),
    };

    usize::try_from(target).map_err(|_| SimulatorError::InvalidJumpTarget { target, pos: pc })
}
