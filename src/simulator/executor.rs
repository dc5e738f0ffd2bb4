//! Deals with the stages around the ALU: resolving operands, accessing memory and writing
//! results back to the register file

use super::{alu::AluOutput, registers::Registers, Simulator, SimulatorError};
use crate::instruction::{ControlSignals, Operand};
use tracing::trace;

/// Value of an operand: the contents of the register it names, or else the integer it spells
pub fn resolve(registers: &Registers, operand: Operand<'_>) -> Result<i32, SimulatorError> {
    match operand {
        Operand::Zero => Ok(0),
        Operand::Token { text, pos } => registers
            .get(text)
            .map(Ok)
            .unwrap_or_else(|| {
                text.parse::<i32>()
                    .map_err(|_| SimulatorError::MalformedOperand {
                        token: text.to_owned(),
                        pos,
                    })
            }),
    }
}

impl Simulator {
    /// Resolves the destination, source 1 and source 2 operands, in that order
    pub(super) fn resolve_all(&self, operands: &[Operand<'_>; 3]) -> Result<[i32; 3], SimulatorError> {
        let [rd, rs1, rs2] = *operands;
        Ok([
            resolve(&self.registers, rd)?,
            resolve(&self.registers, rs1)?,
            resolve(&self.registers, rs2)?,
        ])
    }

    /// The memory stage. Returns the value to write back, or `None` if this instruction
    /// must not write a register.
    pub(super) fn memory_access(
        &mut self,
        signals: ControlSignals,
        out: AluOutput,
        pc: usize,
    ) -> Result<Option<i32>, SimulatorError> {
        let size = self.memory.len();
        let out_of_range = |address| SimulatorError::OutOfRangeAddress { address, size, pos: pc };

        if signals.mem_write {
            if let Some(address) = out.mem_index {
                self.memory
                    .set_word(address, out.result)
                    .ok_or_else(|| out_of_range(address))?;
            }
            return Ok(None);
        }

        if signals.mem_read {
            let word = self
                .memory
                .get_word(out.result)
                .ok_or_else(|| out_of_range(out.result))?;
            return Ok(Some(word));
        }

        Ok(Some(out.result))
    }

    /// Writes `value` to `destination` if it's a writable register. Anything else is silently
    /// dropped.
    pub(super) fn write_back(&mut self, destination: Option<&str>, value: i32) {
        let Some(name) = destination else { return };
        if !self.registers.set(name, value) {
            trace!(destination = name, value, "write-back discarded");
        }
    }
}
