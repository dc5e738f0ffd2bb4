//!
//! Opcodes, the control signals they decode to, and the token frame of a single instruction.
//!

use crate::simulator::SimulatorError;
use std::fmt;

/// Number of tokens an instruction normally occupies: the opcode and its three operand slots
pub const FRAME_LEN: usize = 4;

/// Every opcode the simulator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    J,
    Beq,
    Add,
    Addi,
    Sub,
    Sw,
    Lw,
    Sll,
    Srl,
    Mult,
    And,
    Or,
    Nop,
}

/// Operation class selected by the ALU control signal. The discriminants are the numeric
/// `aluControl` values shown in traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AluOp {
    Jump = 1,
    BranchEq = 2,
    Add = 3,
    Sub = 4,
    Store = 5,
    Load = 6,
    ShiftLeft = 7,
    ShiftRight = 8,
    Mul = 9,
    And = 10,
    Or = 11,
}

impl AluOp {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// Control signals derived from an opcode during decode. Recomputed for every instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSignals {
    pub alu_op: AluOp,
    pub mem_write: bool,
    pub mem_read: bool,
}

impl ControlSignals {
    const fn new(alu_op: AluOp, mem_write: bool, mem_read: bool) -> Self {
        Self {
            alu_op,
            mem_write,
            mem_read,
        }
    }
}

impl Opcode {
    /// Looks up a mnemonic. Returns `None` for anything that isn't an opcode, which the
    /// simulator skips over.
    pub fn from_token(token: &str) -> Option<Self> {
        use Opcode::*;
        let opcode = match token {
            "j" => J,
            "beq" => Beq,
            "add" => Add,
            "addi" => Addi,
            "sub" => Sub,
            "sw" => Sw,
            "lw" => Lw,
            "sll" => Sll,
            "srl" => Srl,
            "mult" | "mul" => Mult,
            "and" => And,
            "or" => Or,
            "nop" => Nop,
            _ => return None,
        };
        Some(opcode)
    }

    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            J => "j",
            Beq => "beq",
            Add => "add",
            Addi => "addi",
            Sub => "sub",
            Sw => "sw",
            Lw => "lw",
            Sll => "sll",
            Srl => "srl",
            Mult => "mult",
            And => "and",
            Or => "or",
            Nop => "nop",
        }
    }

    /// The decode table
    pub fn control(self) -> ControlSignals {
        use Opcode::*;
        match self {
            J => ControlSignals::new(AluOp::Jump, false, false),
            Beq => ControlSignals::new(AluOp::BranchEq, false, false),
            Add | Addi => ControlSignals::new(AluOp::Add, false, false),
            Sub => ControlSignals::new(AluOp::Sub, false, false),
            Sw => ControlSignals::new(AluOp::Store, true, false),
            Lw => ControlSignals::new(AluOp::Load, false, true),
            Sll => ControlSignals::new(AluOp::ShiftLeft, false, false),
            Srl => ControlSignals::new(AluOp::ShiftRight, false, false),
            Mult => ControlSignals::new(AluOp::Mul, false, false),
            And => ControlSignals::new(AluOp::And, false, false),
            Or => ControlSignals::new(AluOp::Or, false, false),
            // nop is a shift of zero by zero into nowhere
            Nop => ControlSignals::new(AluOp::ShiftLeft, false, false),
        }
    }

    /// How many operand slots are actually read. `j` only needs its target; the remaining
    /// slots are never looked at because the jump replaces the program counter.
    pub fn operand_count(self) -> usize {
        match self {
            Opcode::Nop => 0,
            Opcode::J => 1,
            _ => 3,
        }
    }

    /// How many tokens the program counter moves past when the instruction doesn't branch
    pub fn frame_len(self) -> usize {
        match self {
            Opcode::Nop => 1,
            _ => FRAME_LEN,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic())
    }
}

/// A single operand slot of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand<'a> {
    /// A token from the stream, along with its index in it
    Token { text: &'a str, pos: usize },
    /// Filler for slots the opcode doesn't read
    Zero,
}

impl<'a> Operand<'a> {
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            Operand::Token { text, .. } => Some(text),
            Operand::Zero => None,
        }
    }
}

/// One decoded instruction frame: {opcode, destination, source 1, source 2}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction<'a> {
    pub opcode: Opcode,
    /// Index of the opcode token
    pub pc: usize,
    pub operands: [Operand<'a>; 3],
}

impl<'a> Instruction<'a> {
    /// Decodes the frame starting at `pc`. Returns `Ok(None)` if the token at `pc` is not an
    /// opcode.
    pub fn decode<S: AsRef<str>>(code: &'a [S], pc: usize) -> Result<Option<Self>, SimulatorError> {
        let token = match code.get(pc) {
            Some(token) => token.as_ref(),
            None => return Ok(None),
        };

        let opcode = match Opcode::from_token(token) {
            Some(opcode) => opcode,
            None => return Ok(None),
        };

        let count = opcode.operand_count();
        if pc + count >= code.len() {
            return Err(SimulatorError::TruncatedInstruction {
                opcode: opcode.mnemonic(),
                pos: pc,
            });
        }

        let mut operands = [Operand::Zero; 3];
        for (i, slot) in operands.iter_mut().enumerate().take(count) {
            let pos = pc + 1 + i;
            *slot = Operand::Token {
                text: code[pos].as_ref(),
                pos,
            };
        }

        Ok(Some(Self {
            opcode,
            pc,
            operands,
        }))
    }

    /// Register the result is written back to. Jumps, branches, stores and nops never write
    /// a register.
    pub fn destination(&self) -> Option<&'a str> {
        match self.opcode {
            Opcode::J | Opcode::Beq | Opcode::Sw | Opcode::Nop => None,
            _ => self.operands[0].text(),
        }
    }
}
