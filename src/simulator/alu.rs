//! The arithmetic/logic unit. Pure: it never touches the register file, the memory or the
//! program counter, it only says what should happen to them.

use crate::instruction::AluOp;

/// How a control-flow instruction moves the program counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// Continue at this token index
    Absolute(i32),
    /// Continue this many tokens past the normal frame advance
    Relative(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluOutput {
    pub result: i32,
    /// Address a store writes to
    pub mem_index: Option<i32>,
    pub branch: Option<Branch>,
}

impl AluOutput {
    fn value(result: i32) -> Self {
        Self {
            result,
            mem_index: None,
            branch: None,
        }
    }
}

/// Shift amounts only use the low 5 bits, like `sll`/`srl` on a 32-bit machine
#[inline]
fn shamt(x: i32) -> u32 {
    x as u32 & 0x1f
}

/// Computes `op` over the destination, source 1 and source 2 operand values
pub fn execute(op: AluOp, rd: i32, rs1: i32, rs2: i32) -> AluOutput {
    use AluOp::*;

    match op {
        Jump => AluOutput {
            result: rd,
            mem_index: None,
            branch: Some(Branch::Absolute(rd)),
        },
        BranchEq => AluOutput {
            result: rd,
            mem_index: None,
            branch: (rd == rs1).then_some(Branch::Relative(rs2)),
        },
        Add => AluOutput::value(rs1.wrapping_add(rs2)),
        Sub => AluOutput::value(rs1.wrapping_sub(rs2)),
        // The value stored is whatever the destination register already holds
        Store => AluOutput {
            result: rd,
            mem_index: Some(rs1.wrapping_add(rs2)),
            branch: None,
        },
        // The sum is the address, the memory step swaps it for the loaded word
        Load => AluOutput::value(rs1.wrapping_add(rs2)),
        ShiftLeft => AluOutput::value(((rs1 as u32) << shamt(rs2)) as i32),
        ShiftRight => AluOutput::value(((rs1 as u32) >> shamt(rs2)) as i32),
        Mul => AluOutput::value(rs1.wrapping_mul(rs2)),
        And => AluOutput::value(rs1 & rs2),
        Or => AluOutput::value(rs1 | rs2),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_arithmetic() {
        assert_eq!(execute(AluOp::Add, 0, 3, 4).result, 7);
        assert_eq!(execute(AluOp::Sub, 0, 3, 4).result, -1);
        assert_eq!(execute(AluOp::Mul, 0, -6, 7).result, -42);
        assert_eq!(execute(AluOp::And, 0, 0b1100, 0b1010).result, 0b1000);
        assert_eq!(execute(AluOp::Or, 0, 0b1100, 0b1010).result, 0b1110);
    }

    #[test]
    fn test_shifts_are_logical() {
        assert_eq!(execute(AluOp::ShiftLeft, 0, 3, 2).result, 12);
        assert_eq!(execute(AluOp::ShiftRight, 0, -1, 1).result, i32::MAX);
        assert_eq!(execute(AluOp::ShiftRight, 0, -8, 0).result, -8);
        assert_eq!(execute(AluOp::ShiftLeft, 0, 1, 31).result, i32::MIN);
        // only the low 5 bits of the amount count
        assert_eq!(execute(AluOp::ShiftLeft, 0, 1, 33).result, 2);
    }

    #[test]
    fn test_nop_is_zero() {
        let out = execute(AluOp::ShiftLeft, 0, 0, 0);
        assert_eq!(out, AluOutput::value(0));
    }

    #[test]
    fn test_memory_ops() {
        let store = execute(AluOp::Store, 17, 5, 3);
        assert_eq!(store.result, 17);
        assert_eq!(store.mem_index, Some(8));
        assert_eq!(store.branch, None);

        let load = execute(AluOp::Load, 17, 5, 3);
        assert_eq!(load.result, 8);
        assert_eq!(load.mem_index, None);
    }

    #[test]
    fn test_control_flow() {
        assert_eq!(execute(AluOp::Jump, 8, 0, 0).branch, Some(Branch::Absolute(8)));
        assert_eq!(execute(AluOp::BranchEq, 2, 2, 3).branch, Some(Branch::Relative(3)));
        assert_eq!(execute(AluOp::BranchEq, 2, 1, 3).branch, None);
        assert_eq!(execute(AluOp::BranchEq, 2, 2, -9).branch, Some(Branch::Relative(-9)));
    }

    proptest! {
        #[test]
        fn prop_wraparound_matches_i64(a: i32, b: i32) {
            let wide = |x: i64| x as i32;
            prop_assert_eq!(execute(AluOp::Add, 0, a, b).result, wide(a as i64 + b as i64));
            prop_assert_eq!(execute(AluOp::Sub, 0, a, b).result, wide(a as i64 - b as i64));
            prop_assert_eq!(execute(AluOp::Mul, 0, a, b).result, wide(a as i64 * b as i64));
        }

        #[test]
        fn prop_srl_never_sign_extends(a: i32, amount in 1..32i32) {
            prop_assert!(execute(AluOp::ShiftRight, 0, a, amount).result >= 0);
        }
    }
}
