//! Branch Resolution Unit (BRU).
//!
//! The pipeline always predicts not-taken. A `beq` is evaluated in execute;
//! one cycle later, while it sits in EX/MEM, a taken outcome redirects fetch
//! to the branch target and the instructions fetched in between are squashed.

use crate::core::pipeline::latches::ExMem;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::Opcode;

/// Result of evaluating a `beq` in execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchOutcome {
    /// `pc_plus1 + offset`.
    pub target: i32,
    /// Whether the two operands were equal.
    pub taken: bool,
}

/// Evaluates a branch.
///
/// # Arguments
///
/// * `pc_plus1` - Address following the branch
/// * `offset`   - Sign-extended branch offset
/// * `a`, `b`   - Hazard-resolved operands
pub const fn evaluate(pc_plus1: i32, offset: i32, a: i32, b: i32) -> BranchOutcome {
    BranchOutcome {
        target: pc_plus1.wrapping_add(offset),
        taken: a == b,
    }
}

/// Redirect target requested by the branch in EX/MEM, if it was taken.
///
/// # Returns
///
/// `Some(target)` when `ex_mem` holds a `beq` whose `eq` flag is set.
pub fn redirect(ex_mem: &ExMem) -> Option<i32> {
    let taken = ex_mem.eq && ex_mem.instr.opcode() == Some(Opcode::Beq);
    taken.then_some(ex_mem.branch_target)
}
