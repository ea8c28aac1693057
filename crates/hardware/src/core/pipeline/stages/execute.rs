//! Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline.
//! It selects hazard-resolved operands, runs the ALU, evaluates `beq`,
//! and latches the branch target and store data into EX/MEM.
//!
//! Fields an instruction does not compute keep their previous EX/MEM
//! values; the branch target and second operand are always latched.

use tracing::debug;

use crate::core::pipeline::hazards::forward_operands;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::state::MachineState;
use crate::core::units::alu::Alu;
use crate::core::units::bru;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::Opcode;

/// Executes the execute stage of the pipeline.
///
/// # Arguments
///
/// * `cur`      - State at the start of the cycle
/// * `next`     - State being built for the end of the cycle
/// * `redirect` - Whether the branch in EX/MEM was taken, in which case the
///   ID/EX instruction is on the wrong path and is discarded
pub fn execute_stage(cur: &MachineState, next: &mut MachineState, redirect: bool) {
    let ex_mem = &mut next.latches.ex_mem;
    if redirect {
        ex_mem.squash();
        return;
    }

    let id_ex = &cur.latches.id_ex;
    let (a, b) = forward_operands(id_ex, &cur.latches);
    let outcome = bru::evaluate(id_ex.pc_plus1, id_ex.offset, a, b);

    ex_mem.branch_target = outcome.target;
    match id_ex.instr.opcode() {
        Some(Opcode::Beq) => {
            ex_mem.eq = outcome.taken;
            if outcome.taken {
                debug!(target = outcome.target, "branch taken");
            }
        }
        Some(op) => {
            if let Some(result) = Alu::execute(op, a, b, id_ex.offset) {
                ex_mem.alu_result = result;
            }
        }
        None => {}
    }
    ex_mem.val_b = b;
    ex_mem.instr = id_ex.instr;
    ex_mem.hazards = id_ex.hazards;
}
