//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline.
//! It reads the instruction at the current program counter into IF/ID,
//! or, when the branch in EX/MEM was taken, redirects the program counter
//! to the branch target and latches a bubble instead.

use tracing::trace;

use crate::common::error::SimError;
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::state::MachineState;

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cur`      - State at the start of the cycle
/// * `next`     - State being built for the end of the cycle
/// * `redirect` - Target of a taken branch in the current EX/MEM, if any
///
/// # Errors
///
/// `SimError::FetchOutOfRange` when the program counter is outside
/// instruction memory and no redirect replaces the fetch.
pub fn fetch_stage(
    cur: &MachineState,
    next: &mut MachineState,
    redirect: Option<i32>,
) -> Result<(), SimError> {
    let if_id = &mut next.latches.if_id;

    if let Some(target) = redirect {
        next.pc = target;
        if_id.squash();
        if_id.pc_plus1 = target.wrapping_add(1);
        return Ok(());
    }

    let Some(instr) = cur.instr_mem().read(cur.pc) else {
        return Err(SimError::FetchOutOfRange {
            pc: cur.pc,
            cycle: cur.cycles,
        });
    };
    trace!(pc = cur.pc, instr, "fetch");

    next.pc = cur.pc.wrapping_add(1);
    if_id.instr = instr;
    if_id.pc_plus1 = next.pc;
    Ok(())
}
