//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline.
//! It performs the following:
//! 1. **Operand Read:** Reads both register fields from the register file snapshot.
//! 2. **Offset Extension:** Sign-extends the 16-bit field.
//! 3. **Hazard Resolution:** Tags operands for forwarding, or stalls on a
//!    load-use hazard by latching a bubble and holding fetch in place.

use crate::config::LoadConsumerForwarding;
use crate::core::pipeline::hazards::{self, HazardWindow, Resolution};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::state::MachineState;
use crate::isa::instruction::InstructionBits;
use crate::stats::SimStats;

/// What decode did this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// The IF/ID instruction moved into ID/EX.
    Issued,
    /// A load-use hazard held the IF/ID instruction; ID/EX received a bubble.
    Stalled,
    /// A taken branch discarded the IF/ID instruction.
    Squashed,
}

/// Executes the instruction decode stage of the pipeline.
///
/// A stall holds the program counter and IF/ID at their current values;
/// [`fetch_stage`](super::fetch_stage) does not run in a stalled cycle.
///
/// # Arguments
///
/// * `cur`      - State at the start of the cycle
/// * `next`     - State being built for the end of the cycle
/// * `redirect` - Whether the branch in EX/MEM was taken
/// * `policy`   - Forwarding policy for `lw` consumers
/// * `stats`    - Statistics for the cycle
pub fn decode_stage(
    cur: &MachineState,
    next: &mut MachineState,
    redirect: bool,
    policy: LoadConsumerForwarding,
    stats: &mut SimStats,
) -> DecodeOutcome {
    if redirect {
        next.latches.id_ex.squash();
        return DecodeOutcome::Squashed;
    }

    let if_id = &cur.latches.if_id;
    let word = if_id.instr;
    let id_ex = &mut next.latches.id_ex;

    id_ex.pc_plus1 = if_id.pc_plus1;
    id_ex.val_a = cur.regs.read(word.reg_a());
    id_ex.val_b = cur.regs.read(word.reg_b());
    id_ex.offset = word.offset();
    id_ex.instr = word;

    match hazards::resolve(word, &HazardWindow::capture(&cur.latches), policy) {
        Resolution::Proceed(tags) => {
            id_ex.hazards = tags;
            stats.record_forwards(tags);
            DecodeOutcome::Issued
        }
        Resolution::Stall(tags) => {
            id_ex.hazards = tags;
            id_ex.squash();
            next.pc = cur.pc;
            next.latches.if_id = cur.latches.if_id;
            stats.stalls_load_use += 1;
            DecodeOutcome::Stalled
        }
    }
}
