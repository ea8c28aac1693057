//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline.
//! It commits results to the register file and moves the committed value
//! into WB/END, where it stays visible to forwarding for one more cycle.

use tracing::warn;

use crate::core::state::MachineState;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::Opcode;
use crate::stats::SimStats;

/// Executes the writeback stage of the pipeline.
///
/// `add`/`nor` write the register named by the low 16-bit field; a field
/// of 8 or more names no register and the write is dropped. `lw` writes the
/// register-B field.
///
/// # Arguments
///
/// * `cur`   - State at the start of the cycle
/// * `next`  - State being built for the end of the cycle
/// * `stats` - Statistics for the cycle
pub fn wb_stage(cur: &MachineState, next: &mut MachineState, stats: &mut SimStats) {
    let mem_wb = &cur.latches.mem_wb;
    let word = mem_wb.instr;

    match word.opcode() {
        Some(Opcode::Add | Opcode::Nor) => {
            let dest = word.imm16() as usize;
            if !next.regs.write(dest, mem_wb.write_data) {
                warn!(
                    instr = word,
                    dest,
                    cycle = cur.cycles,
                    "destination is not a register, write dropped"
                );
                stats.dropped_writes += 1;
            }
        }
        Some(Opcode::Lw) => {
            let written = next.regs.write(word.reg_b(), mem_wb.write_data);
            debug_assert!(written);
        }
        _ => {}
    }
    stats.record_retire(word);

    let wb_end = &mut next.latches.wb_end;
    wb_end.write_data = mem_wb.write_data;
    wb_end.instr = word;
    wb_end.hazards = mem_wb.hazards;
}
