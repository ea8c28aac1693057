//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline.
//! Loads read the data memory of the current snapshot; stores write the
//! data memory of the next one. Arithmetic results pass through.

use crate::common::error::SimError;
use crate::core::state::MachineState;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::Opcode;

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cur`  - State at the start of the cycle
/// * `next` - State being built for the end of the cycle
///
/// # Errors
///
/// `SimError::DataAddressOutOfRange` when a load or store address is
/// outside data memory.
pub fn mem_stage(cur: &MachineState, next: &mut MachineState) -> Result<(), SimError> {
    let ex_mem = &cur.latches.ex_mem;
    let out_of_range = || SimError::DataAddressOutOfRange {
        addr: ex_mem.alu_result,
        cycle: cur.cycles,
    };

    match ex_mem.instr.opcode() {
        Some(Opcode::Add | Opcode::Nor) => next.latches.mem_wb.write_data = ex_mem.alu_result,
        Some(Opcode::Lw) => {
            let loaded = cur.data_mem.read(ex_mem.alu_result);
            next.latches.mem_wb.write_data = loaded.ok_or_else(out_of_range)?;
        }
        Some(Opcode::Sw) => {
            let stored = next.data_mem.write(ex_mem.alu_result, ex_mem.val_b);
            stored.ok_or_else(out_of_range)?;
        }
        _ => {}
    }

    let mem_wb = &mut next.latches.mem_wb;
    mem_wb.instr = ex_mem.instr;
    mem_wb.hazards = ex_mem.hazards;
    Ok(())
}
