//! Text reports of programs and machine state.
//!
//! This module renders the traditional simulator output. It provides:
//! 1. **Program Listing:** The loader echo of instruction memory (hex, decimal, disassembly).
//! 2. **State Report:** The full machine state before a cycle, with every
//!    latch field that the latch's instruction does not use marked `(Don't Care)`.
//! 3. **Halt Report:** The trailer printed once the machine halts, followed by the final state.
//!
//! The don't-care tests compare the raw opcode field numerically, so
//! unrecognised opcodes are marked by whichever range tests they fall in.
//! Nothing here influences execution.

use std::fmt;

use crate::core::state::MachineState;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::{OP_BEQ, OP_HALT, OP_LW, OP_NOOP, OP_SW};
use crate::sim::loader::Program;

const DONT_CARE: &str = " (Don't Care)";

const fn dont_care(unused: bool) -> &'static str {
    if unused { DONT_CARE } else { "" }
}

/// Loader echo of a program image.
///
/// # Examples
///
/// ```
/// use pipesim_core::sim::loader::Program;
/// use pipesim_core::sim::report::ProgramListing;
///
/// let program = Program::parse("8454151\n25165824\n").unwrap();
/// assert_eq!(
///     ProgramListing(&program).to_string(),
///     "instruction memory:\n\
///      \tinstrMem[ 0 ]\t= 0x00810007\t= 8454151\t= lw 0 1 7\n\
///      \tinstrMem[ 1 ]\t= 0x01800000\t= 25165824\t= halt\n"
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ProgramListing<'a>(pub &'a Program);

impl fmt::Display for ProgramListing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "instruction memory:")?;
        for (addr, &word) in self.0.words().iter().enumerate() {
            writeln!(
                f,
                "\tinstrMem[ {addr} ]\t= 0x{word:08x}\t= {word}\t= {}",
                disassemble(word)
            )?;
        }
        Ok(())
    }
}

/// Full dump of a machine state, as printed before every cycle.
#[derive(Clone, Copy, Debug)]
pub struct StateReport<'a>(pub &'a MachineState);

impl StateReport<'_> {
    fn instruction(f: &mut fmt::Formatter<'_>, word: i32) -> fmt::Result {
        writeln!(f, "\t\tinstruction = {word} ( {} )", disassemble(word))
    }
}

impl fmt::Display for StateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;
        let latches = &state.latches;

        writeln!(f, "\n@@@")?;
        writeln!(f, "state before cycle {} starts:", state.cycles)?;
        writeln!(f, "\tpc = {}", state.pc)?;

        writeln!(f, "\tdata memory:")?;
        for (addr, value) in state.loaded_data().iter().enumerate() {
            writeln!(f, "\t\tdataMem[ {addr} ] = {value}")?;
        }
        writeln!(f, "\tregisters:")?;
        for (idx, value) in state.regs.iter().enumerate() {
            writeln!(f, "\t\treg[ {idx} ] = {value}")?;
        }

        let if_id = &latches.if_id;
        let unused = dont_care(if_id.instr.opcode_raw() == OP_NOOP);
        writeln!(f, "\tIF/ID pipeline register:")?;
        Self::instruction(f, if_id.instr)?;
        writeln!(f, "\t\tpcPlus1 = {}{unused}", if_id.pc_plus1)?;

        let id_ex = &latches.id_ex;
        let op = id_ex.instr.opcode_raw();
        let unused = dont_care(op == OP_NOOP);
        writeln!(f, "\tID/EX pipeline register:")?;
        Self::instruction(f, id_ex.instr)?;
        writeln!(f, "\t\tpcPlus1 = {}{unused}", id_ex.pc_plus1)?;
        writeln!(
            f,
            "\t\treadRegA = {}{}",
            id_ex.val_a,
            dont_care(!(0..OP_HALT).contains(&op))
        )?;
        writeln!(
            f,
            "\t\treadRegB = {}{}",
            id_ex.val_b,
            dont_care(op == OP_LW || !(0..=OP_BEQ).contains(&op))
        )?;
        writeln!(
            f,
            "\t\toffset = {}{}",
            id_ex.offset,
            dont_care(op != OP_LW && op != OP_SW && op != OP_BEQ)
        )?;

        let ex_mem = &latches.ex_mem;
        let op = ex_mem.instr.opcode_raw();
        writeln!(f, "\tEX/MEM pipeline register:")?;
        Self::instruction(f, ex_mem.instr)?;
        writeln!(
            f,
            "\t\tbranchTarget {}{}",
            ex_mem.branch_target,
            dont_care(op != OP_BEQ)
        )?;
        writeln!(
            f,
            "\t\teq ? {}{}",
            if ex_mem.eq { "True" } else { "False" },
            dont_care(op != OP_BEQ)
        )?;
        writeln!(
            f,
            "\t\taluResult = {}{}",
            ex_mem.alu_result,
            dont_care(!(0..=OP_SW).contains(&op))
        )?;
        let unused = dont_care(op != OP_SW);
        writeln!(f, "\t\treadRegB = {}{unused}", ex_mem.val_b)?;

        let mem_wb = &latches.mem_wb;
        let op = mem_wb.instr.opcode_raw();
        writeln!(f, "\tMEM/WB pipeline register:")?;
        Self::instruction(f, mem_wb.instr)?;
        writeln!(
            f,
            "\t\twriteData = {}{}",
            mem_wb.write_data,
            dont_care(!(0..OP_SW).contains(&op))
        )?;

        let wb_end = &latches.wb_end;
        let op = wb_end.instr.opcode_raw();
        writeln!(f, "\tWB/END pipeline register:")?;
        Self::instruction(f, wb_end.instr)?;
        writeln!(
            f,
            "\t\twriteData = {}{}",
            wb_end.write_data,
            dont_care(!(0..OP_SW).contains(&op))
        )?;

        writeln!(f, "end state")
    }
}

/// Trailer printed once the machine halts, followed by the final state.
#[derive(Clone, Copy, Debug)]
pub struct HaltReport<'a>(pub &'a MachineState);

impl fmt::Display for HaltReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Machine halted")?;
        writeln!(f, "Total of {} cycles executed", self.0.cycles)?;
        writeln!(f, "Final state of machine:")?;
        write!(f, "{}", StateReport(self.0))
    }
}
