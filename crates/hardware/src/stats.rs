//! Simulation statistics collection and reporting.
//!
//! This module tracks pipeline metrics for a run. It provides:
//! 1. **Cycle and CPI:** Total cycles and retired instructions.
//! 2. **Instruction mix:** Retired counts by category (ALU, load, store, branch).
//! 3. **Hazards:** Load-use stalls, taken-branch redirects and squashed instructions.
//! 4. **Forwarding:** Operands forwarded from each latch.

use std::fmt;

use serde::Serialize;

use crate::core::pipeline::latches::{HazardSource, OperandHazards};
use crate::isa::opcodes::Opcode;

const RULE: &str = "==========================================================";
const THIN_RULE: &str = "----------------------------------------------------------";

/// Simulation statistics for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Cycles executed.
    pub cycles: u64,
    /// Instructions that completed writeback (no-ops excluded).
    pub instructions_retired: u64,

    /// Retired `add`/`nor`.
    pub inst_alu: u64,
    /// Retired `lw`.
    pub inst_load: u64,
    /// Retired `sw`.
    pub inst_store: u64,
    /// Retired `beq`.
    pub inst_branch: u64,
    /// Retired `jalr` and unrecognised words other than no-ops.
    pub inst_other: u64,

    /// Cycles in which decode stalled on a load-use hazard.
    pub stalls_load_use: u64,
    /// Taken branches that redirected fetch.
    pub branches_taken: u64,
    /// Non-no-op instructions discarded by redirects.
    pub instructions_squashed: u64,

    /// Operands forwarded from EX/MEM.
    pub forwards_ex_mem: u64,
    /// Operands forwarded from MEM/WB.
    pub forwards_mem_wb: u64,
    /// Operands forwarded from WB/END.
    pub forwards_wb_end: u64,

    /// Register writes dropped because the destination field named no register.
    pub dropped_writes: u64,
}

impl SimStats {
    /// Records an instruction word leaving writeback.
    pub fn record_retire(&mut self, word: i32) {
        use crate::isa::instruction::InstructionBits;

        match word.opcode() {
            Some(Opcode::Noop) => return,
            Some(Opcode::Add | Opcode::Nor) => self.inst_alu += 1,
            Some(Opcode::Lw) => self.inst_load += 1,
            Some(Opcode::Sw) => self.inst_store += 1,
            Some(Opcode::Beq) => self.inst_branch += 1,
            Some(Opcode::Jalr | Opcode::Halt) | None => self.inst_other += 1,
        }
        self.instructions_retired += 1;
    }

    /// Records the forwarding tags chosen at decode.
    pub fn record_forwards(&mut self, hazards: OperandHazards) {
        for source in [hazards.a, hazards.b].into_iter().flatten() {
            match source {
                HazardSource::ExMem => self.forwards_ex_mem += 1,
                HazardSource::MemWb => self.forwards_mem_wb += 1,
                HazardSource::WbEnd => self.forwards_wb_end += 1,
            }
        }
    }

    /// Cycles per retired instruction, or `None` before anything retired.
    pub fn cpi(&self) -> Option<f64> {
        (self.instructions_retired != 0)
            .then(|| self.cycles as f64 / self.instructions_retired as f64)
    }

    /// Prints all statistics to stdout.
    pub fn print(&self) {
        print!("{self}");
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pct = |n: u64, of: u64| {
            if of == 0 {
                0.0
            } else {
                n as f64 / of as f64 * 100.0
            }
        };
        let retired = self.instructions_retired;

        writeln!(f, "\n{RULE}")?;
        writeln!(f, "PIPELINE SIMULATION STATISTICS")?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts                {retired}")?;
        match self.cpi() {
            Some(cpi) => writeln!(f, "sim_cpi                  {cpi:.4}")?,
            None => writeln!(f, "sim_cpi                  n/a")?,
        }
        writeln!(f, "{THIN_RULE}")?;
        writeln!(f, "INSTRUCTION MIX")?;
        for (name, n) in [
            ("op.alu", self.inst_alu),
            ("op.load", self.inst_load),
            ("op.store", self.inst_store),
            ("op.branch", self.inst_branch),
            ("op.other", self.inst_other),
        ] {
            writeln!(f, "  {name:<22} {n} ({:.2}%)", pct(n, retired))?;
        }
        writeln!(f, "{THIN_RULE}")?;
        writeln!(f, "HAZARDS")?;
        let stalls = self.stalls_load_use;
        let stall_pct = pct(stalls, self.cycles);
        writeln!(f, "  stalls.load_use        {stalls} ({stall_pct:.2}%)")?;
        for (name, n) in [
            ("branch.taken", self.branches_taken),
            ("branch.squashed", self.instructions_squashed),
            ("forward.ex_mem", self.forwards_ex_mem),
            ("forward.mem_wb", self.forwards_mem_wb),
            ("forward.wb_end", self.forwards_wb_end),
            ("writes.dropped", self.dropped_writes),
        ] {
            writeln!(f, "  {name:<22} {n}")?;
        }
        writeln!(f, "{RULE}")
    }
}
