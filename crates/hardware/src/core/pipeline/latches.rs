//! Pipeline latch structures for inter-stage communication.
//!
//! This module defines the five latches of the pipeline:
//! IF/ID → ID/EX → EX/MEM → MEM/WB → WB/END.
//!
//! 1. **Instruction Flow:** Each latch carries the raw instruction word occupying it.
//! 2. **Stage Results:** Stage-specific values computed for the next stage.
//! 3. **Hazard Metadata:** Forwarding tags computed at decode and carried forward.
//!
//! The WB/END latch holds the value committed by writeback one cycle earlier.
//! It has no consumer stage; it exists so the hazard resolver can forward from
//! an instruction three decode-cycles ahead, whose register write is not yet
//! visible in the register-file snapshot read by decode.

use crate::common::constants::NOOP_INSTRUCTION;
use crate::core::pipeline::traits::PipelineLatch;

/// Latch a forwarded operand is taken from during execute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HazardSource {
    /// Producer was one decode-cycle ahead; value is `EX/MEM.alu_result`.
    ExMem,
    /// Producer was two decode-cycles ahead; value is `MEM/WB.write_data`.
    MemWb,
    /// Producer was three decode-cycles ahead; value is `WB/END.write_data`.
    WbEnd,
}

impl HazardSource {
    /// Source for a producer at window position `pos` (0 = nearest).
    pub const fn from_window_position(pos: usize) -> Option<Self> {
        match pos {
            0 => Some(Self::ExMem),
            1 => Some(Self::MemWb),
            2 => Some(Self::WbEnd),
            _ => None,
        }
    }

    /// Short latch name used in logs and state dumps.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ExMem => "EX/MEM",
            Self::MemWb => "MEM/WB",
            Self::WbEnd => "WB/END",
        }
    }
}

/// Per-operand forwarding decisions.
///
/// `None` means the operand value latched at decode (read from the register
/// file) is used unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OperandHazards {
    /// Forwarding source for the register-A operand.
    pub a: Option<HazardSource>,
    /// Forwarding source for the register-B operand.
    pub b: Option<HazardSource>,
}

impl OperandHazards {
    /// No forwarding for either operand.
    pub const NONE: Self = Self { a: None, b: None };
}

/// IF/ID latch (Fetch to Decode).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IfId {
    /// Fetched instruction word.
    pub instr: i32,
    /// Address following the fetched instruction.
    pub pc_plus1: i32,
}

/// ID/EX latch (Decode to Execute).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IdEx {
    /// Decoded instruction word.
    pub instr: i32,
    /// Address following the instruction.
    pub pc_plus1: i32,
    /// Register-A value read from the register file.
    pub val_a: i32,
    /// Register-B value read from the register file.
    pub val_b: i32,
    /// Sign-extended 16-bit field.
    pub offset: i32,
    /// Forwarding decisions for the two operands.
    pub hazards: OperandHazards,
}

/// EX/MEM latch (Execute to Memory).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExMem {
    /// Instruction word.
    pub instr: i32,
    /// `pc_plus1 + offset` of the instruction.
    pub branch_target: i32,
    /// Equality result of a `beq`.
    pub eq: bool,
    /// ALU result: sum, NOR, or effective address.
    pub alu_result: i32,
    /// Resolved register-B operand (store data).
    pub val_b: i32,
    /// Hazard metadata carried from ID/EX.
    pub hazards: OperandHazards,
}

/// MEM/WB latch (Memory to Writeback).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemWb {
    /// Instruction word.
    pub instr: i32,
    /// Value to be committed by writeback.
    pub write_data: i32,
    /// Hazard metadata carried from EX/MEM.
    pub hazards: OperandHazards,
}

/// WB/END latch (after Writeback).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WbEnd {
    /// Instruction word that committed last cycle.
    pub instr: i32,
    /// Value committed last cycle.
    pub write_data: i32,
    /// Hazard metadata carried from MEM/WB.
    pub hazards: OperandHazards,
}

impl Default for IfId {
    fn default() -> Self {
        Self {
            instr: NOOP_INSTRUCTION,
            pc_plus1: 0,
        }
    }
}

impl Default for IdEx {
    fn default() -> Self {
        Self {
            instr: NOOP_INSTRUCTION,
            pc_plus1: 0,
            val_a: 0,
            val_b: 0,
            offset: 0,
            hazards: OperandHazards::NONE,
        }
    }
}

impl Default for ExMem {
    fn default() -> Self {
        Self {
            instr: NOOP_INSTRUCTION,
            branch_target: 0,
            eq: false,
            alu_result: 0,
            val_b: 0,
            hazards: OperandHazards::NONE,
        }
    }
}

impl Default for MemWb {
    fn default() -> Self {
        Self {
            instr: NOOP_INSTRUCTION,
            write_data: 0,
            hazards: OperandHazards::NONE,
        }
    }
}

impl Default for WbEnd {
    fn default() -> Self {
        Self {
            instr: NOOP_INSTRUCTION,
            write_data: 0,
            hazards: OperandHazards::NONE,
        }
    }
}

macro_rules! impl_pipeline_latch {
    ($($latch:ty),* $(,)?) => {
        $(
            impl PipelineLatch for $latch {
                #[inline]
                fn instruction(&self) -> i32 {
                    self.instr
                }

                #[inline]
                fn squash(&mut self) {
                    self.instr = NOOP_INSTRUCTION;
                }
            }
        )*
    };
}

impl_pipeline_latch!(IfId, IdEx, ExMem, MemWb, WbEnd);

/// The five pipeline latches of one machine state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Latches {
    /// IF/ID latch.
    pub if_id: IfId,
    /// ID/EX latch.
    pub id_ex: IdEx,
    /// EX/MEM latch.
    pub ex_mem: ExMem,
    /// MEM/WB latch.
    pub mem_wb: MemWb,
    /// WB/END latch.
    pub wb_end: WbEnd,
}

impl Latches {
    /// Instruction words held by each latch, IF/ID first.
    pub fn instructions(&self) -> [i32; 5] {
        [
            self.if_id.instruction(),
            self.id_ex.instruction(),
            self.ex_mem.instruction(),
            self.mem_wb.instruction(),
            self.wb_end.instruction(),
        ]
    }
}
