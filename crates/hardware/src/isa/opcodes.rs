//! LC-2K opcode definitions.

use std::fmt;

/// Raw opcode value for `add`.
pub const OP_ADD: i32 = 0;
/// Raw opcode value for `nor`.
pub const OP_NOR: i32 = 1;
/// Raw opcode value for `lw`.
pub const OP_LW: i32 = 2;
/// Raw opcode value for `sw`.
pub const OP_SW: i32 = 3;
/// Raw opcode value for `beq`.
pub const OP_BEQ: i32 = 4;
/// Raw opcode value for `jalr` (decoded but not executed by the pipeline).
pub const OP_JALR: i32 = 5;
/// Raw opcode value for `halt`.
pub const OP_HALT: i32 = 6;
/// Raw opcode value for `noop`.
pub const OP_NOOP: i32 = 7;

/// A recognised LC-2K opcode.
///
/// Words whose opcode field falls outside `0..=7` have no `Opcode`; every
/// pipeline stage treats them like `noop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `add regA regB dest`: `dest = regA + regB`.
    Add,
    /// `nor regA regB dest`: `dest = !(regA | regB)`.
    Nor,
    /// `lw regA regB offset`: `regB = mem[regA + offset]`.
    Lw,
    /// `sw regA regB offset`: `mem[regA + offset] = regB`.
    Sw,
    /// `beq regA regB offset`: branch to `pc + 1 + offset` if equal.
    Beq,
    /// `jalr regA regB`: passed through the pipeline uninterpreted.
    Jalr,
    /// `halt`: stops the machine once it reaches writeback.
    Halt,
    /// `noop`.
    Noop,
}

impl Opcode {
    /// Maps a raw opcode field to an `Opcode`.
    ///
    /// # Returns
    ///
    /// `None` for values outside `0..=7`.
    pub const fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            OP_ADD => Some(Self::Add),
            OP_NOR => Some(Self::Nor),
            OP_LW => Some(Self::Lw),
            OP_SW => Some(Self::Sw),
            OP_BEQ => Some(Self::Beq),
            OP_JALR => Some(Self::Jalr),
            OP_HALT => Some(Self::Halt),
            OP_NOOP => Some(Self::Noop),
            _ => None,
        }
    }

    /// Returns the raw opcode field value.
    pub const fn raw(self) -> i32 {
        match self {
            Self::Add => OP_ADD,
            Self::Nor => OP_NOR,
            Self::Lw => OP_LW,
            Self::Sw => OP_SW,
            Self::Beq => OP_BEQ,
            Self::Jalr => OP_JALR,
            Self::Halt => OP_HALT,
            Self::Noop => OP_NOOP,
        }
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Nor => "nor",
            Self::Lw => "lw",
            Self::Sw => "sw",
            Self::Beq => "beq",
            Self::Jalr => "jalr",
            Self::Halt => "halt",
            Self::Noop => "noop",
        }
    }

    /// Whether the opcode writes its result into the register named by the low 16-bit field.
    pub const fn is_arithmetic(self) -> bool {
        matches!(self, Self::Add | Self::Nor)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
