//! Instruction encoding and decoding utilities.
//!
//! Provides bit extraction functions for decoding LC-2K instruction fields
//! from 32-bit instruction words, plus the matching encoders.
//!
//! Layout (the opcode is the word shifted right by 22, so a well-formed
//! instruction keeps bits 31-25 clear):
//!
//! ```text
//!  24   22 21  19 18  16 15                0
//! +-------+------+------+-------------------+
//! |opcode | regA | regB |  dest / offset    |
//! +-------+------+------+-------------------+
//! ```

use crate::common::constants::{
    IMM_MASK, IMM_SIGN_BIT, OPCODE_SHIFT, REG_A_SHIFT, REG_B_SHIFT, REG_MASK,
};
use crate::isa::opcodes::{OP_ADD, OP_BEQ, OP_HALT, OP_JALR, OP_LW, OP_NOOP, OP_NOR, OP_SW, Opcode};

/// Widens a raw 16-bit field to a signed 32-bit value (two's complement).
///
/// Bits above bit 15 of `raw` are ignored.
#[inline]
pub const fn sign_extend_16(raw: u32) -> i32 {
    let raw = raw & 0xFFFF;
    if raw & IMM_SIGN_BIT != 0 {
        raw as i32 - (1 << 16)
    } else {
        raw as i32
    }
}

/// Trait for extracting instruction fields from encoded instructions.
///
/// Every 32-bit value decodes; no method fails.
pub trait InstructionBits {
    /// Raw opcode field: the word arithmetically shifted right by 22.
    ///
    /// Values outside `0..=7` are unrecognised opcodes.
    fn opcode_raw(&self) -> i32;

    /// Decoded opcode, or `None` when the opcode field is unrecognised.
    fn opcode(&self) -> Option<Opcode>;

    /// Register-A field (bits 21-19).
    fn reg_a(&self) -> usize;

    /// Register-B field (bits 18-16).
    fn reg_b(&self) -> usize;

    /// Raw low 16-bit field (bits 15-0), unsigned.
    ///
    /// This is the destination register for `add`/`nor`.
    fn imm16(&self) -> u32;

    /// Low 16-bit field sign-extended to a machine word.
    ///
    /// This is the offset for `lw`/`sw`/`beq`.
    fn offset(&self) -> i32;
}

impl InstructionBits for i32 {
    #[inline(always)]
    fn opcode_raw(&self) -> i32 {
        self >> OPCODE_SHIFT
    }

    #[inline(always)]
    fn opcode(&self) -> Option<Opcode> {
        Opcode::from_raw(self.opcode_raw())
    }

    #[inline(always)]
    fn reg_a(&self) -> usize {
        ((self >> REG_A_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn reg_b(&self) -> usize {
        ((self >> REG_B_SHIFT) & REG_MASK) as usize
    }

    #[inline(always)]
    fn imm16(&self) -> u32 {
        (self & IMM_MASK) as u32
    }

    #[inline(always)]
    fn offset(&self) -> i32 {
        sign_extend_16(self.imm16())
    }
}

/// Instruction encoders.
///
/// Register arguments are masked to 3 bits and offsets to 16 bits, so any
/// argument produces a well-formed word.
pub mod encode {
    use super::{
        IMM_MASK, OP_ADD, OP_BEQ, OP_HALT, OP_JALR, OP_LW, OP_NOOP, OP_NOR, OP_SW, OPCODE_SHIFT,
        REG_A_SHIFT, REG_B_SHIFT, REG_MASK,
    };

    /// Packs an opcode, two register fields, and a 16-bit field into a word.
    #[inline]
    pub const fn word(opcode: i32, reg_a: u32, reg_b: u32, low: i32) -> i32 {
        (opcode << OPCODE_SHIFT)
            | (((reg_a as i32) & REG_MASK) << REG_A_SHIFT)
            | (((reg_b as i32) & REG_MASK) << REG_B_SHIFT)
            | (low & IMM_MASK)
    }

    /// `add reg_a reg_b dest`.
    pub const fn add(reg_a: u32, reg_b: u32, dest: u32) -> i32 {
        word(OP_ADD, reg_a, reg_b, dest as i32)
    }

    /// `nor reg_a reg_b dest`.
    pub const fn nor(reg_a: u32, reg_b: u32, dest: u32) -> i32 {
        word(OP_NOR, reg_a, reg_b, dest as i32)
    }

    /// `lw reg_a reg_b offset`: loads into `reg_b`.
    pub const fn lw(reg_a: u32, reg_b: u32, offset: i32) -> i32 {
        word(OP_LW, reg_a, reg_b, offset)
    }

    /// `sw reg_a reg_b offset`: stores `reg_b`.
    pub const fn sw(reg_a: u32, reg_b: u32, offset: i32) -> i32 {
        word(OP_SW, reg_a, reg_b, offset)
    }

    /// `beq reg_a reg_b offset`.
    pub const fn beq(reg_a: u32, reg_b: u32, offset: i32) -> i32 {
        word(OP_BEQ, reg_a, reg_b, offset)
    }

    /// `jalr reg_a reg_b`.
    pub const fn jalr(reg_a: u32, reg_b: u32) -> i32 {
        word(OP_JALR, reg_a, reg_b, 0)
    }

    /// `halt`.
    pub const fn halt() -> i32 {
        word(OP_HALT, 0, 0, 0)
    }

    /// `noop`.
    pub const fn noop() -> i32 {
        word(OP_NOOP, 0, 0, 0)
    }
}
