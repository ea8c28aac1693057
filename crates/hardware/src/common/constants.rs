//! Global Machine Constants.
//!
//! This module defines the machine-wide constants used across the simulator. It includes:
//! 1. **Machine Constants:** Memory size and register count.
//! 2. **Instruction Constants:** Field shifts and masks for instruction decoding.
//! 3. **Pipeline Constants:** The canonical bubble encoding and hazard window depth.

/// Number of words in instruction memory and in data memory.
pub const NUM_MEMORY: usize = 65536;

/// Number of general-purpose registers.
pub const NUM_REGS: usize = 8;

/// Right shift that brings the opcode field to the bottom of the word.
pub const OPCODE_SHIFT: u32 = 22;

/// Bit position shift for the register-A field.
pub const REG_A_SHIFT: u32 = 19;

/// Bit position shift for the register-B field.
pub const REG_B_SHIFT: u32 = 16;

/// Bit mask for extracting a register field after shifting.
pub const REG_MASK: i32 = 0x7;

/// Bit mask for the low 16-bit field (destination register or offset).
pub const IMM_MASK: i32 = 0xFFFF;

/// Sign bit of the 16-bit offset field.
pub const IMM_SIGN_BIT: u32 = 1 << 15;

/// Canonical no-op instruction word (`noop` with zero fields).
///
/// Every empty, squashed, or stalled latch holds this encoding.
pub const NOOP_INSTRUCTION: i32 = 7 << OPCODE_SHIFT;

/// Number of previously decoded instructions inspected by the hazard resolver.
pub const HAZARD_WINDOW_DEPTH: usize = 3;
