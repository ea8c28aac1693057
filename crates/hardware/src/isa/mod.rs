//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the LC-2K opcode set, field extraction for 32-bit instruction
//! words, encoders, and the disassembler.
//!
//! The ISA has eight opcodes (`add`, `nor`, `lw`, `sw`, `beq`, `jalr`,
//! `halt`, `noop`), eight registers, and a single instruction format.

/// Instruction disassembler for state dumps and diagnostics.
pub mod disasm;

/// Instruction field extraction, sign extension, and encoders.
pub mod instruction;

/// Opcode values and the `Opcode` enum.
pub mod opcodes;

pub use instruction::{InstructionBits, encode, sign_extend_16};
pub use opcodes::Opcode;
