//! Instruction Disassembler for LC-2K.
//!
//! Converts a 32-bit instruction word into the assembly text used in state
//! dumps, program listings, and test diagnostics. The pipeline never consults
//! the disassembler.
//!
//! # Usage
//!
//! ```
//! use pipesim_core::isa::disasm::disassemble;
//! use pipesim_core::isa::instruction::encode;
//!
//! assert_eq!(disassemble(encode::lw(0, 1, -2)), "lw 0 1 -2");
//! assert_eq!(disassemble(100_000_000), ".fill 100000000");
//! ```

use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::Opcode;

/// Disassembles a 32-bit instruction word.
///
/// Register/offset instructions render as `"<op> <regA> <regB> <imm>"` where
/// the 16-bit field is shown sign-extended, `jalr` omits the 16-bit field,
/// `halt`/`noop` render as the bare mnemonic, and words with an unrecognised
/// opcode render as `".fill <word>"`.
pub fn disassemble(word: i32) -> String {
    match word.opcode() {
        Some(op @ (Opcode::Add | Opcode::Nor | Opcode::Lw | Opcode::Sw | Opcode::Beq)) => {
            format!("{} {} {} {}", op, word.reg_a(), word.reg_b(), word.offset())
        }
        Some(op @ Opcode::Jalr) => format!("{} {} {}", op, word.reg_a(), word.reg_b()),
        Some(op @ (Opcode::Halt | Opcode::Noop)) => op.mnemonic().to_string(),
        None => format!(".fill {word}"),
    }
}
