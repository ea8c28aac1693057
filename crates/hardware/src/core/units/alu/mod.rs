//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer ALU used in the Execute stage. The
//! machine has only two arithmetic operations (`add`, `nor`) plus the
//! effective-address computation shared by `lw` and `sw`. All arithmetic
//! wraps on 32-bit overflow.

use crate::isa::opcodes::Opcode;

/// Arithmetic Logic Unit (ALU) for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes the ALU operation selected by `op`.
    ///
    /// # Arguments
    ///
    /// * `op`     - Opcode of the instruction in execute
    /// * `a`      - Hazard-resolved register-A operand
    /// * `b`      - Hazard-resolved register-B operand
    /// * `offset` - Sign-extended 16-bit field
    ///
    /// # Returns
    ///
    /// The ALU result, or `None` for opcodes that perform no ALU computation
    /// (`beq`, `jalr`, `halt`, `noop`), in which case EX/MEM keeps its
    /// previous `alu_result`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pipesim_core::core::units::alu::Alu;
    /// use pipesim_core::isa::Opcode;
    ///
    /// assert_eq!(Alu::execute(Opcode::Add, 3, 4, 0), Some(7));
    /// assert_eq!(Alu::execute(Opcode::Nor, 0, 0, 0), Some(-1));
    /// assert_eq!(Alu::execute(Opcode::Lw, 10, 0, -2), Some(8));
    /// assert_eq!(Alu::execute(Opcode::Beq, 1, 1, 0), None);
    /// ```
    #[inline]
    pub const fn execute(op: Opcode, a: i32, b: i32, offset: i32) -> Option<i32> {
        match op {
            Opcode::Add => Some(a.wrapping_add(b)),
            Opcode::Nor => Some(!(a | b)),
            Opcode::Lw | Opcode::Sw => Some(a.wrapping_add(offset)),
            Opcode::Beq | Opcode::Jalr | Opcode::Halt | Opcode::Noop => None,
        }
    }
}
