//! Pipeline Latch Interface.
//!
//! This module defines the common trait for pipeline latches. It provides:
//! 1. **Occupancy:** Access to the instruction word occupying the latch.
//! 2. **Squashing:** Replacing the occupant with a bubble.

use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::Opcode;

/// Represents a pipeline latch (inter-stage buffer).
///
/// Latches hold exactly one instruction each. Squashing replaces the
/// instruction with the canonical no-op and leaves the other fields as they
/// were, so a squashed latch still shows its previous data values.
pub trait PipelineLatch {
    /// Instruction word occupying the latch.
    fn instruction(&self) -> i32;

    /// Replaces the occupant with a bubble.
    ///
    /// Called when a taken branch discards wrong-path instructions or a
    /// load-use stall inserts a bubble.
    fn squash(&mut self);

    /// Decoded opcode of the occupant, `None` when unrecognised.
    fn opcode(&self) -> Option<Opcode> {
        self.instruction().opcode()
    }
}
