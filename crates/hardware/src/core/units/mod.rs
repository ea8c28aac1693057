//! Execution units.
//!
//! This module contains the functional units driven by the execute stage:
//! the integer ALU and the branch resolution unit.

/// Arithmetic Logic Unit for `add`, `nor` and address generation.
pub mod alu;

/// Branch Resolution Unit for `beq` evaluation and fetch redirects.
pub mod bru;
