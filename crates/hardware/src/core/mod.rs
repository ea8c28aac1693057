//! Core processor implementation.
//!
//! This module contains the pipeline model: architectural storage, the
//! machine-state snapshot, the pipeline latches and stages, and the
//! execution units the stages drive.

/// Architectural storage (word-addressed memory).
pub mod arch;

/// Instruction pipeline implementation (stages, latches, hazards).
pub mod pipeline;

/// Machine-state snapshot.
pub mod state;

/// Execution units (ALU, branch resolution).
pub mod units;

pub use self::state::MachineState;
