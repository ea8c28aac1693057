//! Simulation driver, program loading and reports.
//!
//! Provides the program loader, the cycle-by-cycle simulator and the
//! text reports of programs and machine state.

/// Program image loading.
pub mod loader;

/// Program listings, state dumps and halt trailers.
pub mod report;

/// Double-buffered cycle simulator.
pub mod simulator;

pub use loader::Program;
pub use simulator::{Checkpoint, CycleStatus, Simulator};
