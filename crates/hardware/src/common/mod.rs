//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides fundamental building blocks that are shared across all components
//! of the simulator. It includes:
//! 1. **Constants:** Machine sizes, instruction field layout, and the bubble encoding.
//! 2. **Error Handling:** Load, simulation, and configuration error types.
//! 3. **Register Management:** The architectural register file.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for loading, configuration, and simulation.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use constants::{NOOP_INSTRUCTION, NUM_MEMORY, NUM_REGS};
pub use error::{ConfigError, LoadError, SimError};
pub use reg::RegisterFile;
