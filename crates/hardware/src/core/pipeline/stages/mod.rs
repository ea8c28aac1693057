//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. Every stage reads only the current snapshot and writes
//! only the next one. It includes:
//! 1. **Fetch:** Reads the instruction at the PC, or follows a taken branch.
//! 2. **Decode:** Reads operands and resolves data hazards.
//! 3. **Execute:** Performs ALU operations and evaluates branches.
//! 4. **Memory:** Handles data load and store operations.
//! 5. **Writeback:** Commits results to the register file.

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::{DecodeOutcome, decode_stage};
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
