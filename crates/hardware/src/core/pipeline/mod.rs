//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Hazards:** Detection of load-use hazards and selection of forwarding paths.
//! 2. **Latches:** Inter-stage buffers for communication between pipeline stages.
//! 3. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.
//! 4. **Traits:** Common interface for pipeline latches.

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Inter-stage pipeline latches (IF/ID, ID/EX, EX/MEM, MEM/WB, WB/END).
pub mod latches;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

/// Traits for pipeline latches.
pub mod traits;
