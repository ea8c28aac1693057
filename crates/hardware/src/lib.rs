//! LC-2K pipeline simulator library.
//!
//! This crate implements a cycle-accurate five-stage pipeline for the LC-2K
//! instruction set with the following:
//! 1. **Core:** Pipeline stages, latches, hazard resolution (forwarding and
//!    load-use stalls) and branch squashing over a double-buffered machine state.
//! 2. **ISA:** Field extraction, encoders and a disassembler for the eight opcodes.
//! 3. **Simulation:** Program loader, simulator driver and the state-dump reports.
//! 4. **Support:** Configuration and statistics collection.
//!
//! # Examples
//!
//! ```
//! use pipesim_core::isa::instruction::encode;
//! use pipesim_core::{Config, Program, Simulator};
//!
//! let program = Program::from_words(vec![
//!     encode::lw(0, 1, 4),
//!     encode::add(1, 1, 2),
//!     encode::noop(),
//!     encode::halt(),
//!     21,
//! ])
//! .unwrap();
//! let mut sim = Simulator::new(&program, &Config::default());
//! sim.run().unwrap();
//! assert_eq!(sim.state().regs.read(2), 42);
//! ```

/// Common types and constants (machine sizes, errors, register file).
pub mod common;
/// Simulator configuration (output settings, forwarding policy).
pub mod config;
/// Pipeline core (state, latches, hazards, stages, units).
pub mod core;
/// Instruction set (opcodes, field extraction, encoders, disassembler).
pub mod isa;
/// Loader, simulator and reports.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or parse from JSON.
pub use crate::config::Config;
/// Machine-state snapshot.
pub use crate::core::MachineState;
/// Loaded program image.
pub use crate::sim::loader::Program;
/// Cycle simulator.
pub use crate::sim::simulator::Simulator;
/// Run statistics.
pub use crate::stats::SimStats;
