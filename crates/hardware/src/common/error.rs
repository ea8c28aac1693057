//! Error definitions.
//!
//! This module defines the error types surfaced by the simulator. It provides:
//! 1. **Load Errors:** Failures while reading or parsing a program image.
//! 2. **Simulation Errors:** Accesses outside the architected memory during a cycle.
//! 3. **Configuration Errors:** Failures while reading or deserializing a JSON configuration.
//!
//! The cycle engine itself is total over well-formed state; the only runtime
//! failures it reports are the memory accesses whose architectural behavior is
//! undefined.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The program file could not be opened or read.
    #[error("can't open file {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A line did not parse as a decimal 32-bit word.
    ///
    /// `line` is the instruction-memory address the line would have been loaded at.
    #[error("error in reading address {line}: {text:?} is not a 32-bit decimal word")]
    Parse {
        /// Address (0-based line index) of the offending line.
        line: usize,
        /// Raw text of the offending line.
        text: String,
    },

    /// The image holds more words than instruction memory.
    #[error("program has {count} words but memory holds only {capacity}")]
    TooLarge {
        /// Number of words in the image.
        count: usize,
        /// Memory capacity in words.
        capacity: usize,
    },
}

/// Errors raised by a simulation cycle.
///
/// When a cycle fails, none of its stage updates are committed; the machine
/// state observed through the simulator is the one from before the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// The program counter left instruction memory.
    #[error("instruction fetch at pc {pc} is outside memory (cycle {cycle})")]
    FetchOutOfRange {
        /// Program counter value that was fetched.
        pc: i32,
        /// Cycle number during which the fetch happened.
        cycle: u32,
    },

    /// A load or store computed an effective address outside data memory.
    #[error("data memory access at address {addr} is outside memory (cycle {cycle})")]
    DataAddressOutOfRange {
        /// Effective address produced by the execute stage.
        addr: i32,
        /// Cycle number during which the access happened.
        cycle: u32,
    },

    /// The run reached the configured cycle limit before halting.
    #[error("no halt after {limit} cycles")]
    CycleLimit {
        /// Configured `max_cycles`.
        limit: u32,
    },
}

/// Errors raised while reading a simulator configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("can't read config {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The configuration text is not valid for [`Config`](crate::config::Config).
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}
