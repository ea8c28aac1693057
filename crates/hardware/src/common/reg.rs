//! General-Purpose Register File.
//!
//! This module provides the `RegisterFile` struct holding the eight architectural
//! registers. It provides:
//! 1. **Storage:** Eight signed 32-bit registers, all writable (no hard-wired zero).
//! 2. **Access:** Indexed reads and writes used by decode and writeback.
//! 3. **Observability:** Iteration for state dumps and test assertions.

use crate::common::constants::NUM_REGS;

/// Architectural register file.
///
/// Register indices come from 3-bit instruction fields, so every decoded
/// index is in range. Writes with an index outside the file are rejected by
/// [`RegisterFile::write`] rather than panicking.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [i32; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register set to zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7). Out-of-range indices read as zero.
    pub fn read(&self, idx: usize) -> i32 {
        self.regs.get(idx).copied().unwrap_or(0)
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-7).
    /// * `val` - Value to store.
    ///
    /// # Returns
    ///
    /// `false` if `idx` does not name a register, in which case nothing is written.
    pub const fn write(&mut self, idx: usize, val: i32) -> bool {
        if idx < NUM_REGS {
            self.regs[idx] = val;
            true
        } else {
            false
        }
    }

    /// Iterates over the register values in index order.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.regs.iter().copied()
    }

    /// Returns the register values as an array.
    pub const fn as_array(&self) -> [i32; NUM_REGS] {
        self.regs
    }
}

impl From<[i32; NUM_REGS]> for RegisterFile {
    fn from(regs: [i32; NUM_REGS]) -> Self {
        Self { regs }
    }
}
