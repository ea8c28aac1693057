//! LC-2K architectural storage.
//!
//! This module contains the storage elements that make up architectural state
//! besides the register file (see [`crate::common::reg`]):
//! 1. **Memory:** The flat word-addressed array backing instruction and data memory.

/// Word-addressed memory.
pub mod memory;

pub use memory::WordMemory;
