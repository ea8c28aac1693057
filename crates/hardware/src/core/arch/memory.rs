//! Word-Addressed Memory.
//!
//! This module provides `WordMemory`, the flat word-addressed store used for
//! both instruction memory and data memory. It provides:
//! 1. **Storage:** `NUM_MEMORY` signed 32-bit words, zero-initialised.
//! 2. **Checked Access:** Reads and writes that report out-of-range addresses
//!    instead of clamping or wrapping them.

use crate::common::constants::NUM_MEMORY;

/// Flat memory of `NUM_MEMORY` signed words.
#[derive(PartialEq, Eq)]
pub struct WordMemory {
    words: Box<[i32]>,
}

impl WordMemory {
    /// Creates a zero-filled memory.
    pub fn new() -> Self {
        Self {
            words: vec![0; NUM_MEMORY].into_boxed_slice(),
        }
    }

    /// Creates a memory whose first cells hold `image`; the rest are zero.
    ///
    /// Words beyond `NUM_MEMORY` are ignored; the loader rejects such images
    /// before they get here.
    pub fn with_image(image: &[i32]) -> Self {
        let mut mem = Self::new();
        let len = image.len().min(NUM_MEMORY);
        mem.words[..len].copy_from_slice(&image[..len]);
        mem
    }

    /// Reads the word at `addr`.
    ///
    /// # Returns
    ///
    /// `None` if `addr` is negative or not below `NUM_MEMORY`.
    #[inline]
    pub fn read(&self, addr: i32) -> Option<i32> {
        let idx = usize::try_from(addr).ok()?;
        self.words.get(idx).copied()
    }

    /// Writes `val` at `addr`.
    ///
    /// # Returns
    ///
    /// `None` if `addr` is negative or not below `NUM_MEMORY`; memory is unchanged.
    #[inline]
    pub fn write(&mut self, addr: i32, val: i32) -> Option<()> {
        let idx = usize::try_from(addr).ok()?;
        let slot = self.words.get_mut(idx)?;
        *slot = val;
        Some(())
    }

    /// Returns the first `len` words (clamped to the memory size).
    pub fn prefix(&self, len: usize) -> &[i32] {
        &self.words[..len.min(NUM_MEMORY)]
    }

    /// Returns every word.
    pub fn as_slice(&self) -> &[i32] {
        &self.words
    }
}

impl Clone for WordMemory {
    fn clone(&self) -> Self {
        Self {
            words: self.words.clone(),
        }
    }

    // Reuses the existing allocation; the simulator copies data memory every cycle.
    fn clone_from(&mut self, source: &Self) {
        self.words.clone_from(&source.words);
    }
}

impl Default for WordMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WordMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self
            .words
            .iter()
            .rposition(|&w| w != 0)
            .map_or(0, |i| i + 1);
        f.debug_struct("WordMemory")
            .field("nonzero_prefix", &&self.words[..used])
            .finish()
    }
}
