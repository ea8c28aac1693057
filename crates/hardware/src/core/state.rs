//! Machine State Snapshot.
//!
//! `MachineState` is everything the pipeline reads or writes in a cycle:
//! program counter, registers, both memories, the five latches and the
//! cycle counter. The simulator keeps two of them and builds the next one
//! from the current one, so a `MachineState` is also the read-only snapshot
//! handed to printers and observers.

use std::sync::Arc;

use crate::common::reg::RegisterFile;
use crate::core::arch::memory::WordMemory;
use crate::core::pipeline::latches::Latches;
use crate::sim::loader::Program;

/// Complete architectural and pipeline state of the machine.
#[derive(Debug, PartialEq, Eq)]
pub struct MachineState {
    /// Program counter: index of the next instruction to fetch.
    pub pc: i32,
    /// General-purpose registers.
    pub regs: RegisterFile,
    /// Data memory, initialised from the program image.
    pub data_mem: WordMemory,
    /// Number of words in the loaded image.
    pub num_memory: usize,
    /// Pipeline latches.
    pub latches: Latches,
    /// Cycles completed so far.
    pub cycles: u32,
    instr_mem: Arc<WordMemory>,
}

impl MachineState {
    /// Builds the reset state for `program`.
    ///
    /// Instruction memory and data memory both start as copies of the image
    /// (the rest zero); registers, pc and the cycle counter are zero and
    /// every latch holds a no-op.
    pub fn boot(program: &Program) -> Self {
        let image = WordMemory::with_image(program.words());
        Self {
            pc: 0,
            regs: RegisterFile::new(),
            data_mem: image.clone(),
            num_memory: program.len(),
            latches: Latches::default(),
            cycles: 0,
            instr_mem: Arc::new(image),
        }
    }

    /// Instruction memory. It is never written after boot.
    pub fn instr_mem(&self) -> &WordMemory {
        &self.instr_mem
    }

    /// The data memory cells covered by the loaded image.
    pub fn loaded_data(&self) -> &[i32] {
        self.data_mem.prefix(self.num_memory)
    }
}

impl Clone for MachineState {
    fn clone(&self) -> Self {
        Self {
            pc: self.pc,
            regs: self.regs.clone(),
            data_mem: self.data_mem.clone(),
            num_memory: self.num_memory,
            latches: self.latches,
            cycles: self.cycles,
            instr_mem: Arc::clone(&self.instr_mem),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.pc = source.pc;
        self.regs.clone_from(&source.regs);
        self.data_mem.clone_from(&source.data_mem);
        self.num_memory = source.num_memory;
        self.latches = source.latches;
        self.cycles = source.cycles;
        if !Arc::ptr_eq(&self.instr_mem, &source.instr_mem) {
            self.instr_mem = Arc::clone(&source.instr_mem);
        }
    }
}
