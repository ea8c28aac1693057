//! Simulator: owns the current and next machine states side-by-side.
//!
//! Each cycle copies the current state into the next buffer, lets every stage
//! read the current state and write the next one, then swaps the two buffers.
//! No stage observes a value produced in the same cycle, and a failing cycle
//! leaves the current state untouched.

use std::mem;

use tracing::{debug, info, trace};

use crate::common::error::SimError;
use crate::config::{Config, LoadConsumerForwarding};
use crate::core::pipeline::stages::{
    DecodeOutcome, decode_stage, execute_stage, fetch_stage, mem_stage, wb_stage,
};
use crate::core::pipeline::traits::PipelineLatch;
use crate::core::state::MachineState;
use crate::core::units::bru;
use crate::isa::opcodes::Opcode;
use crate::sim::loader::Program;
use crate::stats::SimStats;

/// Result of a call to [`Simulator::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleStatus {
    /// A cycle was executed.
    Running,
    /// The halt instruction is in MEM/WB; no cycle was executed.
    Halted,
}

/// A snapshot handed to the observer of [`Simulator::run_with`].
#[derive(Clone, Copy, Debug)]
pub enum Checkpoint<'a> {
    /// The state before a cycle starts.
    BeforeCycle(&'a MachineState),
    /// The final state once the machine has halted.
    Halted(&'a MachineState),
}

/// Top-level simulator: double-buffered machine state plus statistics.
#[derive(Debug)]
pub struct Simulator {
    current: MachineState,
    next: MachineState,
    policy: LoadConsumerForwarding,
    max_cycles: Option<u32>,
    stats: SimStats,
}

impl Simulator {
    /// Creates a simulator in the reset state for `program`.
    pub fn new(program: &Program, config: &Config) -> Self {
        let current = MachineState::boot(program);
        let next = current.clone();
        Self {
            current,
            next,
            policy: config.pipeline.load_consumer_forwarding,
            max_cycles: config.general.max_cycles,
            stats: SimStats::default(),
        }
    }

    /// The committed machine state.
    pub const fn state(&self) -> &MachineState {
        &self.current
    }

    /// Statistics for the cycles executed so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Whether the halt instruction has reached MEM/WB.
    pub fn is_halted(&self) -> bool {
        self.current.latches.mem_wb.opcode() == Some(Opcode::Halt)
    }

    /// Advances the machine by one clock cycle.
    ///
    /// # Returns
    ///
    /// `CycleStatus::Halted` without doing anything once halted, otherwise
    /// `CycleStatus::Running`.
    ///
    /// # Errors
    ///
    /// A fetch or data access outside memory, or reaching `max_cycles`. The
    /// committed state is unchanged.
    pub fn step(&mut self) -> Result<CycleStatus, SimError> {
        if self.is_halted() {
            return Ok(CycleStatus::Halted);
        }
        if let Some(limit) = self.max_cycles.filter(|&l| self.current.cycles >= l) {
            return Err(SimError::CycleLimit { limit });
        }

        let cur = &self.current;
        let next = &mut self.next;
        next.clone_from(cur);
        next.cycles += 1;

        let mut stats = self.stats.clone();
        let redirect = bru::redirect(&cur.latches.ex_mem);
        if let Some(target) = redirect {
            let squashed = [cur.latches.if_id.opcode(), cur.latches.id_ex.opcode()]
                .into_iter()
                .filter(|&op| op != Some(Opcode::Noop))
                .count();
            debug!(cycle = cur.cycles, target, squashed, "redirect");
            stats.branches_taken += 1;
            stats.instructions_squashed += squashed as u64;
        }

        // A stalled decode holds pc and IF/ID, so fetch does not run.
        let decode = decode_stage(cur, next, redirect.is_some(), self.policy, &mut stats);
        if decode != DecodeOutcome::Stalled {
            fetch_stage(cur, next, redirect)?;
        }
        execute_stage(cur, next, redirect.is_some());
        mem_stage(cur, next)?;
        wb_stage(cur, next, &mut stats);

        if decode == DecodeOutcome::Stalled {
            debug!(cycle = cur.cycles, pc = cur.pc, "decode stalled");
        }
        trace!(
            cycle = cur.cycles,
            pc = next.pc,
            latches = ?next.latches.instructions(),
            "cycle committed"
        );

        stats.cycles = u64::from(next.cycles);
        self.stats = stats;
        mem::swap(&mut self.current, &mut self.next);
        Ok(CycleStatus::Running)
    }

    /// Runs until the machine halts.
    ///
    /// # Returns
    ///
    /// The number of cycles executed.
    ///
    /// # Errors
    ///
    /// Any error from [`Simulator::step`].
    pub fn run(&mut self) -> Result<u32, SimError> {
        self.run_with(|_| {})
    }

    /// Runs until the machine halts, showing every snapshot to `observer`.
    ///
    /// The observer sees `Checkpoint::BeforeCycle` before each executed cycle
    /// and `Checkpoint::Halted` once at the end.
    ///
    /// # Returns
    ///
    /// The number of cycles executed.
    ///
    /// # Errors
    ///
    /// Any error from [`Simulator::step`]. The observer has seen the state
    /// the failing cycle started from.
    pub fn run_with<F>(&mut self, mut observer: F) -> Result<u32, SimError>
    where
        F: FnMut(Checkpoint<'_>),
    {
        while !self.is_halted() {
            observer(Checkpoint::BeforeCycle(&self.current));
            let _ = self.step()?;
        }
        info!(cycles = self.current.cycles, "machine halted");
        observer(Checkpoint::Halted(&self.current));
        Ok(self.current.cycles)
    }
}
