//! Simulator Driver Tests.
//!
//! Whole-program behavior: halting, the snapshots handed to observers, and
//! the architectural results of memory round trips.

use pipesim_core::config::Config;
use pipesim_core::isa::instruction::encode::{halt, nor, sw};
use pipesim_core::sim::{Checkpoint, CycleStatus};
use pipesim_core::{MachineState, Program, Simulator};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{ProgramBuilder, TestContext};

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(10)]
fn noop_program_fills_pipeline_then_halts(#[case] noops: usize) {
    let program = ProgramBuilder::new().noops(noops).halt().build();
    let mut ctx = TestContext::new(&program);
    let snapshots = ctx.run_traced();

    // Four cycles bring halt from fetch to MEM/WB; the observer also sees
    // the final halted state.
    assert_eq!(ctx.cycles() as usize, noops + 4);
    assert_eq!(snapshots.len(), noops + 5);
    assert_eq!(ctx.regs(), [0; 8]);
    assert_eq!(ctx.state().loaded_data(), program.words());
}

#[test]
fn halt_in_mem_wb_stops_before_its_cycle() {
    let program = ProgramBuilder::new().halt().build();
    let mut sim = Simulator::new(&program, &Config::default());

    for _ in 0..4 {
        assert!(!sim.is_halted());
        assert_eq!(sim.step().unwrap(), CycleStatus::Running);
    }
    assert!(sim.is_halted());
    assert_eq!(sim.state().latches.mem_wb.instr, halt());

    let frozen = sim.state().clone();
    assert_eq!(sim.step().unwrap(), CycleStatus::Halted);
    assert_eq!(sim.state(), &frozen);
    assert_eq!(sim.run().unwrap(), 4);
}

#[test]
fn words_after_halt_never_commit() {
    let program = ProgramBuilder::new()
        .halt()
        .nor(0, 0, 1)
        .sw(0, 0, 5)
        .nor(0, 0, 2)
        .build();
    let mut ctx = TestContext::new(&program);

    assert_eq!(ctx.run(), 4);
    assert_eq!(ctx.regs(), [0; 8]);
    assert_eq!(ctx.mem(5), 0);
    // The words behind halt are still in flight.
    assert_eq!(ctx.state().latches.ex_mem.instr, nor(0, 0, 1));
    assert_eq!(ctx.state().latches.id_ex.instr, sw(0, 0, 5));
}

#[test]
fn observer_sees_before_cycle_then_halted() {
    let program = ProgramBuilder::new().noops(2).halt().build();
    let mut sim = Simulator::new(&program, &Config::default());
    let mut seen = Vec::new();

    let cycles = sim
        .run_with(|checkpoint| {
            seen.push(match checkpoint {
                Checkpoint::BeforeCycle(state) => (false, state.cycles),
                Checkpoint::Halted(state) => (true, state.cycles),
            });
        })
        .unwrap();

    assert_eq!(cycles, 6);
    assert_eq!(
        seen,
        vec![
            (false, 0),
            (false, 1),
            (false, 2),
            (false, 3),
            (false, 4),
            (false, 5),
            (true, 6),
        ]
    );
}

#[test]
fn store_then_load_round_trips() {
    // The load directly follows the store and must see the stored value.
    let program = ProgramBuilder::new()
        .lw(0, 1, 5)
        .sw(0, 1, 6)
        .lw(0, 2, 6)
        .halt()
        .noop()
        .fill(33)
        .fill(0)
        .build();
    let mut ctx = TestContext::new(&program);

    assert_eq!(ctx.run(), 8);
    assert_eq!(ctx.mem(6), 33);
    assert_eq!(ctx.reg(2), 33);
}

#[test]
fn instruction_memory_is_not_written_by_stores() {
    let program = ProgramBuilder::new()
        .nor(0, 0, 1)
        .noops(3)
        .sw(0, 1, 0)
        .halt()
        .build();
    let mut ctx = TestContext::new(&program);
    let _ = ctx.run();

    assert_eq!(ctx.mem(0), -1);
    assert_eq!(ctx.state().instr_mem().read(0), Some(nor(0, 0, 1)));
}

#[test]
fn stepping_matches_running() {
    let image = include_str!("../../fixtures/back_loop.mc");
    let program = Program::parse(image).unwrap();

    let mut run = Simulator::new(&program, &Config::default());
    let _ = run.run().unwrap();

    let mut stepped = Simulator::new(&program, &Config::default());
    while stepped.step().unwrap() == CycleStatus::Running {}

    assert_eq!(stepped.state(), run.state());
    assert_eq!(stepped.stats(), run.stats());
}

#[test]
fn snapshots_are_independent_copies() {
    let image = include_str!("../../fixtures/fwd_chain.mc");
    let program = Program::parse(image).unwrap();
    let mut ctx = TestContext::new(&program);
    let snapshots: Vec<MachineState> = ctx.run_traced();

    assert_eq!(snapshots.len(), 17);
    for (cycle, state) in snapshots.iter().enumerate() {
        assert_eq!(state.cycles as usize, cycle);
    }
    assert_eq!(snapshots[0].regs.as_array(), [0; 8]);
    assert_eq!(ctx.regs(), [0, 5, 7, 12, 17, 29, 10, 10]);
}
