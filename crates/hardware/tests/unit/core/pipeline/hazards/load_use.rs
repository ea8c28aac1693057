//! Load-Use Hazard Detection Tests.
//!
//! Verifies that `resolve` stalls exactly when a `lw` one decode-cycle ahead
//! writes a register the instruction in decode reads, and that a stall holds
//! fetch and decode for one cycle while a bubble enters execute.

use pipesim_core::config::LoadConsumerForwarding::Complete;
use pipesim_core::core::pipeline::hazards::{HazardWindow, Resolution, resolve};
use pipesim_core::core::pipeline::latches::{HazardSource, OperandHazards};
use pipesim_core::isa::instruction::encode::{add, beq, halt, lw, noop, nor, sw};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{ProgramBuilder, TestContext};

const NOP: i32 = noop();

fn load_ahead(dest: u32) -> HazardWindow {
    HazardWindow::from_words([lw(0, dest, 0), NOP, NOP])
}

#[rstest]
#[case::add_reg_a(add(5, 0, 1))]
#[case::nor_reg_b(nor(0, 5, 1))]
#[case::lw_base(lw(5, 2, 3))]
#[case::sw_data(sw(0, 5, 3))]
#[case::sw_base(sw(5, 0, 3))]
#[case::beq_operand(beq(0, 5, -1))]
fn stall_when_load_feeds_a_read_operand(#[case] consumer: i32) {
    assert!(matches!(
        resolve(consumer, &load_ahead(5), Complete),
        Resolution::Stall(_)
    ));
}

#[rstest]
#[case::lw_register_b(lw(0, 5, 3))]
#[case::unrelated(add(1, 2, 5))]
#[case::noop(NOP)]
#[case::halt(halt())]
#[case::unrecognised(1 << 25)]
fn no_stall_when_loaded_register_is_not_read(#[case] consumer: i32) {
    assert!(matches!(
        resolve(consumer, &load_ahead(5), Complete),
        Resolution::Proceed(_)
    ));
}

#[test]
fn load_two_ahead_forwards_instead_of_stalling() {
    let window = HazardWindow::from_words([NOP, lw(0, 5, 0), NOP]);
    assert_eq!(
        resolve(add(5, 5, 1), &window, Complete),
        Resolution::Proceed(OperandHazards {
            a: Some(HazardSource::MemWb),
            b: Some(HazardSource::MemWb),
        })
    );
}

#[test]
fn load_one_ahead_stalls_despite_older_producer() {
    // The load is nearest, so it stalls even though an older add wrote r1 too.
    let window = HazardWindow::from_words([lw(0, 1, 0), add(0, 0, 1), NOP]);
    assert!(matches!(
        resolve(add(1, 0, 2), &window, Complete),
        Resolution::Stall(_)
    ));
}

#[test]
fn stall_keeps_tags_found_behind_the_load() {
    let window = HazardWindow::from_words([lw(0, 1, 0), add(0, 0, 2), add(0, 0, 1)]);
    assert_eq!(
        resolve(add(2, 1, 3), &window, Complete),
        Resolution::Stall(OperandHazards {
            a: Some(HazardSource::MemWb),
            b: Some(HazardSource::WbEnd),
        })
    );
}

#[test]
fn stall_holds_fetch_and_inserts_bubble() {
    let consumer = add(1, 1, 3);
    let program = ProgramBuilder::new()
        .lw(0, 1, 4)
        .word(consumer)
        .noop()
        .halt()
        .fill(21)
        .build();
    let mut ctx = TestContext::new(&program);
    let snapshots = ctx.run_traced();

    // Before cycle 2 the add is in decode with the load right ahead of it.
    assert_eq!(snapshots[2].pc, 2);
    assert_eq!(snapshots[2].latches.if_id.instr, consumer);
    assert_eq!(snapshots[2].latches.id_ex.instr, lw(0, 1, 4));

    // Cycle 2 stalled: same pc, same IF/ID, a bubble behind the load.
    let stalled = &snapshots[3];
    assert_eq!(stalled.pc, 2);
    assert_eq!(stalled.latches.if_id, snapshots[2].latches.if_id);
    assert_eq!(stalled.latches.id_ex.instr, NOP);
    assert_eq!(stalled.latches.ex_mem.instr, lw(0, 1, 4));

    // Cycle 3 issues the add with both operands taken from MEM/WB.
    let issued = &snapshots[4];
    assert_eq!(issued.pc, 3);
    assert_eq!(issued.latches.id_ex.instr, consumer);
    assert_eq!(
        issued.latches.id_ex.hazards,
        OperandHazards {
            a: Some(HazardSource::MemWb),
            b: Some(HazardSource::MemWb),
        }
    );
}

#[test]
fn load_use_costs_exactly_one_cycle() {
    let dependent = ProgramBuilder::new()
        .lw(0, 1, 4)
        .add(1, 1, 3)
        .noop()
        .halt()
        .fill(21)
        .build();
    let independent = ProgramBuilder::new()
        .lw(0, 1, 4)
        .add(2, 2, 3)
        .noop()
        .halt()
        .fill(21)
        .build();

    let mut dep = TestContext::new(&dependent);
    let mut indep = TestContext::new(&independent);

    assert_eq!(indep.run(), 7);
    assert_eq!(dep.run(), 8);
    assert_eq!(dep.reg(3), 42);
    assert_eq!(indep.reg(3), 0);
}

#[test]
fn load_feeding_load_base() {
    let program = ProgramBuilder::new()
        .lw(0, 1, 6)
        .lw(1, 2, 0)
        .noops(2)
        .halt()
        .noop()
        .fill(7)
        .fill(99)
        .build();
    let mut ctx = TestContext::new(&program);

    assert_eq!(ctx.run(), 9);
    assert_eq!(ctx.reg(1), 7);
    assert_eq!(ctx.reg(2), 99);
    assert_eq!(ctx.stats().stalls_load_use, 1);
}
