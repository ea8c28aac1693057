//! Control Hazard Tests.
//!
//! Branches are predicted not-taken. A taken `beq` redirects fetch from
//! EX/MEM, squashing the two younger instructions in IF/ID and ID/EX; those
//! must never write a register or memory.

use pipesim_core::isa::instruction::encode::{add, beq, lw, noop, nor};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{ProgramBuilder, TestContext};

#[test]
fn taken_branch_squashes_two_younger_instructions() {
    let program = ProgramBuilder::new()
        .beq(0, 0, 2)
        .add(0, 0, 1)
        .nor(0, 0, 2)
        .lw(0, 3, 6)
        .halt()
        .noop()
        .fill(9)
        .build();
    let mut ctx = TestContext::new(&program);

    assert_eq!(ctx.run(), 9);
    assert_eq!(ctx.regs(), [0, 0, 0, 9, 0, 0, 0, 0]);
    assert_eq!(ctx.stats().instructions_squashed, 2);
}

#[test]
fn redirect_replaces_front_end_with_bubbles() {
    let program = ProgramBuilder::new()
        .beq(0, 0, 2)
        .add(0, 0, 1)
        .nor(0, 0, 2)
        .lw(0, 3, 6)
        .halt()
        .noop()
        .fill(9)
        .build();
    let mut ctx = TestContext::new(&program);
    let snapshots = ctx.run_traced();

    let before = &snapshots[3];
    assert_eq!(before.latches.ex_mem.instr, beq(0, 0, 2));
    assert!(before.latches.ex_mem.eq);
    assert_eq!(before.latches.ex_mem.branch_target, 3);
    assert_eq!(before.latches.id_ex.instr, add(0, 0, 1));
    assert_eq!(before.latches.if_id.instr, nor(0, 0, 2));

    let after = &snapshots[4];
    assert_eq!(after.pc, 3);
    assert_eq!(after.latches.if_id.instr, noop());
    assert_eq!(after.latches.if_id.pc_plus1, 4);
    assert_eq!(after.latches.id_ex.instr, noop());
    assert_eq!(after.latches.ex_mem.instr, noop());
    assert_eq!(after.latches.mem_wb.instr, beq(0, 0, 2));

    // The target is fetched on the following cycle.
    assert_eq!(snapshots[5].latches.if_id.instr, lw(0, 3, 6));
    assert_eq!(snapshots[5].pc, 4);
}

#[test]
fn not_taken_branch_runs_fall_through_path() {
    let program = ProgramBuilder::new()
        .lw(0, 1, 7)
        .beq(0, 1, 2)
        .nor(0, 0, 2)
        .nor(0, 0, 3)
        .halt()
        .noops(2)
        .fill(1)
        .build();
    let mut ctx = TestContext::new(&program);

    assert_eq!(ctx.run(), 9);
    assert_eq!(ctx.regs(), [0, 1, -1, -1, 0, 0, 0, 0]);
    assert_eq!(ctx.stats().branches_taken, 0);
    assert_eq!(ctx.stats().instructions_squashed, 0);
    // beq waited one cycle for the loaded r1.
    assert_eq!(ctx.stats().stalls_load_use, 1);
}

#[test]
fn squashed_store_never_writes_memory() {
    let program = ProgramBuilder::new()
        .lw(0, 1, 9)
        .noops(3)
        .beq(1, 1, 2)
        .sw(0, 1, 10)
        .add(1, 1, 2)
        .halt()
        .noop()
        .fill(6)
        .fill(0)
        .build();
    let mut ctx = TestContext::new(&program);

    assert_eq!(ctx.run(), 12);
    assert_eq!(ctx.mem(10), 0);
    assert_eq!(ctx.reg(1), 6);
    assert_eq!(ctx.reg(2), 0);
}

#[rstest]
#[case::taken(beq(2, 2, 1), 13, 0)]
#[case::not_taken(beq(2, 1, 1), 11, -1)]
fn branch_operands_are_forwarded(#[case] branch: i32, #[case] cycles: u32, #[case] r3: i32) {
    let program = ProgramBuilder::new()
        .lw(0, 1, 8)
        .noops(3)
        .add(1, 1, 2)
        .word(branch)
        .nor(0, 0, 3)
        .halt()
        .fill(5)
        .build();
    let mut ctx = TestContext::new(&program);

    assert_eq!(ctx.run(), cycles);
    assert_eq!(ctx.reg(2), 10);
    assert_eq!(ctx.reg(3), r3);
}

#[test]
fn backward_branch_loop() {
    // r3 = r1 + r1 via a counted loop: r2 counts down from 2 to 0.
    let program = ProgramBuilder::new()
        .lw(0, 1, 8)
        .lw(0, 2, 9)
        .add(3, 1, 3)
        .nor(0, 0, 4)
        .add(2, 4, 2)
        .beq(2, 0, 1)
        .beq(0, 0, -5)
        .halt()
        .fill(3)
        .fill(2)
        .build();
    let mut ctx = TestContext::new(&program);

    assert_eq!(ctx.run(), 21);
    assert_eq!(ctx.regs(), [0, 3, 0, 6, -1, 0, 0, 0]);
    assert_eq!(ctx.stats().branches_taken, 2);
    assert_eq!(ctx.stats().inst_branch, 3);
}
