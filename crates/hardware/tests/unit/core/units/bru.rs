//! Branch Unit Tests.

use pipesim_core::core::pipeline::latches::ExMem;
use pipesim_core::core::units::bru::{self, BranchOutcome};
use pipesim_core::isa::instruction::encode::{beq, noop};
use rstest::rstest;

#[rstest]
#[case(1, 2, 5, 5, BranchOutcome { target: 3, taken: true })]
#[case(7, -5, 0, 1, BranchOutcome { target: 2, taken: false })]
#[case(i32::MAX, 1, -1, -1, BranchOutcome { target: i32::MIN, taken: true })]
fn evaluate_target_and_condition(
    #[case] pc_plus1: i32,
    #[case] offset: i32,
    #[case] a: i32,
    #[case] b: i32,
    #[case] expected: BranchOutcome,
) {
    assert_eq!(bru::evaluate(pc_plus1, offset, a, b), expected);
}

#[test]
fn redirect_only_for_taken_beq() {
    let taken = ExMem {
        instr: beq(1, 1, 4),
        eq: true,
        branch_target: 12,
        ..ExMem::default()
    };
    assert_eq!(bru::redirect(&taken), Some(12));

    let not_taken = ExMem { eq: false, ..taken };
    assert_eq!(bru::redirect(&not_taken), None);

    // A squashed branch keeps its flag but is now a no-op.
    let squashed = ExMem {
        instr: noop(),
        ..taken
    };
    assert_eq!(bru::redirect(&squashed), None);
}
