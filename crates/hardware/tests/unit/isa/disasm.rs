//! Disassembler Tests.

use pipesim_core::isa::disasm::disassemble;
use pipesim_core::isa::instruction::encode;
use rstest::rstest;

#[rstest]
#[case(encode::add(1, 2, 3), "add 1 2 3")]
#[case(encode::nor(7, 0, 5), "nor 7 0 5")]
#[case(encode::lw(0, 1, 13), "lw 0 1 13")]
#[case(encode::sw(5, 6, -1), "sw 5 6 -1")]
#[case(encode::beq(2, 2, -32768), "beq 2 2 -32768")]
#[case(encode::jalr(4, 7), "jalr 4 7")]
#[case(encode::halt(), "halt")]
#[case(encode::noop(), "noop")]
#[case(0, "add 0 0 0")]
fn every_opcode(#[case] word: i32, #[case] text: &str) {
    assert_eq!(disassemble(word), text);
}

#[rstest]
#[case(1 << 25, ".fill 33554432")]
#[case(-1, ".fill -1")]
#[case(i32::MAX, ".fill 2147483647")]
fn unrecognised_opcodes_render_as_fill(#[case] word: i32, #[case] text: &str) {
    assert_eq!(disassemble(word), text);
}

#[test]
fn add_destination_shows_full_low_field() {
    // The 16-bit field of add is shown sign-extended like any offset.
    assert_eq!(disassemble(encode::word(0, 1, 1, 0xFFFF)), "add 1 1 -1");
}
