//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for maintaining pipeline consistency when data
//! dependencies exist between instructions. It provides:
//! 1. **Hazard Window:** The three instructions decoded ahead of the one now in decode.
//! 2. **Hazard Detection:** Identifies load-use hazards that require a one-cycle stall.
//! 3. **Operand Forwarding:** Tags each operand with the latch its value must be taken
//!    from, and selects the value at execute time.
//!
//! Each operand is resolved by scanning the window nearest-first and stopping at the
//! first producer whose destination matches, so the most recent producer always wins.

use tracing::debug;

use crate::common::constants::HAZARD_WINDOW_DEPTH;
use crate::config::LoadConsumerForwarding;
use crate::core::pipeline::latches::{HazardSource, IdEx, Latches, OperandHazards};
use crate::isa::instruction::InstructionBits;
use crate::isa::opcodes::Opcode;

/// How a window entry produces a register value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProducerKind {
    /// `add`/`nor`: value exists once execute has run.
    Arithmetic,
    /// `lw`: value exists only once memory has run.
    Load,
}

/// A register write performed by a window entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Producer {
    /// Destination register index.
    ///
    /// For `add`/`nor` this is the full 16-bit field, so values of 8 and above
    /// name no register and never match an operand.
    pub dest: usize,
    /// Kind of producer.
    pub kind: ProducerKind,
}

/// One instruction of the hazard window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowEntry {
    word: i32,
}

impl WindowEntry {
    /// Wraps an instruction word.
    pub const fn new(word: i32) -> Self {
        Self { word }
    }

    /// The instruction word.
    pub const fn word(self) -> i32 {
        self.word
    }

    /// Register write this entry will perform, if any.
    ///
    /// Stores, branches, `jalr`, `halt`, `noop` and unrecognised opcodes
    /// produce nothing.
    pub fn produces(self) -> Option<Producer> {
        match self.word.opcode()? {
            op if op.is_arithmetic() => Some(Producer {
                dest: self.word.imm16() as usize,
                kind: ProducerKind::Arithmetic,
            }),
            Opcode::Lw => Some(Producer {
                dest: self.word.reg_b(),
                kind: ProducerKind::Load,
            }),
            _ => None,
        }
    }
}

/// The instructions one, two and three decode-cycles ahead of the one in decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HazardWindow {
    entries: [WindowEntry; HAZARD_WINDOW_DEPTH],
}

impl HazardWindow {
    /// Builds the window from the current latches, nearest first.
    ///
    /// The instruction about to enter execute sits in ID/EX, the one about to
    /// enter memory in EX/MEM, and the one about to commit in MEM/WB. Stall
    /// bubbles and squashed instructions are no-ops in those latches, so they
    /// take part in the scan as non-producers.
    pub fn capture(latches: &Latches) -> Self {
        Self::from_words([
            latches.id_ex.instr,
            latches.ex_mem.instr,
            latches.mem_wb.instr,
        ])
    }

    /// Builds a window from raw words, nearest first.
    pub fn from_words(words: [i32; HAZARD_WINDOW_DEPTH]) -> Self {
        Self {
            entries: words.map(WindowEntry::new),
        }
    }

    /// Window entries, nearest first.
    pub const fn entries(&self) -> &[WindowEntry; HAZARD_WINDOW_DEPTH] {
        &self.entries
    }
}

/// Outcome of resolving an instruction in decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A load one cycle ahead produces a needed operand.
    ///
    /// Carries the forwarding tags already found deeper in the window when
    /// the hazard was detected; the inserted bubble latches them.
    Stall(OperandHazards),
    /// The instruction proceeds to execute with these forwarding tags.
    Proceed(OperandHazards),
}

/// Registers an instruction reads, as `(reg_a, reg_b)` flags.
///
/// `add`, `nor`, `sw` and `beq` read both; `lw` reads only register A.
pub fn operand_needs(word: i32) -> (bool, bool) {
    match word.opcode() {
        Some(Opcode::Add | Opcode::Nor | Opcode::Sw | Opcode::Beq) => (true, true),
        Some(Opcode::Lw) => (true, false),
        _ => (false, false),
    }
}

enum OperandScan {
    Register,
    Forward(HazardSource),
    LoadUse,
}

fn scan_operand(
    reg: usize,
    window: &HazardWindow,
    first: usize,
    consumer_is_load: bool,
    policy: LoadConsumerForwarding,
) -> OperandScan {
    for (pos, entry) in window.entries().iter().enumerate().skip(first) {
        let Some(producer) = entry.produces() else {
            continue;
        };
        if producer.dest != reg {
            continue;
        }
        match producer.kind {
            ProducerKind::Load if pos == 0 => return OperandScan::LoadUse,
            ProducerKind::Arithmetic
                if consumer_is_load
                    && pos == HAZARD_WINDOW_DEPTH - 1
                    && policy == LoadConsumerForwarding::Legacy =>
            {
                continue;
            }
            _ => {}
        }
        if let Some(source) = HazardSource::from_window_position(pos) {
            return OperandScan::Forward(source);
        }
    }
    OperandScan::Register
}

/// Resolves the operands of `consumer` against `window`.
///
/// # Arguments
///
/// * `consumer` - Instruction word in decode (the current IF/ID instruction).
/// * `window` - Instructions decoded in the three previous cycles.
/// * `policy` - Whether `lw` consumers may forward from an arithmetic producer
///   three cycles ahead.
///
/// # Returns
///
/// `Resolution::Stall` when a load one cycle ahead writes a needed register,
/// otherwise the forwarding tag (or `None` for a register-file read) of each operand.
pub fn resolve(consumer: i32, window: &HazardWindow, policy: LoadConsumerForwarding) -> Resolution {
    let (needs_a, needs_b) = operand_needs(consumer);
    let consumer_is_load = consumer.opcode() == Some(Opcode::Lw);
    let regs = [(needs_a, consumer.reg_a()), (needs_b, consumer.reg_b())];

    let mut tags = [None; 2];
    let mut stall = false;
    for (slot, &(needed, reg)) in regs.iter().enumerate() {
        if !needed {
            continue;
        }
        match scan_operand(reg, window, 0, consumer_is_load, policy) {
            OperandScan::Register => {}
            OperandScan::Forward(source) => tags[slot] = Some(source),
            OperandScan::LoadUse => {
                stall = true;
                break;
            }
        }
    }

    if stall {
        // The bubble keeps whatever the scan found below the stalling load.
        for (tag, &(needed, reg)) in tags.iter_mut().zip(&regs) {
            let scan = scan_operand(reg, window, 1, consumer_is_load, policy);
            *tag = match (needed, scan) {
                (true, OperandScan::Forward(source)) => Some(source),
                _ => None,
            };
        }
        let hazards = OperandHazards {
            a: tags[0],
            b: tags[1],
        };
        debug!(
            consumer,
            a = hazards.a.map(HazardSource::name),
            b = hazards.b.map(HazardSource::name),
            "load-use hazard, stalling decode"
        );
        return Resolution::Stall(hazards);
    }

    let hazards = OperandHazards {
        a: tags[0],
        b: tags[1],
    };
    if hazards != OperandHazards::NONE {
        debug!(
            consumer,
            a = hazards.a.map(HazardSource::name),
            b = hazards.b.map(HazardSource::name),
            "operands forwarded"
        );
    }
    Resolution::Proceed(hazards)
}

/// Selects the operand values for the instruction in ID/EX.
///
/// Tagged operands are taken from the named latch of `latches` (the current
/// snapshot); untagged operands use the register values latched at decode.
///
/// # Returns
///
/// A tuple `(val_a, val_b)` of hazard-resolved operands.
pub fn forward_operands(id_ex: &IdEx, latches: &Latches) -> (i32, i32) {
    let pick = |tag: Option<HazardSource>, latched: i32| match tag {
        None => latched,
        Some(HazardSource::ExMem) => latches.ex_mem.alu_result,
        Some(HazardSource::MemWb) => latches.mem_wb.write_data,
        Some(HazardSource::WbEnd) => latches.wb_end.write_data,
    };
    (
        pick(id_ex.hazards.a, id_ex.val_a),
        pick(id_ex.hazards.b, id_ex.val_b),
    )
}
