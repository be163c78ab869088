use crate::instructions::{Format, InstrDesc};
use crate::operand::{ImmKind, Shape};
use crate::Layout;

/// 18-bit balanced-ternary ISA, trits packed two bits each:
/// `opcode[17:12] | ra[11:8] | rb[7:4] | imm`.
///
/// Opcodes are three trits. Registers R0..R8 are stored as plain 4-bit
/// indices; immediates are balanced-ternary packed.
pub const LAYOUT: Layout = Layout {
    word_bits: 18,
    opcode_bits: 6,
    opcode_shift: 12,
    reg_bits: 4,
    reg_a_shift: 8,
    reg_b_shift: 4,
    max_register: 8,
    hex_fallback: true,
};

pub fn shape(format: Format) -> Option<Shape> {
    let shape = match format {
        Format::NoOperand => Shape::None,
        Format::RegReg => Shape::RegReg,
        Format::RegImmBig => Shape::RegImm(ImmKind::Trits { count: 4 }),
        Format::RegImmSmall => Shape::RegImm(ImmKind::Trits { count: 2 }),
        Format::MemOffset => Shape::RegRegImm(ImmKind::Trits { count: 2 }),
        Format::BranchOffset => Shape::RegImm(ImmKind::Trits { count: 4 }),
        Format::RegImmUnsigned | Format::RegImmSigned => return None,
    };
    Some(shape)
}

const fn op(mnemonic: &'static str, opcode: u32, format: Format) -> InstrDesc {
    InstrDesc { mnemonic, opcode, format }
}

// Trit-pair opcodes; the comment gives the binary-ISA opcode of the same
// operation.
pub const TABLE: &[InstrDesc] = &[
    op("MV", 0b00_00_00, Format::RegReg),        // 0
    op("NOT", 0b00_00_11, Format::RegReg),       // 2
    op("AND", 0b00_01_01, Format::RegReg),       // 4
    op("OR", 0b00_01_11, Format::RegReg),        // 5
    op("XOR", 0b00_11_00, Format::RegReg),       // 6
    op("ADD", 0b00_11_01, Format::RegReg),       // 7
    op("SUB", 0b00_11_11, Format::RegReg),       // 8
    op("COMP", 0b01_00_11, Format::RegReg),      // 11
    op("ANDI", 0b01_01_00, Format::RegImmBig),   // 12
    op("ADDI", 0b01_01_01, Format::RegImmBig),   // 13
    op("LT", 0b01_01_11, Format::RegReg),        // 14
    op("EQ", 0b01_11_00, Format::RegReg),        // 15
    op("LUI", 0b01_11_01, Format::RegImmBig),    // 16
    op("LI", 0b01_11_11, Format::RegImmBig),     // 17
    op("BEQ", 0b11_00_00, Format::BranchOffset), // 18
    op("BNE", 0b11_00_01, Format::BranchOffset), // 19
    op("LOAD", 0b11_01_01, Format::MemOffset),   // 22
    op("STORE", 0b11_01_11, Format::MemOffset),  // 23
    op("HALT", 0b11_11_11, Format::NoOperand),   // 26
];
