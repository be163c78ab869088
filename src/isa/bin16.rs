use crate::instructions::{Format, InstrDesc};
use crate::operand::{ImmKind, Shape};
use crate::Layout;

/// 16-bit binary ISA: `opcode[15:11] | ra[10:8] | rb[7:5] | imm`.
/// Eight registers, 5-bit opcodes.
pub const LAYOUT: Layout = Layout {
    word_bits: 16,
    opcode_bits: 5,
    opcode_shift: 11,
    reg_bits: 3,
    reg_a_shift: 8,
    reg_b_shift: 5,
    max_register: 7,
    hex_fallback: false,
};

pub fn shape(format: Format) -> Option<Shape> {
    let shape = match format {
        Format::NoOperand => Shape::None,
        Format::RegReg => Shape::RegReg,
        Format::RegImmUnsigned => Shape::RegImm(ImmKind::Unsigned { bits: 8 }),
        Format::RegImmSigned => Shape::RegImm(ImmKind::Signed { bits: 8 }),
        Format::MemOffset => Shape::RegRegImm(ImmKind::Unsigned { bits: 5 }),
        Format::BranchOffset => Shape::RegImm(ImmKind::Signed { bits: 8 }),
        Format::RegImmBig | Format::RegImmSmall => return None,
    };
    Some(shape)
}

const fn op(mnemonic: &'static str, opcode: u32, format: Format) -> InstrDesc {
    InstrDesc { mnemonic, opcode, format }
}

pub const TABLE: &[InstrDesc] = &[
    op("MV", 0b00000, Format::RegReg),
    op("NOT", 0b00010, Format::RegReg),
    op("AND", 0b00100, Format::RegReg),
    op("OR", 0b00101, Format::RegReg),
    op("XOR", 0b00110, Format::RegReg),
    op("ADD", 0b00111, Format::RegReg),
    op("SUB", 0b01000, Format::RegReg),
    op("COMP", 0b01011, Format::RegReg),
    op("ANDI", 0b01100, Format::RegImmUnsigned),
    op("ADDI", 0b01101, Format::RegImmUnsigned),
    op("LT", 0b01110, Format::RegReg),
    op("EQ", 0b01111, Format::RegReg),
    op("LUI", 0b10000, Format::RegImmUnsigned),
    op("LI", 0b10001, Format::RegImmUnsigned),
    op("BEQ", 0b10010, Format::BranchOffset),
    op("BNE", 0b10011, Format::BranchOffset),
    op("LOAD", 0b10110, Format::MemOffset),
    op("STORE", 0b10111, Format::MemOffset),
    op("HALT", 0b11010, Format::NoOperand),
];
