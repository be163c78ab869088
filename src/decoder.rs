use serde::Serialize;

use crate::instructions::{Format, OpcodeTable};
use crate::operand::Shape;
use crate::Word;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Operands {
    None,
    RegReg { ra: u32, rb: u32 },
    RegImm { ra: u32, imm: i64 },
    RegRegImm { ra: u32, rb: u32, imm: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub mnemonic: String,
    pub opcode: u32,
    pub format: Format,
    pub operands: Operands,
}

pub trait Decoder {
    fn decode(&self, word: Word) -> Option<Decoded>;
}

impl Decoder for OpcodeTable {
    /// `None` for unknown opcodes and for words the assembler could not have
    /// produced (stray bits, out-of-range registers, `0b10` trits).
    fn decode(&self, word: Word) -> Option<Decoded> {
        let isa = self.isa();
        let layout = isa.layout();
        if word >> layout.word_bits != 0 {
            return None;
        }
        let opcode = word >> layout.opcode_shift;
        let mnemonic = self.mnemonic_for(opcode)?;
        let entry = self.lookup(mnemonic)?;
        let shape = isa.shape(entry.format)?;

        let bits = word & layout.operand_mask();
        if bits & !shape.used_bits(layout) != 0 {
            return None;
        }
        let reg = |shift: u32| {
            let r = (bits >> shift) & layout.reg_mask();
            (r <= layout.max_register).then_some(r)
        };
        let operands = match shape {
            Shape::None => Operands::None,
            Shape::RegReg => Operands::RegReg {
                ra: reg(layout.reg_a_shift)?,
                rb: reg(layout.reg_b_shift)?,
            },
            Shape::RegImm(kind) => Operands::RegImm {
                ra: reg(layout.reg_a_shift)?,
                imm: kind.decode(bits)?,
            },
            Shape::RegRegImm(kind) => Operands::RegRegImm {
                ra: reg(layout.reg_a_shift)?,
                rb: reg(layout.reg_b_shift)?,
                imm: kind.decode(bits)?,
            },
        };
        Some(Decoded {
            mnemonic: mnemonic.to_string(),
            opcode,
            format: entry.format,
            operands,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Isa;

    #[test]
    fn decodes_fields() {
        let t = OpcodeTable::builtin(Isa::Binary);
        let d = t.decode(0x690A).unwrap();
        assert_eq!(d.mnemonic, "ADDI");
        assert_eq!(d.operands, Operands::RegImm { ra: 1, imm: 10 });

        let beq = t.decode((0b10010 << 11) | (2 << 8) | 0x80).unwrap();
        assert_eq!(beq.operands, Operands::RegImm { ra: 2, imm: -128 });
    }

    #[test]
    fn rejects_impossible_words() {
        let bin = OpcodeTable::builtin(Isa::Binary);
        // unused opcode 0b00001
        assert!(bin.decode(0b00001 << 11).is_none());
        // HALT with operand bits
        assert!(bin.decode((0b11010 << 11) | 1).is_none());
        // wider than 16 bits
        assert!(bin.decode(0x1_0000).is_none());

        let tern = OpcodeTable::builtin(Isa::Ternary);
        // R9 in an 18-bit MV
        assert!(tern.decode(9 << 8).is_none());
        // ADDI with a 0b10 trit
        assert!(tern.decode((0b010101 << 12) | 0b10).is_none());
    }
}
