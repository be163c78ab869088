pub mod assembler;
pub mod config;
pub mod decoder;
pub mod disasm;
pub mod dispatch;
pub mod error;
pub mod instructions;
pub mod operand;
pub mod ternary;
pub mod tokenizer;

pub mod isa {
    pub mod bin16; // 16-bit binary ISA
    pub mod tern18; // 18-bit balanced-ternary ISA
}

pub use assembler::{assemble, Assembler, Assembly, Diagnostic, ProgramImage};
pub use config::AsmConfig;
pub use error::{AsmError, LineError, TableError};
pub use instructions::{Format, OpcodeTable};

use serde::{Deserialize, Serialize};
use std::fmt;

use operand::Shape;

/// One assembled machine word. Only the low `word_bits` bits are ever set.
pub type Word = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Isa {
    #[default]
    Binary,
    Ternary,
}

/// Bit placement shared by every format class of one ISA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub word_bits: u32,
    pub opcode_bits: u32,
    pub opcode_shift: u32,
    pub reg_bits: u32,
    pub reg_a_shift: u32,
    pub reg_b_shift: u32,
    pub max_register: u32,
    /// Retry a non-decimal immediate as bare hex (`ff`).
    pub hex_fallback: bool,
}

impl Layout {
    pub const fn opcode_mask(&self) -> u32 {
        (1 << self.opcode_bits) - 1
    }

    pub const fn reg_mask(&self) -> u32 {
        (1 << self.reg_bits) - 1
    }

    pub const fn operand_mask(&self) -> u32 {
        (1 << self.opcode_shift) - 1
    }
}

impl Isa {
    pub fn layout(self) -> &'static Layout {
        match self {
            Isa::Binary => &isa::bin16::LAYOUT,
            Isa::Ternary => &isa::tern18::LAYOUT,
        }
    }

    /// Operand shape of `format` on this ISA, `None` if the ISA has no such class.
    pub fn shape(self, format: Format) -> Option<Shape> {
        match self {
            Isa::Binary => isa::bin16::shape(format),
            Isa::Ternary => isa::tern18::shape(format),
        }
    }

    pub fn builtin_table(self) -> &'static [instructions::InstrDesc] {
        match self {
            Isa::Binary => isa::bin16::TABLE,
            Isa::Ternary => isa::tern18::TABLE,
        }
    }

    /// Hex digits per serialized word.
    pub fn hex_digits(self) -> usize {
        (self.layout().word_bits as usize).div_ceil(4)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Isa::Binary => "binary",
            Isa::Ternary => "ternary",
        }
    }
}

impl fmt::Display for Isa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
