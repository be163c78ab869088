use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::TableError;
use crate::ternary;
use crate::Isa;

/// Operand shape category of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    NoOperand,
    RegReg,
    RegImmUnsigned,
    RegImmSigned,
    RegImmBig,
    RegImmSmall,
    MemOffset,
    BranchOffset,
}

impl Format {
    pub const fn name(self) -> &'static str {
        match self {
            Format::NoOperand => "no_operand",
            Format::RegReg => "reg_reg",
            Format::RegImmUnsigned => "reg_imm_unsigned",
            Format::RegImmSigned => "reg_imm_signed",
            Format::RegImmBig => "reg_imm_big",
            Format::RegImmSmall => "reg_imm_small",
            Format::MemOffset => "mem_offset",
            Format::BranchOffset => "branch_offset",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Built-in table row.
#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub mnemonic: &'static str,
    pub opcode: u32,
    pub format: Format,
}

/// Table row as read from (or written to) a JSON table file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableEntry {
    pub mnemonic: String,
    pub opcode: u32,
    pub format: Format,
}

impl From<&InstrDesc> for TableEntry {
    fn from(d: &InstrDesc) -> Self {
        Self {
            mnemonic: d.mnemonic.to_string(),
            opcode: d.opcode,
            format: d.format,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub opcode: u32,
    pub format: Format,
}

/// Built-in row for `mnemonic` (upper case) on `isa`.
pub fn lookup(mnemonic: &str, isa: Isa) -> Option<&'static InstrDesc> {
    isa.builtin_table().iter().find(|d| d.mnemonic == mnemonic)
}

/// Immutable mnemonic <-> opcode map for one ISA.
#[derive(Debug, Clone)]
pub struct OpcodeTable {
    isa: Isa,
    by_name: HashMap<String, Entry>,
    by_opcode: HashMap<u32, String>,
}

impl OpcodeTable {
    pub fn builtin(isa: Isa) -> Self {
        let mut by_name = HashMap::new();
        let mut by_opcode = HashMap::new();
        for d in isa.builtin_table() {
            by_name.insert(d.mnemonic.to_string(), Entry { opcode: d.opcode, format: d.format });
            by_opcode.insert(d.opcode, d.mnemonic.to_string());
        }
        Self { isa, by_name, by_opcode }
    }

    /// Validated table. Mnemonics are upper-cased.
    pub fn new<I>(isa: Isa, entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = TableEntry>,
    {
        let layout = isa.layout();
        let mut by_name: HashMap<String, Entry> = HashMap::new();
        let mut by_opcode: HashMap<u32, String> = HashMap::new();
        for e in entries {
            let mnemonic = e.mnemonic.to_uppercase();
            if e.opcode > layout.opcode_mask() {
                return Err(TableError::OpcodeTooWide { mnemonic, opcode: e.opcode, bits: layout.opcode_bits });
            }
            if isa == Isa::Ternary && ternary::decode(e.opcode, layout.opcode_bits / 2).is_none() {
                return Err(TableError::InvalidTrit { mnemonic, opcode: e.opcode });
            }
            if isa.shape(e.format).is_none() {
                return Err(TableError::UnsupportedFormat { mnemonic, format: e.format.to_string(), isa });
            }
            if let Some(other) = by_opcode.get(&e.opcode) {
                return Err(TableError::DuplicateOpcode { mnemonic, other: other.clone(), opcode: e.opcode });
            }
            if by_name.contains_key(&mnemonic) {
                return Err(TableError::DuplicateMnemonic(mnemonic));
            }
            by_opcode.insert(e.opcode, mnemonic.clone());
            by_name.insert(mnemonic, Entry { opcode: e.opcode, format: e.format });
        }
        Ok(Self { isa, by_name, by_opcode })
    }

    /// Table from a JSON array of `{ "mnemonic", "opcode", "format" }`.
    pub fn from_json(isa: Isa, text: &str) -> Result<Self, TableError> {
        let entries: Vec<TableEntry> = serde_json::from_str(text)?;
        Self::new(isa, entries)
    }

    pub fn to_json(&self) -> Result<String, TableError> {
        Ok(serde_json::to_string_pretty(&self.entries())?)
    }

    pub fn isa(&self) -> Isa {
        self.isa
    }

    pub fn lookup(&self, mnemonic: &str) -> Option<Entry> {
        self.by_name.get(mnemonic).copied()
    }

    pub fn mnemonic_for(&self, opcode: u32) -> Option<&str> {
        self.by_opcode.get(&opcode).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Rows sorted by opcode.
    pub fn entries(&self) -> Vec<TableEntry> {
        let mut out: Vec<TableEntry> = self
            .by_name
            .iter()
            .map(|(m, e)| TableEntry { mnemonic: m.clone(), opcode: e.opcode, format: e.format })
            .collect();
        out.sort_by_key(|e| e.opcode);
        out
    }
}
