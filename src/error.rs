use serde::Serialize;

use crate::Isa;

/// Reasons a single source line fails to encode. The line is skipped and
/// assembly continues.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LineError {
    #[error("unknown instruction: {mnemonic}")]
    UnknownMnemonic { mnemonic: String },
    #[error("{mnemonic} takes {expected} operand(s), found {found}")]
    OperandCount {
        mnemonic: String,
        expected: usize,
        found: usize,
    },
    #[error("invalid register format: {token}")]
    MalformedRegister { token: String },
    #[error("register {token} out of range (R0..R{max})")]
    RegisterOutOfRange { token: String, max: u32 },
    #[error("invalid literal: {token}")]
    MalformedLiteral { token: String },
    #[error("value {value} out of range [{min}, {max}]")]
    ImmediateOutOfRange { value: i64, min: i64, max: i64 },
}

/// Problems with an opcode table supplied as configuration.
#[derive(thiserror::Error, Debug)]
pub enum TableError {
    #[error("duplicate mnemonic {0}")]
    DuplicateMnemonic(String),
    #[error("{mnemonic}: opcode {opcode:#b} shared with {other}")]
    DuplicateOpcode {
        mnemonic: String,
        other: String,
        opcode: u32,
    },
    #[error("{mnemonic}: opcode {opcode:#b} wider than {bits} bits")]
    OpcodeTooWide {
        mnemonic: String,
        opcode: u32,
        bits: u32,
    },
    #[error("{mnemonic}: opcode {opcode:#b} contains the unused trit code 0b10")]
    InvalidTrit { mnemonic: String, opcode: u32 },
    #[error("{mnemonic}: format {format} is not available on the {isa} ISA")]
    UnsupportedFormat {
        mnemonic: String,
        format: String,
        isa: Isa,
    },
    #[error("malformed opcode table: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that abort a whole assembly run.
#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("program image full: more than {capacity} words")]
    CapacityExceeded { capacity: usize },
    #[error("input unavailable: {0}")]
    Input(#[from] std::io::Error),
    #[error(transparent)]
    Table(#[from] TableError),
}
