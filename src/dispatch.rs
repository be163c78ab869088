use crate::error::LineError;
use crate::instructions::OpcodeTable;
use crate::operand::{self, Shape};
use crate::tokenizer::SourceLine;
use crate::Word;

/// Encode one normalized line into a machine word for the table's ISA.
pub fn encode_line(line: &SourceLine, table: &OpcodeTable) -> Result<Word, LineError> {
    let isa = table.isa();
    let layout = isa.layout();
    let mnemonic = line.mnemonic();
    let unknown = || LineError::UnknownMnemonic {
        mnemonic: mnemonic.to_string(),
    };
    let entry = table.lookup(mnemonic).ok_or_else(unknown)?;
    // Tables are validated against the ISA on construction.
    let shape = isa.shape(entry.format).ok_or_else(unknown)?;

    let args = line.operands();
    if args.len() != shape.arity() {
        return Err(LineError::OperandCount {
            mnemonic: mnemonic.to_string(),
            expected: shape.arity(),
            found: args.len(),
        });
    }

    let operand_bits = match shape {
        Shape::None => operand::no_operand(),
        Shape::RegReg => operand::reg_reg(&args[0], &args[1], layout)?,
        Shape::RegImm(kind) => operand::reg_imm(&args[0], &args[1], kind, layout)?,
        Shape::RegRegImm(kind) => operand::mem_offset(&args[0], &args[1], &args[2], kind, layout)?,
    };
    Ok((entry.opcode << layout.opcode_shift) | operand_bits)
}
