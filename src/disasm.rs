use crate::decoder::{Decoded, Operands};

/// Source text that assembles back to the same word.
pub fn fmt_decoded(d: &Decoded) -> String {
    let mn = &d.mnemonic;
    match d.operands {
        Operands::None => mn.clone(),
        Operands::RegReg { ra, rb } => format!("{mn} R{ra}, R{rb}"),
        Operands::RegImm { ra, imm } => format!("{mn} R{ra}, {imm}"),
        Operands::RegRegImm { ra, rb, imm } => format!("{mn} R{ra}, R{rb}, {imm}"),
    }
}
