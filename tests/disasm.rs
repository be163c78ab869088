use pretty_assertions::assert_eq;

use tri_asm::decoder::{Decoder, Operands};
use tri_asm::disasm::fmt_decoded;
use tri_asm::{assemble, Isa, OpcodeTable};

const SOURCES: &[(Isa, &str)] = &[
    (
        Isa::Binary,
        "MV R0, R1\nNOT R2, R3\nANDI R4, 0x0f\nLUI R5, 255\nBEQ R6, -128\nBNE R7, 127\nLOAD R1, R2, 0\nSTORE R3, R4, 31\nHALT",
    ),
    (
        Isa::Ternary,
        "MV R8, R7\nCOMP R1, R2\nADDI R3, -13\nLI R0, 40\nBEQ R4, -40\nLOAD R5, R6, -4\nSTORE R7, R8, 2\nHALT",
    ),
];

#[test]
fn disassembly_reassembles_to_same_words() {
    for &(isa, src) in SOURCES {
        let first = assemble(src.lines(), isa).unwrap();
        assert!(first.diagnostics.is_empty(), "{:?}", first.diagnostics);

        let table = OpcodeTable::builtin(isa);
        let text: Vec<String> = first
            .image
            .words()
            .iter()
            .map(|&w| fmt_decoded(&table.decode(w).unwrap()))
            .collect();
        let second = assemble(&text, isa).unwrap();
        assert_eq!(second.image.words(), first.image.words());
    }
}

#[test]
fn decoded_operand_values() {
    let table = OpcodeTable::builtin(Isa::Ternary);
    let asm = assemble(["ADDI R3, -13"], Isa::Ternary).unwrap();
    let d = table.decode(asm.image.words()[0]).unwrap();
    assert_eq!(d.mnemonic, "ADDI");
    assert_eq!(d.operands, Operands::RegImm { ra: 3, imm: -13 });
}
