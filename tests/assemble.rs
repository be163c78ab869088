use pretty_assertions::assert_eq;

use tri_asm::{assemble, AsmConfig, AsmError, Assembler, Isa, LineError};

const PROGRAM: &str = "\
; count down from three
LI R1, 3
LI R2, 1
loop: SUB R1, R2      ; labels are not supported
SUB R1, R2
BNE R1, -1
HALT
";

#[test]
fn terminator_stops_assembly() {
    let src = "LI R1, 1\nLI R2, 2\nADD R1, R2\n;;;\nHALT\n";
    let asm = assemble(src.lines(), Isa::Binary).unwrap();
    assert_eq!(asm.image.len(), 3);
    assert!(asm.terminated);
    assert!(asm.diagnostics.is_empty());
}

#[test]
fn terminator_can_be_disabled() {
    let src = "LI R1, 1\n  ;;;  \nHALT\n";
    let cfg = AsmConfig { stop_at_terminator: false, ..AsmConfig::default() };
    let asm = Assembler::new(cfg).assemble_str(src).unwrap();
    assert_eq!(asm.image.len(), 2);
    assert!(!asm.terminated);
}

#[test]
fn unknown_mnemonic_is_reported() {
    let asm = assemble(["FOO R1, R2"], Isa::Binary).unwrap();
    assert!(asm.image.is_empty());
    assert_eq!(asm.diagnostics.len(), 1);
    assert_eq!(asm.diagnostics[0].error, LineError::UnknownMnemonic { mnemonic: "FOO".into() });
    assert_eq!(asm.diagnostics[0].text, "FOO R1 R2");
    assert!(asm.diagnostics[0].to_string().contains("FOO"));
}

#[test]
fn bad_lines_leave_no_gap() {
    let asm = assemble(PROGRAM.lines(), Isa::Binary).unwrap();
    assert_eq!(asm.diagnostics.len(), 1);
    assert_eq!(asm.diagnostics[0].line, 4);
    assert_eq!(
        asm.image.to_hex_string(),
        "8903\n8a01\n4140\n99ff\nd000\n"
    );
}

#[test]
fn assembling_twice_is_identical() {
    for isa in [Isa::Binary, Isa::Ternary] {
        let a = assemble(PROGRAM.lines(), isa).unwrap();
        let b = assemble(PROGRAM.lines(), isa).unwrap();
        assert_eq!(a.image.to_hex_string(), b.image.to_hex_string());
        assert_eq!(a.diagnostics, b.diagnostics);
    }
}

#[test]
fn capacity_overflow_is_fatal() {
    let src: Vec<String> = (0..257).map(|_| "HALT".to_string()).collect();
    let err = assemble(&src, Isa::Ternary).unwrap_err();
    assert!(matches!(err, AsmError::CapacityExceeded { capacity: 256 }));

    let full = assemble(&src[..256], Isa::Ternary).unwrap();
    assert_eq!(full.image.len(), 256);
}

#[test]
fn reader_input() {
    let asm = Assembler::new(AsmConfig::new(Isa::Ternary))
        .assemble_reader("MV R0, R1\nHALT\n".as_bytes())
        .unwrap();
    assert_eq!(asm.image.to_hex_string(), "00010\n3f000\n");
    assert_eq!(asm.summary(), "Successfully assembled 2 ternary instructions");
}

#[test]
fn report_serializes() {
    let asm = assemble(["LI R1, 300", "HALT"], Isa::Binary).unwrap();
    let json: serde_json::Value = serde_json::to_value(&asm).unwrap();
    assert_eq!(json["image"]["words"], serde_json::json!([0xD000]));
    assert_eq!(json["diagnostics"][0]["error"]["kind"], "immediate_out_of_range");
    assert_eq!(json["diagnostics"][0]["error"]["value"], 300);
}
