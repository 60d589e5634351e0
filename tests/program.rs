use pretty_assertions::assert_eq;

use lilliput_enc::{assemble, AssembleConfig, AssembleError, Bus, EncodeError, LinearMemory, Program};

const SOURCE: &str = "\
; load a constant and spin
    mov a, 0x1234   ; a = 0x1234
    mov b, a

loop: mov a + b
";

fn asm(src: &str) -> Program {
    assemble(src, &AssembleConfig::default()).unwrap()
}

fn asm_err(src: &str) -> AssembleError {
    assemble(src, &AssembleConfig::default()).unwrap_err()
}

#[test]
fn assembles_statements_with_addresses() {
    let src = "mov a, 0x1234 ; init\n\n  mov b, a\n; done\nhalt\n";
    let cfg = AssembleConfig { origin: 0x100, ..Default::default() };
    let program = assemble(src, &cfg).unwrap();

    let lines: Vec<_> = program.statements.iter().map(|s| (s.line, s.addr, s.source.as_str())).collect();
    assert_eq!(
        lines,
        vec![(1, 0x100, "mov a, 0x1234"), (3, 0x104, "mov b, a"), (5, 0x106, "halt")]
    );
    assert_eq!(program.bytes(), vec![0x03, 0x00, 0x34, 0x12, 0x01, 0x01, 0x88]);
    assert_eq!(program.len(), 7);
    assert_eq!(program.end(), 0x107);
    assert_eq!(program.statements[0].hex(), "03 00 34 12");
}

#[test]
fn error_reports_source_line() {
    let err = assemble(SOURCE, &AssembleConfig::default()).unwrap_err();
    assert_eq!(err.line(), 5);
    assert_eq!(
        err,
        AssembleError::Encode {
            line: 5,
            source: EncodeError::Syntax { line: "mov a + b".into() },
        }
    );
    assert!(err.to_string().starts_with("line 5: syntax error"));
}

#[test]
fn label_before_its_use() {
    let program = asm("start:\n nop\n jmp start\n");
    assert_eq!(program.bytes(), vec![0x87, 0x71, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(program.labels["start"], 0);
}

#[test]
fn backward_branch_to_local_label() {
    let src = "\
start:
    mov a, 3
.loop:
    dec a
    bnz .loop   ; until a == 0
    halt
";
    let program = asm(src);
    assert_eq!(
        program.bytes(),
        vec![0x02, 0x00, 0x03, 0x5B, 0x00, 0x5F, 0x03, 0x00, 0x00, 0x00, 0x88]
    );
    let labels: Vec<_> = program.labels.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    assert_eq!(labels, vec![("start", 0), ("start.loop", 3)]);
}

#[test]
fn forward_reference_uses_final_address() {
    let cfg = AssembleConfig { origin: 0x100, ..Default::default() };
    let program = assemble("jsr sub\nhalt\nsub: ret", &cfg).unwrap();
    assert_eq!(program.bytes(), vec![0x73, 0x06, 0x01, 0x00, 0x00, 0x88, 0x74]);
    assert_eq!(program.statements[2].source, "sub: ret");
    assert_eq!(program.statements[2].addr, 0x106);
}

#[test]
fn local_labels_are_scoped_to_their_global() {
    let program = asm("first:\n.loop: jmp .loop\nsecond:\n.loop: jmp .loop");
    assert_eq!(
        program.bytes(),
        vec![0x71, 0x00, 0x00, 0x00, 0x00, 0x71, 0x05, 0x00, 0x00, 0x00]
    );
    assert_eq!(program.labels["second.loop"], 5);
}

#[test]
fn label_operands_are_always_32_bit() {
    let program = asm("nop\nnop\nhere: mov a, here");
    assert_eq!(program.bytes()[2..].to_vec(), vec![0x04, 0x00, 0x02, 0x00, 0x00, 0x00]);
}

#[test]
fn indirect_label_operand() {
    let program = asm("movd a, [value]\nhalt\nvalue: .dword 0xDEADBEEF");
    assert_eq!(
        program.bytes(),
        vec![0x0A, 0x00, 0x07, 0x00, 0x00, 0x00, 0x88, 0xEF, 0xBE, 0xAD, 0xDE]
    );
}

#[test]
fn registers_win_over_labels() {
    assert_eq!(asm("jmp a").bytes(), vec![0x70, 0x00]);
    assert_eq!(
        asm_err("sp: nop"),
        AssembleError::ReservedLabel { line: 1, name: "sp".into() }
    );
}

#[test]
fn duplicate_label() {
    assert_eq!(
        asm_err("start:\nnop\nstart: halt"),
        AssembleError::DuplicateLabel { line: 3, name: "start".into(), first: 1 }
    );
}

#[test]
fn undefined_label() {
    let err = asm_err("nop\njmp start");
    assert_eq!(err, AssembleError::UndefinedLabel { line: 2, name: "start".into() });
    assert_eq!(err.to_string(), "line 2: undefined label `start`");

    assert_eq!(
        asm_err("main:\njmp .done"),
        AssembleError::UndefinedLabel { line: 2, name: "main.done".into() }
    );
}

#[test]
fn data_directives() {
    let program = asm(".byte 1, 0xff\n.word 0x1234\n.dword 0x10\n.ascii \"ok;\" ; text\n.asciiz \"\"");
    assert_eq!(
        program.bytes(),
        vec![0x01, 0xFF, 0x34, 0x12, 0x10, 0x00, 0x00, 0x00, b'o', b'k', b';', 0x00]
    );
    let addrs: Vec<u32> = program.statements.iter().map(|s| s.addr).collect();
    assert_eq!(addrs, vec![0, 2, 4, 8, 11]);
}

#[test]
fn data_can_hold_label_addresses() {
    let program = asm("table: .dd table, end\nend: halt");
    assert_eq!(program.bytes(), vec![0, 0, 0, 0, 8, 0, 0, 0, 0x88]);
}

#[test]
fn data_out_of_range() {
    assert_eq!(
        asm_err(".byte 0x100"),
        AssembleError::DataOutOfRange { line: 1, token: "0x100".into(), width: 1 }
    );
    assert_eq!(
        asm_err("start: .word start"),
        AssembleError::DataOutOfRange { line: 1, token: "start".into(), width: 2 }
    );
    assert_eq!(
        asm_err("nop\n.dword 0x1_0000_0000"),
        AssembleError::DataOutOfRange { line: 2, token: "0x1_0000_0000".into(), width: 4 }
    );
}

#[test]
fn bad_directives() {
    assert_eq!(
        asm_err(".org 0x100"),
        AssembleError::UnknownDirective { line: 1, name: ".org".into() }
    );
    assert_eq!(
        asm_err(".byte 1,,2"),
        AssembleError::InvalidData { line: 1, token: "".into() }
    );
    assert_eq!(
        asm_err(".ascii unquoted"),
        AssembleError::InvalidData { line: 1, token: "unquoted".into() }
    );
}

#[test]
fn program_may_end_at_top_of_address_space() {
    let cfg = AssembleConfig { origin: 0xFFFF_FFFC, ..Default::default() };
    let program = assemble("mov a, 0x1234", &cfg).unwrap();
    assert_eq!(program.end(), 1 << 32);

    let cfg = AssembleConfig { origin: 0xFFFF_FFFE, ..Default::default() };
    assert_eq!(
        assemble("nop\nmov a, 0x1234", &cfg).unwrap_err(),
        AssembleError::AddressOverflow { line: 2 }
    );
}

#[test]
fn custom_comment_char() {
    let cfg = AssembleConfig { comment: '#', ..Default::default() };
    let program = assemble("inc a # bump\n# nothing\nret", &cfg).unwrap();
    assert_eq!(program.bytes(), vec![0x5A, 0x00, 0x74]);
}

#[test]
fn empty_source_is_empty_program() {
    let program = asm("; only a comment\n\nlonely:\n");
    assert!(program.is_empty());
    assert_eq!(program.len(), 0);
    assert_eq!(program.end(), 0);
    assert_eq!(program.labels["lonely"], 0);
}

#[test]
fn load_writes_each_byte_at_its_address() {
    let cfg = AssembleConfig { origin: 0x8000_0000, ..Default::default() };
    let program = assemble("mov a, 0xFABC1234\npush.a", &cfg).unwrap();

    let mut mem = LinearMemory::with_base(16, 0x8000_0000);
    program.load(&mut mem).unwrap();
    assert_eq!(mem.read_u8(0x8000_0000).unwrap(), 0x04);
    assert_eq!(mem.read_u8(0x8000_0001).unwrap(), 0x00);
    assert_eq!(mem.read_u32(0x8000_0002).unwrap(), 0xFABC_1234);
    assert_eq!(mem.read_u8(0x8000_0006).unwrap(), 0x7E);
}

#[test]
fn load_that_does_not_fit_writes_nothing() {
    let mut mem = LinearMemory::new(4);
    assert!(asm("mov a, 0xFABC1234").load(&mut mem).is_err());
    assert_eq!(mem.mem, vec![0; 4]);

    // the first statement fits, the second does not
    assert!(asm("mov a, 0x1234\nnop").load(&mut mem).is_err());
    assert_eq!(mem.mem, vec![0; 4]);
}

#[test]
fn program_serializes_to_json() {
    let program = asm("mov a, b");
    let json = serde_json::to_value(&program).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "origin": 0,
            "statements": [{ "line": 1, "addr": 0, "source": "mov a, b", "bytes": [1, 16] }]
        })
    );

    let json = serde_json::to_value(asm("top: jmp top")).unwrap();
    assert_eq!(json["labels"], serde_json::json!({ "top": 0 }));
}
