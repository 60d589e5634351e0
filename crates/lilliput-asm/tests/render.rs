use pretty_assertions::assert_eq;

use lilliput_asm::{render, OutputFormat};
use lilliput_enc::{assemble, AssembleConfig};

fn program() -> lilliput_enc::Program {
    let cfg = AssembleConfig { origin: 0x10, ..Default::default() };
    assemble("mov a, 0x1234\nmov a, b ; copy\nnop", &cfg).unwrap()
}

#[test]
fn listing_has_address_bytes_and_source() {
    let out = String::from_utf8(render(&program(), OutputFormat::Listing).unwrap()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], format!("00000010  {:<26} mov a, 0x1234", "03 00 34 12"));
    assert_eq!(lines[1], format!("00000014  {:<26} mov a, b", "01 10"));
    assert_eq!(lines[2], format!("00000016  {:<26} nop", "87"));
}

#[test]
fn hex_and_bin_match() {
    let p = program();
    assert_eq!(render(&p, OutputFormat::Bin).unwrap(), vec![0x03, 0x00, 0x34, 0x12, 0x01, 0x10, 0x87]);
    assert_eq!(
        String::from_utf8(render(&p, OutputFormat::Hex).unwrap()).unwrap(),
        "03 00 34 12 01 10 87\n"
    );
}

#[test]
fn json_round_trips_through_serde_json() {
    let out = render(&program(), OutputFormat::Json).unwrap();
    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["origin"], 16);
    assert_eq!(v["statements"][1]["source"], "mov a, b");
    assert_eq!(v["statements"][2]["addr"], 0x16);
}

#[test]
fn listing_keeps_labels_and_data() {
    let src = "start: jmp start\nmsg: .asciiz \"hi\"";
    let p = assemble(src, &AssembleConfig::default()).unwrap();
    let out = String::from_utf8(render(&p, OutputFormat::Listing).unwrap()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], format!("00000000  {:<26} start: jmp start", "71 00 00 00 00"));
    assert_eq!(lines[1], format!("00000005  {:<26} msg: .asciiz \"hi\"", "68 69 00"));

    let v: serde_json::Value = serde_json::from_slice(&render(&p, OutputFormat::Json).unwrap()).unwrap();
    assert_eq!(v["labels"]["msg"], 5);
}
