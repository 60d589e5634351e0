use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;

use lilliput_enc::Program;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Address, bytes and source per statement
    Listing,
    /// Space separated hex bytes on one line
    Hex,
    /// Raw machine code
    Bin,
    /// Statements and labels as JSON
    Json,
}

/// Parse an address given in decimal or `0x` hex.
pub fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}

pub fn render(program: &Program, format: OutputFormat) -> Result<Vec<u8>> {
    Ok(match format {
        OutputFormat::Listing => {
            let mut out = String::new();
            for s in &program.statements {
                writeln!(out, "{:08x}  {:<26} {}", s.addr, s.hex(), s.source)?;
            }
            out.into_bytes()
        }
        OutputFormat::Hex => {
            let hex: Vec<String> = program.bytes().iter().map(|b| format!("{b:02x}")).collect();
            format!("{}\n", hex.join(" ")).into_bytes()
        }
        OutputFormat::Bin => program.bytes(),
        OutputFormat::Json => {
            let mut out = serde_json::to_vec_pretty(program)?;
            out.push(b'\n');
            out
        }
    })
}
