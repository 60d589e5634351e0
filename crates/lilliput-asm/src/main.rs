use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use lilliput_asm::{parse_u32, render, OutputFormat};
use lilliput_enc::{assemble, AssembleConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lilliput assembler", long_about = None)]
struct Cli {
    /// Input assembly file, one instruction per line (default: stdin)
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
    /// Write output to file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Load address of the first instruction (hex or dec)
    #[arg(long, default_value = "0")]
    origin: String,
    /// Comment character
    #[arg(long, default_value_t = ';')]
    comment: char,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Listing)]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let source = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let cfg = AssembleConfig {
        origin: parse_u32(&cli.origin)?,
        comment: cli.comment,
    };
    let name = cli
        .input
        .as_ref()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());
    let program = assemble(&source, &cfg).with_context(|| format!("assembling {name}"))?;
    let out = render(&program, cli.format)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &out).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), bytes = program.len(), "wrote output");
        }
        None => io::stdout().write_all(&out)?,
    }
    Ok(())
}
