use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use lilliput_enc::{encode, EncodedInstruction};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Encode Lilliput assembly lines into machine code"
)]
struct Opts {
    /// Print a JSON array instead of one line per instruction
    #[arg(long)]
    json: bool,
    #[arg(value_name = "LINE", required = true)]
    lines: Vec<String>,
}

#[derive(Serialize)]
struct Encoded<'a> {
    line: &'a str,
    bytes: EncodedInstruction,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opts = Opts::parse();
    let mut out = Vec::with_capacity(opts.lines.len());
    for line in &opts.lines {
        let bytes = encode(line)?;
        tracing::debug!(%line, %bytes, "encoded");
        out.push(Encoded { line, bytes });
    }

    if opts.json {
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for e in &out {
            println!("{} => {}", e.line, e.bytes);
        }
    }
    Ok(())
}
