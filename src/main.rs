use std::{
    fs::File,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use huffman::HuffmanCode;

#[derive(Parser, Debug)]
#[command(name = "huffman")]
#[command(version)]
#[command(about = "Build a Huffman code for some input and report its size", long_about = None)]
struct Args {
    /// File to read. Reads stdin when neither this nor --text is given.
    input: Option<PathBuf>,

    /// Use this string as the input instead of a file
    #[arg(long, conflicts_with = "input")]
    text: Option<String>,

    /// Print every symbol with its count and codeword
    #[arg(long)]
    table: bool,

    /// Print the encoded bit string
    #[arg(long)]
    bits: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

fn read_input(args: &Args) -> anyhow::Result<Vec<u8>> {
    if let Some(text) = &args.text {
        return Ok(text.clone().into_bytes());
    }

    let mut buf = Vec::new();
    match &args.input {
        Some(path) => {
            File::open(path)
                .and_then(|mut f| f.read_to_end(&mut buf))
                .with_context(|| format!("reading {}", path.display()))?;
        }
        None => {
            io::stdin().read_to_end(&mut buf).context("reading stdin")?;
        }
    }
    Ok(buf)
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input = read_input(&args)?;
    let code = HuffmanCode::from_bytes(&input)?;
    let bits = code.encode(&input)?;
    info!(bits = bits.len(), "encoded input");

    println!("original size:   {} bytes", code.original_size());
    println!("compressed size: {} bytes", code.compressed_size());
    println!("encoded length:  {} bits", code.encoded_bits());

    if args.table {
        let mut rows: Vec<_> = code.codewords().collect();
        rows.sort_by_key(|&(symbol, word)| (word.len(), symbol));
        for (symbol, word) in rows {
            println!(
                "{:>8} {:>10} {}",
                format!("{:?}", symbol as char),
                code.frequency(symbol),
                word
            );
        }
    }

    if args.bits {
        println!("{bits}");
    }

    if code.decode(&bits)? != input {
        eprintln!("round trip mismatch");
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
