use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use huff_core::artifact;
use huff_store::Depot;

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "huff",
    about = "Huffman file depot — compress, dedup-store, and retrieve files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a .huff artifact
    Compress {
        /// Source file ("-" reads stdin)
        input: PathBuf,
        /// Destination artifact file
        output: PathBuf,
    },
    /// Decompress a .huff artifact back to the original bytes
    Decompress {
        /// Source artifact file
        input: PathBuf,
        /// Destination file ("-" writes to stdout)
        output: PathBuf,
    },
    /// Compress and store a file in the depot, deduplicating by content hash
    Put {
        /// Source file to store
        input: PathBuf,
        /// Depot data directory (objects/, cache/, index.json)
        #[arg(short, long, default_value = "huff-data")]
        data_dir: PathBuf,
    },
    /// Retrieve a stored file by (partial) name
    Get {
        /// Name or name fragment to look up
        name: String,
        /// Depot data directory
        #[arg(short, long, default_value = "huff-data")]
        data_dir: PathBuf,
        /// Write the bytes to a file instead of printing a hex dump
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List objects stored in the depot
    List {
        /// Depot data directory
        #[arg(short, long, default_value = "huff-data")]
        data_dir: PathBuf,
    },
    /// Print the code table and layout statistics of an artifact
    Inspect {
        /// Artifact file to inspect
        file: PathBuf,
        /// Print the full symbol → code table
        #[arg(long)]
        codes: bool,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

fn read_input(input: &PathBuf) -> anyhow::Result<Vec<u8>> {
    if input.to_str() == Some("-") {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(input).with_context(|| format!("reading input file {input:?}"))
    }
}

fn write_output(output: &PathBuf, bytes: &[u8]) -> anyhow::Result<()> {
    if output.to_str() == Some("-") {
        io::stdout().write_all(bytes)?;
        Ok(())
    } else {
        fs::write(output, bytes).with_context(|| format!("writing output file {output:?}"))
    }
}

fn hex_dump(bytes: &[u8]) {
    let preview = &bytes[..bytes.len().min(256)];
    for (i, chunk) in preview.chunks(16).enumerate() {
        print!("  {:04x}  ", i * 16);
        for b in chunk {
            print!("{:02x} ", b);
        }
        for _ in chunk.len()..16 {
            print!("   ");
        }
        print!("  |");
        for b in chunk {
            if b.is_ascii_graphic() || *b == b' ' {
                print!("{}", *b as char);
            } else {
                print!(".");
            }
        }
        println!("|");
    }
    if bytes.len() > 256 {
        println!("  ... ({} bytes remaining not shown)", bytes.len() - 256);
    }
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_compress(input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let raw = read_input(&input)?;
    let t0 = Instant::now();
    let packed = huff_core::compress(&raw)?;
    let elapsed = t0.elapsed();
    write_output(&output, &packed)?;

    eprintln!("  raw size    : {}", human_bytes(raw.len() as u64));
    eprintln!("  compressed  : {}", human_bytes(packed.len() as u64));
    eprintln!(
        "  ratio       : {:.2}x",
        raw.len() as f64 / packed.len() as f64
    );
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_decompress(input: PathBuf, output: PathBuf) -> anyhow::Result<()> {
    let packed = read_input(&input)?;
    let t0 = Instant::now();
    let raw = huff_core::decompress(&packed)
        .with_context(|| format!("decoding artifact {input:?}"))?;
    let elapsed = t0.elapsed();
    write_output(&output, &raw)?;

    eprintln!("  artifact    : {}", human_bytes(packed.len() as u64));
    eprintln!("  raw size    : {}", human_bytes(raw.len() as u64));
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_put(input: PathBuf, data_dir: PathBuf) -> anyhow::Result<()> {
    let raw = read_input(&input)?;
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("input path {input:?} has no file name"))?;

    let depot = Depot::open(&data_dir)?;
    let t0 = Instant::now();
    let receipt = depot.store(&name, &raw)?;
    let elapsed = t0.elapsed();

    eprintln!("  hash        : {}", receipt.hash);
    eprintln!("  stored as   : {}", receipt.remote_name);
    eprintln!("  raw size    : {}", human_bytes(receipt.raw_len as u64));
    eprintln!("  artifact    : {}", human_bytes(receipt.artifact_len as u64));
    if receipt.deduplicated {
        eprintln!("  transfer    : skipped (identical artifact already stored)");
    } else {
        eprintln!("  transfer    : uploaded");
    }
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_get(name: String, data_dir: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let depot = Depot::open(&data_dir)?;
    let t0 = Instant::now();
    let got = depot.fetch(&name)?;
    let elapsed = t0.elapsed();

    eprintln!("  entry       : {}", got.entry.original_name);
    eprintln!("  hash        : {}", got.entry.hash);
    eprintln!(
        "  source      : {}",
        if got.from_cache { "local cache" } else { "object store" }
    );
    if !got.integrity_ok {
        eprintln!("  integrity   : WARNING — hash mismatch on retrieved object");
    }
    eprintln!("  size        : {}", human_bytes(got.bytes.len() as u64));
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());

    match output {
        Some(path) => {
            write_output(&path, &got.bytes)?;
            eprintln!("  written to  : {path:?}");
        }
        None => {
            println!(
                "--- {} ({} bytes, first {} shown) ---",
                got.entry.original_name,
                got.bytes.len(),
                got.bytes.len().min(256)
            );
            hex_dump(&got.bytes);
        }
    }
    Ok(())
}

fn run_list(data_dir: PathBuf) -> anyhow::Result<()> {
    let depot = Depot::open(&data_dir)?;
    let names = depot.list()?;
    if names.is_empty() {
        println!("(depot is empty)");
    }
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn run_inspect(file: PathBuf, show_codes: bool) -> anyhow::Result<()> {
    let bytes = fs::read(&file).with_context(|| format!("reading artifact {file:?}"))?;
    let (entries, table_end) = artifact::read_table(&bytes)
        .with_context(|| format!("parsing code table of {file:?}"))?;
    let padding = bytes
        .get(table_end)
        .context("truncated artifact: missing padding byte")?;
    let payload_len = bytes.len().saturating_sub(table_end + 1);

    let min_len = entries.iter().map(|(_, c)| c.len).min().unwrap_or(0);
    let max_len = entries.iter().map(|(_, c)| c.len).max().unwrap_or(0);
    let mean_len =
        entries.iter().map(|(_, c)| c.len as f64).sum::<f64>() / entries.len() as f64;

    println!("=== Artifact: {:?} ===", file);
    println!();
    println!("  file size      : {}", human_bytes(bytes.len() as u64));
    println!("  table          : {} symbols, {} bytes", entries.len(), table_end);
    println!("  code length    : min {min_len}, max {max_len}, mean {mean_len:.2}");
    println!("  padding        : {padding} bits");
    println!("  payload        : {}", human_bytes(payload_len as u64));

    if show_codes {
        println!();
        println!("  {:>6}  {:>5}  code", "symbol", "len");
        println!("  {}", "-".repeat(32));
        for (sym, code) in &entries {
            let display = if sym.is_ascii_graphic() || *sym == b' ' {
                format!("{:?}", *sym as char)
            } else {
                format!("{sym:#04x}")
            };
            println!("  {:>6}  {:>5}  {}", display, code.len, code.to_bit_string());
        }
    }

    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Compress { input, output } => run_compress(input, output),
        Commands::Decompress { input, output } => run_decompress(input, output),
        Commands::Put { input, data_dir } => run_put(input, data_dir),
        Commands::Get {
            name,
            data_dir,
            output,
        } => run_get(name, data_dir, output),
        Commands::List { data_dir } => run_list(data_dir),
        Commands::Inspect { file, codes } => run_inspect(file, codes),
    }
}
