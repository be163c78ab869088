use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use tri_asm::{Isa, OpcodeTable};
use tri_disasm::{load_hex_image, render_text, Listing};

#[derive(Parser, Debug)]
#[command(author, version, about = "Disassembler for tri-asm hex images", long_about = None)]
struct Cli {
    /// Instruction set the image was assembled for
    #[arg(long, value_enum, default_value_t = IsaArg::Binary)]
    isa: IsaArg,
    /// Opcode table JSON used at assembly time (default: built-in)
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Prefix text lines with pc and hex word
    #[arg(long)]
    show_words: bool,
    /// Write output to file instead of stdout
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Input hex image (one word per line)
    #[arg(value_name = "HEXFILE")]
    input: PathBuf,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IsaArg { Binary, Ternary }

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat { Text, Json }

fn main() -> Result<()> {
    let cli = Cli::parse();
    let isa = match cli.isa {
        IsaArg::Binary => Isa::Binary,
        IsaArg::Ternary => Isa::Ternary,
    };
    let table = match &cli.table {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            OpcodeTable::from_json(isa, &text)?
        }
        None => OpcodeTable::builtin(isa),
    };

    let img = load_hex_image(&cli.input, isa)?;
    let listing = Listing::build(&img, &table);
    let rendered = match cli.format {
        OutputFormat::Text => render_text(&listing, cli.show_words),
        OutputFormat::Json => serde_json::to_string_pretty(&listing)? + "\n",
    };

    if let Some(path) = cli.out {
        std::fs::write(&path, rendered).with_context(|| format!("writing {}", path.display()))?;
    } else {
        print!("{rendered}");
    }
    if listing.undecoded > 0 {
        eprintln!("{} of {} words did not decode", listing.undecoded, listing.words);
    }
    Ok(())
}
