use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tri_asm::config::DEFAULT_CAPACITY;
use tri_asm::{AsmConfig, Assembler, Isa, OpcodeTable};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IsaArg {
    Binary,
    Ternary,
}

impl From<IsaArg> for Isa {
    fn from(a: IsaArg) -> Self {
        match a {
            IsaArg::Binary => Isa::Binary,
            IsaArg::Ternary => Isa::Ternary,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Assembler for the binary and ternary ISAs")]
struct Opts {
    /// Target instruction set
    #[arg(long, value_enum, default_value_t = IsaArg::Binary)]
    isa: IsaArg,
    /// Program name, read from programs/<FILE>.asm
    #[arg(long, default_value = "program")]
    file: String,
    /// Input assembly path (overrides --file)
    #[arg(long)]
    filepath: Option<PathBuf>,
    /// Output hex path
    #[arg(long, default_value = "programs/bin/program.hex")]
    output: PathBuf,
    /// Write hex to stdout instead of --output
    #[arg(long)]
    stdout: bool,
    /// Opcode table JSON (array of { mnemonic, opcode, format })
    #[arg(long, value_name = "FILE")]
    table: Option<PathBuf>,
    /// Dump the opcode table in use as JSON and exit
    #[arg(long)]
    dump_table: bool,
    /// Program image capacity in words
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,
    /// Treat ';;;' as a comment instead of end of program
    #[arg(long)]
    no_terminator: bool,
    /// Write a JSON report of the run (words and skipped lines)
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parse();
    anyhow::ensure!(opts.capacity > 0, "--capacity must be positive");

    let isa = Isa::from(opts.isa);
    let table = match &opts.table {
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            OpcodeTable::from_json(isa, &text).with_context(|| format!("loading table {}", path.display()))?
        }
        None => OpcodeTable::builtin(isa),
    };
    if opts.dump_table {
        println!("{}", table.to_json()?);
        return Ok(());
    }

    let config = AsmConfig {
        isa,
        capacity: opts.capacity,
        stop_at_terminator: !opts.no_terminator,
    };
    let asm = Assembler::with_table(config, table);

    let input = opts
        .filepath
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("programs/{}.asm", opts.file)));
    let file = File::open(&input).with_context(|| format!("opening {}", input.display()))?;
    let result = asm
        .assemble_reader(BufReader::new(file))
        .with_context(|| format!("assembling {}", input.display()))?;

    for diag in &result.diagnostics {
        eprintln!("{diag}");
    }

    if opts.stdout {
        result.image.write_hex(io::stdout().lock())?;
    } else {
        if let Some(dir) = opts.output.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        fs::write(&opts.output, result.image.to_hex_string())
            .with_context(|| format!("writing {}", opts.output.display()))?;
    }

    if let Some(path) = &opts.report {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    eprintln!("{}", result.summary());
    Ok(())
}
