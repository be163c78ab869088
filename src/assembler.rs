use serde::Serialize;
use std::fmt;
use std::io::{self, BufRead, Write};
use tracing::{debug, info, warn};

use crate::config::AsmConfig;
use crate::dispatch::encode_line;
use crate::error::{AsmError, LineError};
use crate::instructions::OpcodeTable;
use crate::tokenizer::{normalize, Line};
use crate::{Isa, Word};

/// Assembled words in program order; index is the program counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramImage {
    isa: Isa,
    capacity: usize,
    words: Vec<Word>,
}

impl ProgramImage {
    pub fn new(isa: Isa, capacity: usize) -> Self {
        Self { isa, capacity, words: Vec::new() }
    }

    /// Append a word, returning its address.
    pub fn push(&mut self, word: Word) -> Result<usize, AsmError> {
        if self.words.len() >= self.capacity {
            return Err(AsmError::CapacityExceeded { capacity: self.capacity });
        }
        self.words.push(word);
        Ok(self.words.len() - 1)
    }

    pub fn isa(&self) -> Isa {
        self.isa
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn hex_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.words.iter().map(move |&w| format_word(w, self.isa))
    }

    /// One zero-padded lower-case hex word per line.
    pub fn write_hex<W: Write>(&self, mut out: W) -> io::Result<()> {
        for line in self.hex_lines() {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    pub fn to_hex_string(&self) -> String {
        self.hex_lines().map(|l| l + "\n").collect()
    }
}

pub fn format_word(word: Word, isa: Isa) -> String {
    format!("{:0width$x}", word, width = isa.hex_digits())
}

/// A skipped line: 1-based source line number, normalized text and reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub text: String,
    pub error: LineError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: error processing '{}': {}", self.line, self.text, self.error)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Assembly {
    pub image: ProgramImage,
    pub diagnostics: Vec<Diagnostic>,
    /// Assembly stopped at a `;;;` line.
    pub terminated: bool,
}

impl Assembly {
    pub fn summary(&self) -> String {
        format!("Successfully assembled {} {} instructions", self.image.len(), self.image.isa())
    }
}

pub struct Assembler {
    config: AsmConfig,
    table: OpcodeTable,
}

impl Assembler {
    /// Assembler using the built-in opcode table of `config.isa`.
    pub fn new(config: AsmConfig) -> Self {
        let table = OpcodeTable::builtin(config.isa);
        Self { config, table }
    }

    /// Custom table; its ISA overrides `config.isa`.
    pub fn with_table(config: AsmConfig, table: OpcodeTable) -> Self {
        let config = AsmConfig { isa: table.isa(), ..config };
        Self { config, table }
    }

    pub fn config(&self) -> &AsmConfig {
        &self.config
    }

    pub fn table(&self) -> &OpcodeTable {
        &self.table
    }

    pub fn assemble<I, S>(&self, lines: I) -> Result<Assembly, AsmError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run(lines.into_iter().map(Ok::<S, io::Error>))
    }

    pub fn assemble_str(&self, source: &str) -> Result<Assembly, AsmError> {
        self.assemble(source.lines())
    }

    /// A read failure is fatal.
    pub fn assemble_reader<R: BufRead>(&self, reader: R) -> Result<Assembly, AsmError> {
        self.run(reader.lines())
    }

    fn run<I, S>(&self, lines: I) -> Result<Assembly, AsmError>
    where
        I: IntoIterator<Item = io::Result<S>>,
        S: AsRef<str>,
    {
        let mut image = ProgramImage::new(self.config.isa, self.config.capacity);
        let mut diagnostics = Vec::new();
        let mut terminated = false;

        for (idx, raw) in lines.into_iter().enumerate() {
            let raw = raw?;
            let lineno = idx + 1;
            let line = match normalize(raw.as_ref()) {
                None => continue,
                Some(Line::Terminator) if self.config.stop_at_terminator => {
                    info!(line = lineno, "terminator reached");
                    terminated = true;
                    break;
                }
                Some(Line::Terminator) => continue,
                Some(Line::Instr(line)) => line,
            };
            match encode_line(&line, &self.table) {
                Ok(word) => {
                    let pc = image.push(word)?;
                    debug!(pc, word = %format_word(word, self.config.isa), text = %line.text(), "encoded");
                }
                Err(error) => {
                    let diag = Diagnostic { line: lineno, text: line.text(), error };
                    warn!("{diag}");
                    diagnostics.push(diag);
                }
            }
        }

        let asm = Assembly { image, diagnostics, terminated };
        info!(words = asm.image.len(), errors = asm.diagnostics.len(), isa = %self.config.isa, "assembly finished");
        Ok(asm)
    }
}

/// Assemble with the built-in table and default settings for `isa`.
pub fn assemble<I, S>(lines: I, isa: Isa) -> Result<Assembly, AsmError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Assembler::new(AsmConfig::new(isa)).assemble(lines)
}
