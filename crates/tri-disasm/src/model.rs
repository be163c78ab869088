use anyhow::{Context, Result};
use std::path::Path;

use tri_asm::{Isa, Word};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub isa: Isa,
    pub words: Vec<Word>,
}

/// One hex word per line; blank lines are ignored.
pub fn parse_hex_image(text: &str, isa: Isa) -> Result<Image> {
    let bits = isa.layout().word_bits;
    let mut words = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let t = line.trim();
        if t.is_empty() {
            continue;
        }
        let w = u32::from_str_radix(t, 16).with_context(|| format!("line {}: bad hex word {t:?}", i + 1))?;
        anyhow::ensure!(w >> bits == 0, "line {}: {t} does not fit a {bits}-bit word", i + 1);
        words.push(w);
    }
    Ok(Image { isa, words })
}

pub fn load_hex_image(path: &Path, isa: Isa) -> Result<Image> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    parse_hex_image(&text, isa)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_words_and_skips_blanks() {
        let img = parse_hex_image("690a\n\nd000\n", Isa::Binary).unwrap();
        assert_eq!(img.words, vec![0x690A, 0xD000]);
    }

    #[test]
    fn rejects_wide_or_bad_words() {
        assert!(parse_hex_image("10000\n", Isa::Binary).is_err());
        assert!(parse_hex_image("3ffff\n", Isa::Ternary).is_ok());
        assert!(parse_hex_image("40000\n", Isa::Ternary).is_err());
        let err = parse_hex_image("0001\nzz\n", Isa::Binary).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn loader_reads_file() {
        let path = std::env::temp_dir().join("_tri_disasm_test.hex");
        std::fs::write(&path, "00010\n3f000\n").unwrap();
        let img = load_hex_image(&path, Isa::Ternary).unwrap();
        assert_eq!(img.words, vec![0x10, 0x3F000]);
        let _ = std::fs::remove_file(&path);
    }
}
