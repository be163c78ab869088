use serde::Serialize;

use tri_asm::assembler::format_word;
use tri_asm::decoder::{Decoded, Decoder};
use tri_asm::disasm::fmt_decoded;
use tri_asm::{Isa, OpcodeTable};

use crate::model::Image;

#[derive(Debug, Clone, Serialize)]
pub struct ListingLine {
    pub pc: usize,
    pub word: String,
    /// Source text, or `.word 0x...` when the word does not decode.
    pub text: String,
    pub decoded: Option<Decoded>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub isa: Isa,
    pub words: usize,
    pub undecoded: usize,
    pub lines: Vec<ListingLine>,
}

impl Listing {
    pub fn build(img: &Image, table: &OpcodeTable) -> Self {
        let mut lines = Vec::with_capacity(img.words.len());
        let mut undecoded = 0;
        for (pc, &w) in img.words.iter().enumerate() {
            let decoded = table.decode(w);
            let text = match &decoded {
                Some(d) => fmt_decoded(d),
                None => {
                    undecoded += 1;
                    format!(".word {w:#x}")
                }
            };
            lines.push(ListingLine { pc, word: format_word(w, img.isa), text, decoded });
        }
        Self { isa: img.isa, words: img.words.len(), undecoded, lines }
    }
}

pub fn render_text(listing: &Listing, show_words: bool) -> String {
    let mut out = String::new();
    for l in &listing.lines {
        if show_words {
            out.push_str(&format!("{:3}: {}  {}\n", l.pc, l.word, l.text));
        } else {
            out.push_str(&l.text);
            out.push('\n');
        }
    }
    out
}
