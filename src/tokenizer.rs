use serde::Serialize;

/// End-of-program sentinel, matched against the whole trimmed line.
pub const TERMINATOR: &str = ";;;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Terminator,
    Instr(SourceLine),
}

/// Whitespace-separated fields of one line; field 0 is the upper-cased mnemonic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    fields: Vec<String>,
}

impl SourceLine {
    pub fn mnemonic(&self) -> &str {
        &self.fields[0]
    }

    pub fn operands(&self) -> &[String] {
        &self.fields[1..]
    }

    /// Normalized text: fields joined by single spaces.
    pub fn text(&self) -> String {
        self.fields.join(" ")
    }
}

/// `None` for blank and comment-only lines.
pub fn normalize(raw: &str) -> Option<Line> {
    if raw.trim() == TERMINATOR {
        return Some(Line::Terminator);
    }
    let code = match raw.find(';') {
        Some(p) => &raw[..p],
        None => raw,
    };
    let code = code.replace(',', "");
    let mut fields: Vec<String> = code.split_whitespace().map(str::to_string).collect();
    let mnemonic = fields.first_mut()?;
    *mnemonic = mnemonic.to_uppercase();
    Some(Line::Instr(SourceLine { fields }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(raw: &str) -> Vec<String> {
        match normalize(raw) {
            Some(Line::Instr(l)) => l.fields,
            other => panic!("expected instruction, got {other:?}"),
        }
    }

    #[test]
    fn blank_and_comments() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("   \t"), None);
        assert_eq!(normalize("; just a comment"), None);
        assert_eq!(normalize("  ,, ; commas only"), None);
    }

    #[test]
    fn terminator_beats_comment() {
        assert_eq!(normalize(";;;"), Some(Line::Terminator));
        assert_eq!(normalize("  ;;;  \n"), Some(Line::Terminator));
        // anything else around it is a comment
        assert_eq!(normalize(";;; done"), None);
        assert_eq!(normalize(";;;;"), None);
    }

    #[test]
    fn splits_fields() {
        assert_eq!(fields("addi R1, 10 ; load ten"), vec!["ADDI", "R1", "10"]);
        assert_eq!(fields("  LOAD\tR1,R2,  3"), vec!["LOAD", "R1R2", "3"]);
        assert_eq!(fields("LOAD R1, R2, 3"), vec!["LOAD", "R1", "R2", "3"]);
        assert_eq!(fields("halt"), vec!["HALT"]);
    }

    #[test]
    fn accessors() {
        let Some(Line::Instr(l)) = normalize("mv r0,  r1") else { panic!() };
        assert_eq!(l.mnemonic(), "MV");
        assert_eq!(l.operands().to_vec(), vec!["r0".to_string(), "r1".to_string()]);
        assert_eq!(l.text(), "MV r0 r1");
    }
}
