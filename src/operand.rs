//! Operand parsing and per-format operand encoders.
//!
//! Every encoder returns the operand bits already shifted into place; the
//! dispatcher only ORs in the opcode.

use serde::Serialize;

use crate::error::LineError;
use crate::ternary;
use crate::Layout;

/// How an immediate field is represented in the word. Always placed at bit 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImmKind {
    /// Plain binary, `[0, 2^bits - 1]`.
    Unsigned { bits: u32 },
    /// Two's complement, `[-2^(bits-1), 2^(bits-1) - 1]`.
    Signed { bits: u32 },
    /// Balanced ternary, two bits per trit.
    Trits { count: u32 },
}

impl ImmKind {
    /// Width of the field in bits.
    pub const fn bits(self) -> u32 {
        match self {
            ImmKind::Unsigned { bits } | ImmKind::Signed { bits } => bits,
            ImmKind::Trits { count } => count * 2,
        }
    }

    pub const fn mask(self) -> u32 {
        (1 << self.bits()) - 1
    }

    /// Inclusive value domain.
    pub fn range(self) -> (i64, i64) {
        match self {
            ImmKind::Unsigned { bits } => (0, (1i64 << bits) - 1),
            ImmKind::Signed { bits } => (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1),
            ImmKind::Trits { count } => {
                let max = ternary::max_magnitude(count);
                (-max, max)
            }
        }
    }

    pub fn encode(self, value: i64) -> Result<u32, LineError> {
        let (min, max) = self.range();
        if value < min || value > max {
            return Err(LineError::ImmediateOutOfRange { value, min, max });
        }
        match self {
            ImmKind::Unsigned { .. } => Ok(value as u32),
            ImmKind::Signed { bits } => Ok(twos_complement(value, bits)),
            ImmKind::Trits { count } => ternary::encode(value, count),
        }
    }

    /// Value held by an already-extracted field. `None` for bit patterns the
    /// representation cannot produce.
    pub fn decode(self, field: u32) -> Option<i64> {
        let field = field & self.mask();
        match self {
            ImmKind::Unsigned { .. } => Some(field as i64),
            ImmKind::Signed { bits } => Some(sign_extend(field, bits)),
            ImmKind::Trits { count } => ternary::decode(field, count),
        }
    }
}

/// Operand fields of a format class, resolved for one ISA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    None,
    RegReg,
    RegImm(ImmKind),
    RegRegImm(ImmKind),
}

impl Shape {
    /// Number of operand tokens after the mnemonic.
    pub const fn arity(self) -> usize {
        match self {
            Shape::None => 0,
            Shape::RegReg | Shape::RegImm(_) => 2,
            Shape::RegRegImm(_) => 3,
        }
    }

    /// Bits this shape may set below the opcode field.
    pub const fn used_bits(self, layout: &Layout) -> u32 {
        let a = layout.reg_mask() << layout.reg_a_shift;
        let b = layout.reg_mask() << layout.reg_b_shift;
        match self {
            Shape::None => 0,
            Shape::RegReg => a | b,
            Shape::RegImm(kind) => a | kind.mask(),
            Shape::RegRegImm(kind) => a | b | kind.mask(),
        }
    }
}

/// Low `bits` bits of `value` in two's complement.
pub fn twos_complement(value: i64, bits: u32) -> u32 {
    value.rem_euclid(1i64 << bits) as u32
}

pub fn sign_extend(field: u32, bits: u32) -> i64 {
    let s = 64 - bits;
    ((field as i64) << s) >> s
}

/// `R3` style register token. The prefix letter is not checked beyond being a
/// letter.
pub fn parse_register(token: &str, layout: &Layout) -> Result<u32, LineError> {
    let malformed = || LineError::MalformedRegister {
        token: token.to_string(),
    };
    let mut chars = token.chars();
    let prefix = chars.next().ok_or_else(malformed)?;
    let digits = chars.as_str();
    if !prefix.is_ascii_alphabetic() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let index: u32 = digits.parse().map_err(|_| malformed())?;
    if index > layout.max_register {
        return Err(LineError::RegisterOutOfRange {
            token: token.to_string(),
            max: layout.max_register,
        });
    }
    Ok(index)
}

/// Decimal or `0x` hex literal with an optional sign. With `hex_fallback`, a
/// token that is not decimal but is all hex digits is read as hex.
pub fn parse_immediate(token: &str, hex_fallback: bool) -> Result<i64, LineError> {
    let malformed = || LineError::MalformedLiteral {
        token: token.to_string(),
    };
    let (negative, body) = match token.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, token.strip_prefix('+').unwrap_or(token)),
    };
    let all = |s: &str, f: fn(&u8) -> bool| !s.is_empty() && s.as_bytes().iter().all(f);

    let magnitude = if let Some(hex) = body.strip_prefix("0x").or_else(|| body.strip_prefix("0X")) {
        if !all(hex, u8::is_ascii_hexdigit) {
            return Err(malformed());
        }
        i64::from_str_radix(hex, 16)
    } else if all(body, u8::is_ascii_digit) {
        body.parse::<i64>()
    } else if hex_fallback && all(body, u8::is_ascii_hexdigit) {
        i64::from_str_radix(body, 16)
    } else {
        return Err(malformed());
    };
    let magnitude = magnitude.map_err(|_| malformed())?;
    Ok(if negative { -magnitude } else { magnitude })
}

// Format-class encoders

pub fn no_operand() -> u32 {
    0
}

pub fn reg_reg(a: &str, b: &str, layout: &Layout) -> Result<u32, LineError> {
    let ra = parse_register(a, layout)?;
    let rb = parse_register(b, layout)?;
    Ok((ra << layout.reg_a_shift) | (rb << layout.reg_b_shift))
}

/// Register plus immediate: covers the unsigned, signed, big/small ternary and
/// branch-offset classes, which differ only in `kind`.
pub fn reg_imm(reg: &str, imm: &str, kind: ImmKind, layout: &Layout) -> Result<u32, LineError> {
    let ra = parse_register(reg, layout)?;
    let value = parse_immediate(imm, layout.hex_fallback)?;
    Ok((ra << layout.reg_a_shift) | kind.encode(value)?)
}

pub fn mem_offset(a: &str, b: &str, offset: &str, kind: ImmKind, layout: &Layout) -> Result<u32, LineError> {
    let ra = parse_register(a, layout)?;
    let rb = parse_register(b, layout)?;
    let value = parse_immediate(offset, layout.hex_fallback)?;
    Ok((ra << layout.reg_a_shift) | (rb << layout.reg_b_shift) | kind.encode(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Isa;

    #[test]
    fn registers_binary() {
        let l = Isa::Binary.layout();
        for i in 0..=7u32 {
            assert_eq!(parse_register(&format!("R{i}"), l).unwrap(), i);
        }
        assert!(matches!(parse_register("R8", l), Err(LineError::RegisterOutOfRange { max: 7, .. })));
        assert!(matches!(parse_register("R9", l), Err(LineError::RegisterOutOfRange { .. })));
    }

    #[test]
    fn registers_ternary() {
        let l = Isa::Ternary.layout();
        for i in 0..=8u32 {
            assert_eq!(parse_register(&format!("r{i}"), l).unwrap(), i);
        }
        assert!(parse_register("R9", l).is_err());
    }

    #[test]
    fn malformed_registers() {
        let l = Isa::Binary.layout();
        for tok in ["", "R", "1", "R-1", "Rx", "R1a", "R99999999999"] {
            assert!(
                matches!(parse_register(tok, l), Err(LineError::MalformedRegister { .. })),
                "{tok}"
            );
        }
    }

    #[test]
    fn immediates() {
        assert_eq!(parse_immediate("10", false).unwrap(), 10);
        assert_eq!(parse_immediate("-128", false).unwrap(), -128);
        assert_eq!(parse_immediate("0x1F", false).unwrap(), 31);
        assert_eq!(parse_immediate("-0x10", false).unwrap(), -16);
        assert_eq!(parse_immediate("+7", false).unwrap(), 7);
        assert!(parse_immediate("ff", false).is_err());
        assert_eq!(parse_immediate("ff", true).unwrap(), 255);
        // decimal wins over the hex fallback
        assert_eq!(parse_immediate("10", true).unwrap(), 10);
        assert!(parse_immediate("0x", true).is_err());
        assert!(parse_immediate("0x-5", true).is_err());
        assert!(parse_immediate("-", true).is_err());
    }

    #[test]
    fn signed_round_trip() {
        for v in -128..=127i64 {
            let enc = twos_complement(v, 8);
            assert!(enc <= 0xFF);
            assert_eq!(sign_extend(enc, 8), v);
        }
        assert_eq!(twos_complement(-1, 8), 0xFF);
        assert_eq!(twos_complement(-128, 8), 0x80);
    }

    #[test]
    fn imm_kind_bounds() {
        let u8k = ImmKind::Unsigned { bits: 8 };
        assert_eq!(u8k.encode(255).unwrap(), 255);
        assert!(u8k.encode(256).is_err());
        assert!(u8k.encode(-1).is_err());

        let s8 = ImmKind::Signed { bits: 8 };
        assert_eq!(s8.encode(127).unwrap(), 0x7F);
        assert_eq!(s8.encode(-128).unwrap(), 0x80);
        assert_eq!(
            s8.encode(128),
            Err(LineError::ImmediateOutOfRange { value: 128, min: -128, max: 127 })
        );
        assert!(s8.encode(-129).is_err());

        let t4 = ImmKind::Trits { count: 4 };
        assert!(t4.encode(40).is_ok());
        assert!(t4.encode(-40).is_ok());
        assert!(t4.encode(41).is_err());
        assert!(t4.encode(-41).is_err());
        assert_eq!(t4.bits(), 8);
    }

    #[test]
    fn encoders_place_fields() {
        let l = Isa::Binary.layout();
        assert_eq!(reg_reg("R1", "R2", l).unwrap(), (1 << 8) | (2 << 5));
        assert_eq!(
            reg_imm("R1", "10", ImmKind::Unsigned { bits: 8 }, l).unwrap(),
            (1 << 8) | 10
        );
        assert_eq!(
            mem_offset("R7", "R3", "31", ImmKind::Unsigned { bits: 5 }, l).unwrap(),
            (7 << 8) | (3 << 5) | 31
        );
        assert_eq!(no_operand(), 0);
    }
}
