//! Balanced-ternary packing.
//!
//! Each trit occupies two bits: `-1 => 0b11`, `0 => 0b00`, `+1 => 0b01`.
//! The least significant trit sits in the lowest bit pair. The code `0b10`
//! is unused and never produced.

use serde::{Deserialize, Serialize};

use crate::error::LineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trit {
    Neg,
    Zero,
    Pos,
}

impl Trit {
    pub const fn value(self) -> i64 {
        match self {
            Trit::Neg => -1,
            Trit::Zero => 0,
            Trit::Pos => 1,
        }
    }

    pub const fn bits(self) -> u32 {
        match self {
            Trit::Neg => 0b11,
            Trit::Zero => 0b00,
            Trit::Pos => 0b01,
        }
    }

    pub const fn from_bits(bits: u32) -> Option<Trit> {
        match bits & 0b11 {
            0b11 => Some(Trit::Neg),
            0b00 => Some(Trit::Zero),
            0b01 => Some(Trit::Pos),
            _ => None,
        }
    }

    pub const fn negate(self) -> Trit {
        match self {
            Trit::Neg => Trit::Pos,
            Trit::Zero => Trit::Zero,
            Trit::Pos => Trit::Neg,
        }
    }

    /// Least significant trit of `v` (via `v mod 3`).
    fn low_trit(v: i64) -> Trit {
        match v.rem_euclid(3) {
            0 => Trit::Zero,
            1 => Trit::Pos,
            _ => Trit::Neg,
        }
    }
}

/// Largest magnitude representable with `num_trits` trits: `(3^N - 1) / 2`.
pub fn max_magnitude(num_trits: u32) -> i64 {
    (3i64.pow(num_trits) - 1) / 2
}

/// Mask covering the `2 * num_trits` bits of a packed field.
pub const fn field_mask(num_trits: u32) -> u32 {
    (1u32 << (num_trits * 2)) - 1
}

fn check_range(value: i64, num_trits: u32) -> Result<(), LineError> {
    let max = max_magnitude(num_trits);
    if value < -max || value > max {
        return Err(LineError::ImmediateOutOfRange {
            value,
            min: -max,
            max,
        });
    }
    Ok(())
}

/// Pack `value` into `num_trits` trits, two bits per trit, masked to `2N` bits.
pub fn encode(value: i64, num_trits: u32) -> Result<u32, LineError> {
    check_range(value, num_trits)?;
    let mut rest = value;
    let mut packed = 0u32;
    for i in 0..num_trits {
        let t = Trit::low_trit(rest);
        rest = (rest - t.value()) / 3;
        packed |= t.bits() << (2 * i);
    }
    debug_assert_eq!(rest, 0);
    Ok(packed & field_mask(num_trits))
}

/// Trits of `value`, most significant first, without leading zeros. Zero yields
/// an empty sequence.
///
/// Expands the magnitude digit by digit (a remainder of 2 becomes `-1` with a
/// carry) and negates every trit when the value is negative.
pub fn trits(value: i64) -> Vec<Trit> {
    let negative = value < 0;
    let mut magnitude = value.unsigned_abs();
    let mut out = Vec::new();
    while magnitude > 0 {
        let t = match magnitude % 3 {
            2 => {
                magnitude = (magnitude + 1) / 3;
                Trit::Neg
            }
            1 => {
                magnitude /= 3;
                Trit::Pos
            }
            _ => {
                magnitude /= 3;
                Trit::Zero
            }
        };
        out.push(if negative { t.negate() } else { t });
    }
    out.reverse();
    out
}

/// Same packing as [`encode`], derived by rendering the digit expansion as a
/// binary string and reading it back.
pub fn encode_by_expansion(value: i64, num_trits: u32) -> Result<u32, LineError> {
    check_range(value, num_trits)?;
    let digits = trits(value);
    if digits.is_empty() {
        return Ok(0);
    }
    let rendered: String = digits.iter().map(|t| format!("{:02b}", t.bits())).collect();
    let packed = u32::from_str_radix(&rendered, 2).map_err(|_| LineError::MalformedLiteral {
        token: rendered.clone(),
    })?;
    Ok(packed & field_mask(num_trits))
}

/// Inverse of [`encode`]. `None` if any bit pair holds the unused code `0b10`.
pub fn decode(packed: u32, num_trits: u32) -> Option<i64> {
    let mut value = 0i64;
    for i in (0..num_trits).rev() {
        let t = Trit::from_bits(packed >> (2 * i))?;
        value = value * 3 + t.value();
    }
    Some(value)
}
