//! Numeric operand formatting: fixed-width immediates and signed index
//! displacements.

use std::fmt;

/// Signed 8-bit offset applied to `ix`/`iy` in indexed memory references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Displacement(i8);

impl Displacement {
    /// Zero displacement, supplied for `R` operands that never index.
    pub const ZERO: Self = Self(0);

    /// Wraps a signed offset.
    #[must_use]
    pub const fn new(value: i8) -> Self {
        Self(value)
    }

    /// Interprets a raw instruction byte as a two's-complement offset.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        Self(i8::from_ne_bytes([byte]))
    }

    /// Returns the signed offset.
    #[must_use]
    pub const fn value(self) -> i8 {
        self.0
    }

    /// `+` for zero and positive offsets, `-` otherwise.
    #[must_use]
    pub const fn sign(self) -> char {
        if self.0 < 0 {
            '-'
        } else {
            '+'
        }
    }

    /// Absolute value of the offset, `0..=128`.
    #[must_use]
    pub const fn magnitude(self) -> u8 {
        self.0.unsigned_abs()
    }
}

impl From<i8> for Displacement {
    fn from(value: i8) -> Self {
        Self(value)
    }
}

impl fmt::Display for Displacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign(), self.magnitude())
    }
}

/// Formats an 8-bit immediate as `0x` plus two lowercase hex digits.
#[must_use]
pub fn format_imm8(value: u8) -> String {
    format!("0x{value:02x}")
}

/// Formats a 16-bit immediate as `0x` plus four lowercase hex digits.
#[must_use]
pub fn format_imm16(value: u16) -> String {
    format!("0x{value:04x}")
}

/// Formats a displacement as its sign followed by its decimal magnitude.
#[must_use]
pub fn format_displacement(disp: Displacement) -> String {
    disp.to_string()
}
