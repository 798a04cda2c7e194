//! Accumulator ALU operations.

use std::fmt;

/// Arithmetic/logic operation selected by bits 5..3 of an ALU opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum AluOp {
    Add = 0,
    Adc = 1,
    Sub = 2,
    Sbc = 3,
    And = 4,
    Xor = 5,
    Or = 6,
    Cp = 7,
}

impl AluOp {
    /// All ALU operations in encoding order.
    pub const ALL: [Self; 8] = [
        Self::Add,
        Self::Adc,
        Self::Sub,
        Self::Sbc,
        Self::And,
        Self::Xor,
        Self::Or,
        Self::Cp,
    ];

    /// Decodes a 3-bit ALU operation field.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Add),
            1 => Some(Self::Adc),
            2 => Some(Self::Sub),
            3 => Some(Self::Sbc),
            4 => Some(Self::And),
            5 => Some(Self::Xor),
            6 => Some(Self::Or),
            7 => Some(Self::Cp),
            _ => None,
        }
    }

    /// Returns the mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Adc => "adc",
            Self::Sub => "sub",
            Self::Sbc => "sbc",
            Self::And => "and",
            Self::Xor => "xor",
            Self::Or => "or",
            Self::Cp => "cp",
        }
    }

    /// Returns true when the accumulator is written out as an explicit first
    /// operand (`add a,b`), false when it stays implicit (`cp b`).
    #[must_use]
    pub const fn is_two_operand(self) -> bool {
        matches!(self, Self::Add | Self::Adc | Self::Sbc)
    }
}

impl fmt::Display for AluOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
