//! Register, register-pair, and index-register-pair identifiers and their
//! canonical lowercase assembly names.

use std::fmt;

/// Number of 8-bit register operand slots addressable by a 3-bit field.
pub const REGISTER_COUNT: usize = 8;

/// 8-bit register operand as encoded in the `r` field of an opcode.
///
/// [`Register::AtHl`] is the memory operand `(hl)`. Under a `DD`/`FD`
/// prefix it becomes an indexed memory reference instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Register {
    B = 0,
    C = 1,
    D = 2,
    E = 3,
    H = 4,
    L = 5,
    AtHl = 6,
    A = 7,
}

impl Register {
    /// All register operands in encoding order.
    pub const ALL: [Self; REGISTER_COUNT] = [
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::H,
        Self::L,
        Self::AtHl,
        Self::A,
    ];

    /// Decodes a 3-bit register field.
    #[must_use]
    pub const fn from_u3(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::B),
            1 => Some(Self::C),
            2 => Some(Self::D),
            3 => Some(Self::E),
            4 => Some(Self::H),
            5 => Some(Self::L),
            6 => Some(Self::AtHl),
            7 => Some(Self::A),
            _ => None,
        }
    }

    /// Returns the canonical assembly name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
            Self::E => "e",
            Self::H => "h",
            Self::L => "l",
            Self::AtHl => "(hl)",
            Self::A => "a",
        }
    }

    /// Returns true for the memory-via-hl operand.
    #[must_use]
    pub const fn is_at_hl(self) -> bool {
        matches!(self, Self::AtHl)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 16-bit register pair as encoded in the `rp` field of an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum RegisterPair {
    Bc = 0,
    De = 1,
    Hl = 2,
    Sp = 3,
}

impl RegisterPair {
    /// All register pairs in encoding order.
    pub const ALL: [Self; 4] = [Self::Bc, Self::De, Self::Hl, Self::Sp];

    /// Decodes a 2-bit register-pair field.
    #[must_use]
    pub const fn from_u2(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Bc),
            1 => Some(Self::De),
            2 => Some(Self::Hl),
            3 => Some(Self::Sp),
            _ => None,
        }
    }

    /// Returns the plain pair name. Never substitutes an index register.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bc => "bc",
            Self::De => "de",
            Self::Hl => "hl",
            Self::Sp => "sp",
        }
    }

    /// Returns the pair name with `hl` replaced by the active index pair.
    #[must_use]
    pub const fn name_with_index(self, index: IndexRegisterPair) -> &'static str {
        match self {
            Self::Hl => index.name(),
            Self::Bc | Self::De | Self::Sp => self.name(),
        }
    }
}

impl fmt::Display for RegisterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selects whether `(hl)` is addressed directly or through `ix`/`iy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum IndexRegisterPair {
    #[default]
    Hl,
    Ix,
    Iy,
}

impl IndexRegisterPair {
    /// All index register pairs.
    pub const ALL: [Self; 3] = [Self::Hl, Self::Ix, Self::Iy];

    /// Maps an opcode prefix byte to the index pair it selects.
    ///
    /// `0xDD` selects `ix`, `0xFD` selects `iy`; any other byte is not an
    /// index prefix.
    #[must_use]
    pub const fn from_prefix(byte: u8) -> Option<Self> {
        match byte {
            0xDD => Some(Self::Ix),
            0xFD => Some(Self::Iy),
            _ => None,
        }
    }

    /// Returns the canonical assembly name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hl => "hl",
            Self::Ix => "ix",
            Self::Iy => "iy",
        }
    }

    /// Returns true when `(hl)` operands are rewritten to indexed references.
    #[must_use]
    pub const fn is_indexed(self) -> bool {
        !matches!(self, Self::Hl)
    }
}

impl fmt::Display for IndexRegisterPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_field_roundtrip_covers_every_slot() {
        for (bits, reg) in (0u8..).zip(Register::ALL) {
            assert_eq!(Register::from_u3(bits), Some(reg));
            assert_eq!(reg as u8, bits);
        }
        assert_eq!(Register::from_u3(8), None);
    }

    #[test]
    fn register_names_are_lowercase_and_unique() {
        let names: Vec<_> = Register::ALL.iter().map(|r| r.name()).collect();
        assert_eq!(names, ["b", "c", "d", "e", "h", "l", "(hl)", "a"]);
        for name in names {
            assert_eq!(name, name.to_lowercase());
        }
    }

    #[test]
    fn only_at_hl_is_memory_operand() {
        let memory: Vec<_> = Register::ALL.into_iter().filter(|r| r.is_at_hl()).collect();
        assert_eq!(memory, [Register::AtHl]);
    }

    #[test]
    fn register_pair_names_ignore_indexing() {
        assert_eq!(RegisterPair::Bc.name(), "bc");
        assert_eq!(RegisterPair::De.name(), "de");
        assert_eq!(RegisterPair::Hl.name(), "hl");
        assert_eq!(RegisterPair::Sp.name(), "sp");
        assert_eq!(RegisterPair::from_u2(4), None);
    }

    #[test]
    fn register_pair_index_substitution_only_touches_hl() {
        assert_eq!(RegisterPair::Hl.name_with_index(IndexRegisterPair::Ix), "ix");
        assert_eq!(RegisterPair::Hl.name_with_index(IndexRegisterPair::Iy), "iy");
        assert_eq!(RegisterPair::Hl.name_with_index(IndexRegisterPair::Hl), "hl");
        for index in IndexRegisterPair::ALL {
            assert_eq!(RegisterPair::Bc.name_with_index(index), "bc");
            assert_eq!(RegisterPair::De.name_with_index(index), "de");
            assert_eq!(RegisterPair::Sp.name_with_index(index), "sp");
        }
    }

    #[test]
    fn index_prefix_mapping() {
        assert_eq!(
            IndexRegisterPair::from_prefix(0xDD),
            Some(IndexRegisterPair::Ix)
        );
        assert_eq!(
            IndexRegisterPair::from_prefix(0xFD),
            Some(IndexRegisterPair::Iy)
        );
        assert_eq!(IndexRegisterPair::from_prefix(0xED), None);
        assert!(!IndexRegisterPair::default().is_indexed());
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(Register::AtHl.to_string(), "(hl)");
        assert_eq!(RegisterPair::Sp.to_string(), "sp");
        assert_eq!(IndexRegisterPair::Iy.to_string(), "iy");
    }
}
