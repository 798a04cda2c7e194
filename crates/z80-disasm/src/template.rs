//! Format templates: literal text interleaved with typed operand specifiers.

use std::fmt;

/// Operand specifier character recognised inside a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Specifier {
    /// `A`: ALU mnemonic, with `" a,"` appended for two-operand forms.
    Alu,
    /// `R`: register triplet (register, index pair, displacement).
    Register,
    /// `P`: register pair, never index-substituted.
    RegisterPair,
    /// `N`: 8-bit immediate.
    Imm8,
    /// `W`: 16-bit immediate.
    Imm16,
}

impl Specifier {
    /// Maps a template character to its specifier, or `None` for literals.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Self::Alu),
            'R' => Some(Self::Register),
            'P' => Some(Self::RegisterPair),
            'N' => Some(Self::Imm8),
            'W' => Some(Self::Imm16),
            _ => None,
        }
    }

    /// Template character for this specifier.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Alu => 'A',
            Self::Register => 'R',
            Self::RegisterPair => 'P',
            Self::Imm8 => 'N',
            Self::Imm16 => 'W',
        }
    }

    /// Number of argument values this specifier consumes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Register => 3,
            Self::Alu | Self::RegisterPair | Self::Imm8 | Self::Imm16 => 1,
        }
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.code())
    }
}

/// One scanned template element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Character copied to the output verbatim.
    Literal(char),
    /// Operand slot filled from the argument list.
    Specifier(Specifier),
}

/// Borrowed instruction format template such as `"ld R,N"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Template<'a>(&'a str);

impl<'a> Template<'a> {
    /// Wraps template text. Every character is valid: anything that is not a
    /// specifier code is a literal.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self(text)
    }

    /// Raw template text.
    #[must_use]
    pub const fn as_str(&self) -> &'a str {
        self.0
    }

    /// Scans the template left to right.
    pub fn tokens(&self) -> impl Iterator<Item = Token> + 'a {
        self.0.chars().map(|c| {
            Specifier::from_char(c).map_or(Token::Literal(c), Token::Specifier)
        })
    }

    /// Specifiers in the order they consume arguments.
    pub fn specifiers(&self) -> impl Iterator<Item = Specifier> + 'a {
        self.0.chars().filter_map(Specifier::from_char)
    }

    /// Exact argument-list length this template requires.
    #[must_use]
    pub fn argument_count(&self) -> usize {
        self.specifiers().map(Specifier::arity).sum()
    }
}

impl<'a> From<&'a str> for Template<'a> {
    fn from(text: &'a str) -> Self {
        Self::new(text)
    }
}

impl fmt::Display for Template<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
