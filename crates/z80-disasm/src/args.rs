//! Typed argument values and the in-order cursor that feeds them to the
//! renderer.

use std::fmt;

use crate::alu::AluOp;
use crate::error::RenderError;
use crate::operand::Displacement;
use crate::registers::{IndexRegisterPair, Register, RegisterPair};
use crate::template::Specifier;

/// One operand value supplied alongside a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum Arg {
    Alu(AluOp),
    Register(Register),
    IndexPair(IndexRegisterPair),
    Displacement(Displacement),
    RegisterPair(RegisterPair),
    Imm8(u8),
    Imm16(u16),
}

/// Type tag of an [`Arg`], used in mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(missing_docs)]
pub enum ArgKind {
    Alu,
    Register,
    IndexPair,
    Displacement,
    RegisterPair,
    Imm8,
    Imm16,
}

impl Arg {
    /// Returns the type tag.
    #[must_use]
    pub const fn kind(self) -> ArgKind {
        match self {
            Self::Alu(_) => ArgKind::Alu,
            Self::Register(_) => ArgKind::Register,
            Self::IndexPair(_) => ArgKind::IndexPair,
            Self::Displacement(_) => ArgKind::Displacement,
            Self::RegisterPair(_) => ArgKind::RegisterPair,
            Self::Imm8(_) => ArgKind::Imm8,
            Self::Imm16(_) => ArgKind::Imm16,
        }
    }

    /// Builds the three values an `R` specifier consumes.
    #[must_use]
    pub const fn register(
        reg: Register,
        index: IndexRegisterPair,
        disp: Displacement,
    ) -> [Self; 3] {
        [
            Self::Register(reg),
            Self::IndexPair(index),
            Self::Displacement(disp),
        ]
    }

    /// `R` values for an operand that is never indexed.
    #[must_use]
    pub const fn plain_register(reg: Register) -> [Self; 3] {
        Self::register(reg, IndexRegisterPair::Hl, Displacement::ZERO)
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Alu => "ALU operation",
            Self::Register => "register",
            Self::IndexPair => "index register pair",
            Self::Displacement => "displacement",
            Self::RegisterPair => "register pair",
            Self::Imm8 => "8-bit immediate",
            Self::Imm16 => "16-bit immediate",
        })
    }
}

/// Conversion from a tagged [`Arg`] back into the concrete operand type.
pub trait FromArg: Sized {
    /// Tag this type is stored under.
    const KIND: ArgKind;

    /// Extracts the value when `arg` carries this type.
    fn from_arg(arg: Arg) -> Option<Self>;
}

macro_rules! impl_from_arg {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromArg for $ty {
                const KIND: ArgKind = ArgKind::$variant;

                fn from_arg(arg: Arg) -> Option<Self> {
                    match arg {
                        Arg::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Arg {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_arg! {
    AluOp => Alu,
    Register => Register,
    IndexRegisterPair => IndexPair,
    Displacement => Displacement,
    RegisterPair => RegisterPair,
    u8 => Imm8,
    u16 => Imm16,
}

/// Forward-only cursor over an argument list. Each value is read once.
#[derive(Debug, Clone)]
pub struct ArgCursor<'a> {
    args: &'a [Arg],
    position: usize,
}

impl<'a> ArgCursor<'a> {
    /// Starts at the first argument.
    #[must_use]
    pub const fn new(args: &'a [Arg]) -> Self {
        Self { args, position: 0 }
    }

    /// Zero-based index of the next argument.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of arguments not yet consumed.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.args.len() - self.position
    }

    /// Consumes the next argument as `T` on behalf of `specifier`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingArgument`] when the list is exhausted and
    /// [`RenderError::ArgumentMismatch`] when the next value has another type.
    /// The cursor does not advance on error.
    pub fn take<T: FromArg>(&mut self, specifier: Specifier) -> Result<T, RenderError> {
        let position = self.position;
        let arg = *self
            .args
            .get(position)
            .ok_or(RenderError::MissingArgument {
                specifier,
                position,
            })?;
        let value = T::from_arg(arg).ok_or(RenderError::ArgumentMismatch {
            specifier,
            position,
            expected: T::KIND,
            found: arg.kind(),
        })?;
        self.position += 1;
        Ok(value)
    }

    /// Checks that every argument was consumed.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnconsumedArguments`] when values are left over.
    pub const fn finish(&self) -> Result<(), RenderError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(RenderError::UnconsumedArguments { remaining }),
        }
    }
}
