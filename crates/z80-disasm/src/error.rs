use thiserror::Error;

use crate::args::ArgKind;
use crate::template::Specifier;

/// Error classes used by callers to pick a recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ErrorClass {
    /// Rendered text did not fit the configured buffer.
    Capacity,
    /// Template and argument list disagree in length or type.
    Shape,
}

/// Render failures. None of these ever deliver partial text to a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum RenderError {
    /// Rendered text would exceed the scratch buffer.
    #[error("rendered text exceeds buffer capacity of {capacity} bytes")]
    CapacityExceeded {
        /// Configured capacity in bytes, terminator included.
        capacity: usize,
    },
    /// Argument list ran out before a specifier was satisfied.
    #[error("specifier {specifier} needs an argument at position {position}, none left")]
    MissingArgument {
        /// Specifier being rendered.
        specifier: Specifier,
        /// Zero-based argument index that was expected.
        position: usize,
    },
    /// Argument at `position` has the wrong type for the specifier.
    #[error("specifier {specifier} expected {expected} at position {position}, found {found}")]
    ArgumentMismatch {
        /// Specifier being rendered.
        specifier: Specifier,
        /// Zero-based argument index.
        position: usize,
        /// Kind the specifier required.
        expected: ArgKind,
        /// Kind actually supplied.
        found: ArgKind,
    },
    /// Template finished with arguments left over.
    #[error("{remaining} argument(s) left unconsumed by the template")]
    UnconsumedArguments {
        /// Number of arguments never read.
        remaining: usize,
    },
}

impl RenderError {
    /// Returns the error class.
    #[must_use]
    pub const fn class(self) -> ErrorClass {
        match self {
            Self::CapacityExceeded { .. } => ErrorClass::Capacity,
            Self::MissingArgument { .. }
            | Self::ArgumentMismatch { .. }
            | Self::UnconsumedArguments { .. } => ErrorClass::Shape,
        }
    }
}
