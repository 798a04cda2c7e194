//! Template-driven mnemonic renderer for a Z80 disassembler.

/// Register, register-pair, and index-pair names.
pub mod registers;
pub use registers::{IndexRegisterPair, Register, RegisterPair, REGISTER_COUNT};

/// Accumulator ALU operations and their arity classes.
pub mod alu;
pub use alu::AluOp;

/// Immediate and displacement formatting.
pub mod operand;
pub use operand::{format_displacement, format_imm16, format_imm8, Displacement};

/// Format templates and specifier codes.
pub mod template;
pub use template::{Specifier, Template, Token};

/// Typed argument values and their in-order cursor.
pub mod args;
pub use args::{Arg, ArgCursor, ArgKind, FromArg};

/// Error taxonomy for render failures.
pub mod error;
pub use error::{ErrorClass, RenderError};

/// Bounded scratch buffer for rendered text.
pub mod buffer;
pub use buffer::{OutputBuffer, DEFAULT_CAPACITY};

/// Renderer configuration.
pub mod config;
pub use config::RenderConfig;

/// Rendered-text consumers.
pub mod sink;
pub use sink::{FnSink, OutputSink};

/// Template interpreter.
pub mod render;
pub use render::{render, Renderer, ACCUMULATOR_INFIX};

/// Opcode decoder for the load, stack, and ALU groups.
pub mod decoder;
pub use decoder::{decode, DecodedInstruction};

/// Linear listing over a byte image.
pub mod disasm;
pub use disasm::{disassemble, disassemble_one, disassemble_to, DisassemblyRow, ListingOptions};

#[cfg(test)]
use proptest as _;
