//! Linear disassembly listings.
//!
//! Walks a byte image from the start, decoding and rendering one instruction
//! per row. Bytes that do not decode are emitted as single-byte `.db` rows so
//! the walk always makes progress.

use log::debug;

use crate::args::Arg;
use crate::config::RenderConfig;
use crate::decoder::decode;
use crate::error::RenderError;
use crate::render::Renderer;
use crate::sink::OutputSink;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Template for bytes that are not decoded as instructions.
const DATA_BYTE_TEMPLATE: &str = ".db N";

/// A single disassembled listing row.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisassemblyRow {
    /// Address of the first byte, relative to the listing origin.
    pub addr: u16,
    /// Raw encoded bytes, prefix included.
    pub bytes: Vec<u8>,
    /// Rendered assembly text.
    pub text: String,
    /// Whether this row is an undecoded data byte.
    pub is_data: bool,
}

/// Listing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ListingOptions {
    /// Address assigned to offset zero of the image.
    pub origin: u16,
    /// Maximum number of rows to produce; `None` walks the whole image.
    pub max_rows: Option<usize>,
    /// Renderer configuration.
    pub render: RenderConfig,
}

/// Disassembles the instruction at `offset`.
///
/// Returns `Ok(None)` when `offset` is past the end of `memory`.
///
/// # Errors
///
/// Returns [`RenderError`] if the rendered text does not fit the configured
/// buffer.
pub fn disassemble_one(
    memory: &[u8],
    offset: usize,
    options: &ListingOptions,
) -> Result<Option<DisassemblyRow>, RenderError> {
    let Some(tail) = memory.get(offset..).filter(|tail| !tail.is_empty()) else {
        return Ok(None);
    };
    let renderer = Renderer::new(options.render);
    let addr = row_address(options.origin, offset);

    if let Some(instr) = decode(tail) {
        let text = instr.render(&renderer)?;
        return Ok(Some(DisassemblyRow {
            addr,
            bytes: tail[..instr.len].to_vec(),
            text,
            is_data: false,
        }));
    }

    let byte = tail[0];
    debug!("no decoding for byte 0x{byte:02x} at 0x{addr:04x}, emitting data");
    let text = renderer.render(DATA_BYTE_TEMPLATE, &[Arg::Imm8(byte)])?;
    Ok(Some(DisassemblyRow {
        addr,
        bytes: vec![byte],
        text,
        is_data: true,
    }))
}

/// Disassembles `memory` from its first byte.
///
/// # Errors
///
/// Returns the first [`RenderError`] encountered; rows produced before it are
/// discarded.
pub fn disassemble(
    memory: &[u8],
    options: &ListingOptions,
) -> Result<Vec<DisassemblyRow>, RenderError> {
    let mut rows = Vec::new();
    let mut offset = 0;

    while options.max_rows.is_none_or(|max| rows.len() < max) {
        let Some(row) = disassemble_one(memory, offset, options)? else {
            break;
        };
        offset += row.bytes.len();
        rows.push(row);
    }

    Ok(rows)
}

/// Disassembles `memory` and delivers each row's text to `sink` in order.
///
/// Returns the number of rows delivered. Rows rendered before an error have
/// already reached the sink; the failing row never does.
///
/// # Errors
///
/// Returns the first [`RenderError`] encountered.
pub fn disassemble_to<S: OutputSink + ?Sized>(
    memory: &[u8],
    options: &ListingOptions,
    sink: &mut S,
) -> Result<usize, RenderError> {
    let mut offset = 0;
    let mut delivered = 0;

    while options.max_rows.is_none_or(|max| delivered < max) {
        let Some(row) = disassemble_one(memory, offset, options)? else {
            break;
        };
        sink.on_output(&row.text);
        offset += row.bytes.len();
        delivered += 1;
    }

    Ok(delivered)
}

fn row_address(origin: u16, offset: usize) -> u16 {
    // Addresses wrap at 64 KiB like the Z80 program counter.
    let low = u16::try_from(offset & 0xFFFF).unwrap_or_default();
    origin.wrapping_add(low)
}
