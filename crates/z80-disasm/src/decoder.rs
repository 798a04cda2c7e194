//! Opcode decoder producing render templates and argument lists.
//!
//! Covers the load, stack, and 8-bit ALU groups of the base opcode table plus
//! their `DD`/`FD` indexed forms:
//!
//! - `nop`, `halt`
//! - `ld r,r'`, `ld r,n`, `ld rp,nn`
//! - `push`/`pop` of `bc`, `de`, `hl`, `af`
//! - ALU `r` and ALU `n`
//! - `(ix+d)`/`(iy+d)` forms of the above, plus `ld ix,nn` and `push`/`pop ix`
//!
//! Other opcodes decode to `None`; so do prefixed opcodes without an
//! `(hl)` operand and byte sequences cut short.

use crate::alu::AluOp;
use crate::args::Arg;
use crate::error::RenderError;
use crate::operand::Displacement;
use crate::registers::{IndexRegisterPair, Register, RegisterPair};
use crate::render::Renderer;

/// One decoded instruction, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Render template.
    pub template: &'static str,
    /// Arguments in the order `template` consumes them.
    pub args: Vec<Arg>,
    /// Encoded length in bytes, prefix included.
    pub len: usize,
}

impl DecodedInstruction {
    const fn new(template: &'static str, args: Vec<Arg>, len: usize) -> Self {
        Self {
            template,
            args,
            len,
        }
    }

    /// Renders this instruction.
    ///
    /// # Errors
    ///
    /// Propagates [`RenderError`] from the renderer.
    pub fn render(&self, renderer: &Renderer) -> Result<String, RenderError> {
        renderer.render(self.template, &self.args)
    }
}

/// Opcode fields, `xx yyy zzz` with `yyy = pp q`.
#[derive(Debug, Clone, Copy)]
struct Fields {
    x: u8,
    y: u8,
    z: u8,
    p: u8,
    q: u8,
}

impl Fields {
    const fn split(op: u8) -> Self {
        let y = (op >> 3) & 0x7;
        Self {
            x: op >> 6,
            y,
            z: op & 0x7,
            p: y >> 1,
            q: y & 0x1,
        }
    }
}

/// Decodes the instruction at the start of `bytes`.
#[must_use]
pub fn decode(bytes: &[u8]) -> Option<DecodedInstruction> {
    let first = *bytes.first()?;
    match IndexRegisterPair::from_prefix(first) {
        Some(index) => decode_indexed(index, &bytes[1..]).map(|mut instr| {
            instr.len += 1;
            instr
        }),
        None => decode_base(bytes),
    }
}

fn decode_base(bytes: &[u8]) -> Option<DecodedInstruction> {
    let op = *bytes.first()?;
    let f = Fields::split(op);
    let reg = |bits: u8| Register::from_u3(bits).map(Arg::plain_register);

    match (f.x, f.z) {
        (0, 0) if f.y == 0 => Some(DecodedInstruction::new("nop", Vec::new(), 1)),
        (0, 1) if f.q == 0 => {
            let nn = read_u16(bytes, 1)?;
            Some(DecodedInstruction::new(
                "ld P,W",
                vec![Arg::RegisterPair(RegisterPair::from_u2(f.p)?), Arg::Imm16(nn)],
                3,
            ))
        }
        (0, 6) => {
            let n = *bytes.get(1)?;
            let mut args = reg(f.y)?.to_vec();
            args.push(Arg::Imm8(n));
            Some(DecodedInstruction::new("ld R,N", args, 2))
        }
        (1, _) if op == 0x76 => Some(DecodedInstruction::new("halt", Vec::new(), 1)),
        (1, _) => {
            let args = [reg(f.y)?, reg(f.z)?].concat();
            Some(DecodedInstruction::new("ld R,R", args, 1))
        }
        (2, _) => {
            let alu = AluOp::from_u3(f.y)?;
            let args = [[Arg::Alu(alu)].as_slice(), reg(f.z)?.as_slice()].concat();
            Some(DecodedInstruction::new(alu_template(alu, 'R'), args, 1))
        }
        (3, 6) => {
            let alu = AluOp::from_u3(f.y)?;
            let n = *bytes.get(1)?;
            Some(DecodedInstruction::new(
                alu_template(alu, 'N'),
                vec![Arg::Alu(alu), Arg::Imm8(n)],
                2,
            ))
        }
        (3, 1) if f.q == 0 => stack_op("pop P", "pop af", f.p),
        (3, 5) if f.q == 0 => stack_op("push P", "push af", f.p),
        _ => None,
    }
}

fn decode_indexed(index: IndexRegisterPair, bytes: &[u8]) -> Option<DecodedInstruction> {
    let op = *bytes.first()?;
    let f = Fields::split(op);
    let indexed = |disp: Displacement| Arg::register(Register::AtHl, index, disp);
    let plain = |bits: u8| Register::from_u3(bits).map(Arg::plain_register);
    let disp = || bytes.get(1).copied().map(Displacement::from_byte);

    match (f.x, f.z) {
        (0, 1) if f.q == 0 && f.p == 2 => {
            let nn = read_u16(bytes, 1)?;
            let template = match index {
                IndexRegisterPair::Ix => "ld ix,W",
                IndexRegisterPair::Iy => "ld iy,W",
                IndexRegisterPair::Hl => return None,
            };
            Some(DecodedInstruction::new(template, vec![Arg::Imm16(nn)], 3))
        }
        (0, 6) if f.y == 6 => {
            let d = disp()?;
            let n = *bytes.get(2)?;
            let mut args = indexed(d).to_vec();
            args.push(Arg::Imm8(n));
            Some(DecodedInstruction::new("ld R,N", args, 3))
        }
        (1, _) if op == 0x76 => None,
        (1, 6) => {
            let args = [plain(f.y)?, indexed(disp()?)].concat();
            Some(DecodedInstruction::new("ld R,R", args, 2))
        }
        (1, _) if f.y == 6 => {
            let args = [indexed(disp()?), plain(f.z)?].concat();
            Some(DecodedInstruction::new("ld R,R", args, 2))
        }
        (2, 6) => {
            let alu = AluOp::from_u3(f.y)?;
            let args = [[Arg::Alu(alu)].as_slice(), indexed(disp()?).as_slice()].concat();
            Some(DecodedInstruction::new(alu_template(alu, 'R'), args, 2))
        }
        (3, 1) if f.q == 0 && f.p == 2 => indexed_stack_op(index, false),
        (3, 5) if f.q == 0 && f.p == 2 => indexed_stack_op(index, true),
        _ => None,
    }
}

/// Two-operand ALU forms attach their operand directly after the `" a,"`
/// infix; one-operand forms need a separating space.
const fn alu_template(alu: AluOp, operand: char) -> &'static str {
    match (alu.is_two_operand(), operand) {
        (true, 'R') => "AR",
        (false, 'R') => "A R",
        (true, _) => "AN",
        (false, _) => "A N",
    }
}

fn stack_op(
    pair_template: &'static str,
    af_template: &'static str,
    p: u8,
) -> Option<DecodedInstruction> {
    if p == 3 {
        return Some(DecodedInstruction::new(af_template, Vec::new(), 1));
    }
    let pair = RegisterPair::from_u2(p)?;
    Some(DecodedInstruction::new(
        pair_template,
        vec![Arg::RegisterPair(pair)],
        1,
    ))
}

fn indexed_stack_op(index: IndexRegisterPair, push: bool) -> Option<DecodedInstruction> {
    let template = match (push, index) {
        (true, IndexRegisterPair::Ix) => "push ix",
        (true, IndexRegisterPair::Iy) => "push iy",
        (false, IndexRegisterPair::Ix) => "pop ix",
        (false, IndexRegisterPair::Iy) => "pop iy",
        (_, IndexRegisterPair::Hl) => return None,
    };
    Some(DecodedInstruction::new(template, Vec::new(), 1))
}

fn read_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let lo = *bytes.get(at)?;
    let hi = *bytes.get(at + 1)?;
    Some(u16::from_le_bytes([lo, hi]))
}
