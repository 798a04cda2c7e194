//! Template interpreter that turns a format template and its typed argument
//! list into the text of one instruction.
//!
//! The template is scanned once, left to right. Literal characters are copied
//! through; each specifier pulls its values from the argument list in order:
//!
//! | Code | Consumes                              | Emits                          |
//! |------|---------------------------------------|--------------------------------|
//! | `A`  | [`AluOp`]                             | mnemonic, plus `" a,"` for `add`/`adc`/`sbc` |
//! | `R`  | [`Register`], [`IndexRegisterPair`], [`Displacement`] | register name or `(ix±d)` |
//! | `P`  | [`RegisterPair`]                      | pair name                      |
//! | `N`  | `u8`                                  | `0x` + 2 hex digits            |
//! | `W`  | `u16`                                 | `0x` + 4 hex digits            |
//!
//! Text reaches an [`OutputSink`] only after the whole template rendered and
//! every argument was consumed.

use log::{debug, trace};

use crate::alu::AluOp;
use crate::args::{Arg, ArgCursor};
use crate::buffer::OutputBuffer;
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::operand::{format_imm16, format_imm8, Displacement};
use crate::registers::{IndexRegisterPair, Register, RegisterPair};
use crate::sink::OutputSink;
use crate::template::{Specifier, Template, Token};

/// Suffix that makes the implicit accumulator explicit for two-operand ALU
/// mnemonics.
pub const ACCUMULATOR_INFIX: &str = " a,";

/// Stateless instruction renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Creates a renderer with the given configuration.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> RenderConfig {
        self.config
    }

    /// Renders one instruction and returns its text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::CapacityExceeded`] when the text does not fit the
    /// configured buffer, or a shape error when `args` does not match the
    /// specifiers of `template` exactly.
    pub fn render<'t>(
        &self,
        template: impl Into<Template<'t>>,
        args: &[Arg],
    ) -> Result<String, RenderError> {
        let template = template.into();
        let mut out = OutputBuffer::with_capacity(self.config.capacity);
        let mut cursor = ArgCursor::new(args);

        let result = template
            .tokens()
            .try_for_each(|token| emit_token(&mut out, &mut cursor, token))
            .and_then(|()| cursor.finish());

        match result {
            Ok(()) => {
                let text = out.finish();
                trace!("rendered {template:?} -> {text:?}");
                Ok(text)
            }
            Err(err) => {
                debug!("failed to render {template:?} with {} args: {err}", args.len());
                Err(err)
            }
        }
    }

    /// Renders one instruction and hands the finished text to `sink`.
    ///
    /// The sink is called exactly once on success and not at all on error.
    ///
    /// # Errors
    ///
    /// Same as [`Renderer::render`].
    pub fn render_to<'t, S: OutputSink + ?Sized>(
        &self,
        template: impl Into<Template<'t>>,
        args: &[Arg],
        sink: &mut S,
    ) -> Result<(), RenderError> {
        let text = self.render(template, args)?;
        sink.on_output(&text);
        Ok(())
    }
}

/// Renders with the default configuration.
///
/// # Errors
///
/// See [`Renderer::render`].
pub fn render<'t>(template: impl Into<Template<'t>>, args: &[Arg]) -> Result<String, RenderError> {
    Renderer::default().render(template, args)
}

fn emit_token(
    out: &mut OutputBuffer,
    args: &mut ArgCursor<'_>,
    token: Token,
) -> Result<(), RenderError> {
    match token {
        Token::Literal(c) => out.push(c),
        Token::Specifier(specifier) => emit_specifier(out, args, specifier),
    }
}

fn emit_specifier(
    out: &mut OutputBuffer,
    args: &mut ArgCursor<'_>,
    specifier: Specifier,
) -> Result<(), RenderError> {
    match specifier {
        Specifier::Alu => {
            let op: AluOp = args.take(specifier)?;
            out.push_str(op.mnemonic())?;
            if op.is_two_operand() {
                out.push_str(ACCUMULATOR_INFIX)?;
            }
            Ok(())
        }
        Specifier::Register => {
            let reg: Register = args.take(specifier)?;
            let index: IndexRegisterPair = args.take(specifier)?;
            let disp: Displacement = args.take(specifier)?;
            emit_register(out, reg, index, disp)
        }
        Specifier::RegisterPair => {
            let pair: RegisterPair = args.take(specifier)?;
            out.push_str(pair.name())
        }
        Specifier::Imm8 => {
            let n: u8 = args.take(specifier)?;
            out.push_str(&format_imm8(n))
        }
        Specifier::Imm16 => {
            let nn: u16 = args.take(specifier)?;
            out.push_str(&format_imm16(nn))
        }
    }
}

fn emit_register(
    out: &mut OutputBuffer,
    reg: Register,
    index: IndexRegisterPair,
    disp: Displacement,
) -> Result<(), RenderError> {
    if !reg.is_at_hl() || !index.is_indexed() {
        return out.push_str(reg.name());
    }
    out.push('(')?;
    out.push_str(index.name())?;
    out.push(disp.sign())?;
    out.push_str(&disp.magnitude().to_string())?;
    out.push(')')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn reg(r: Register) -> [Arg; 3] {
        Arg::plain_register(r)
    }

    #[test]
    fn add_makes_accumulator_explicit() {
        let args = [[Arg::Alu(AluOp::Add)].as_slice(), reg(Register::B).as_slice()].concat();
        assert_eq!(render("AR", &args).as_deref(), Ok("add a,b"));
    }

    #[test]
    fn cp_keeps_accumulator_implicit() {
        let args = [[Arg::Alu(AluOp::Cp)].as_slice(), reg(Register::A).as_slice()].concat();
        assert_eq!(render("A R", &args).as_deref(), Ok("cp a"));
    }

    #[rstest]
    #[case(AluOp::Add, "add a,0x10")]
    #[case(AluOp::Adc, "adc a,0x10")]
    #[case(AluOp::Sub, "sub 0x10")]
    #[case(AluOp::Sbc, "sbc a,0x10")]
    #[case(AluOp::And, "and 0x10")]
    #[case(AluOp::Xor, "xor 0x10")]
    #[case(AluOp::Or, "or 0x10")]
    #[case(AluOp::Cp, "cp 0x10")]
    fn alu_immediate_forms(#[case] op: AluOp, #[case] expected: &str) {
        let template = if op.is_two_operand() { "AN" } else { "A N" };
        let args = [Arg::Alu(op), Arg::Imm8(0x10)];
        assert_eq!(render(template, &args).as_deref(), Ok(expected));
    }

    #[rstest]
    #[case(IndexRegisterPair::Ix, -5, "(ix-5)")]
    #[case(IndexRegisterPair::Iy, 0, "(iy+0)")]
    #[case(IndexRegisterPair::Ix, 127, "(ix+127)")]
    #[case(IndexRegisterPair::Iy, -128, "(iy-128)")]
    fn indexed_memory_reference(
        #[case] index: IndexRegisterPair,
        #[case] disp: i8,
        #[case] expected: &str,
    ) {
        let args = Arg::register(Register::AtHl, index, Displacement::new(disp));
        assert_eq!(render("R", &args).as_deref(), Ok(expected));
    }

    #[test]
    fn hl_index_keeps_plain_memory_operand() {
        let args = Arg::register(
            Register::AtHl,
            IndexRegisterPair::Hl,
            Displacement::new(-5),
        );
        assert_eq!(render("R", &args).as_deref(), Ok("(hl)"));
    }

    #[test]
    fn non_memory_register_ignores_index_and_displacement() {
        let args = Arg::register(Register::H, IndexRegisterPair::Ix, Displacement::new(9));
        assert_eq!(render("R", &args).as_deref(), Ok("h"));
    }

    #[test]
    fn register_pair_is_never_index_substituted() {
        assert_eq!(
            render("push P", &[Arg::RegisterPair(RegisterPair::De)]).as_deref(),
            Ok("push de")
        );
        assert_eq!(
            render("P", &[Arg::RegisterPair(RegisterPair::Hl)]).as_deref(),
            Ok("hl")
        );
    }

    #[test]
    fn immediates_are_fixed_width() {
        assert_eq!(render("N", &[Arg::Imm8(0x1f)]).as_deref(), Ok("0x1f"));
        assert_eq!(render("W", &[Arg::Imm16(0xbeef)]).as_deref(), Ok("0xbeef"));
        assert_eq!(
            render("ld P,W", &[Arg::RegisterPair(RegisterPair::Sp), Arg::Imm16(0)]).as_deref(),
            Ok("ld sp,0x0000")
        );
    }

    #[test]
    fn literal_only_template_needs_no_arguments() {
        assert_eq!(render("nop", &[]).as_deref(), Ok("nop"));
        assert_eq!(render("", &[]).as_deref(), Ok(""));
    }

    #[test]
    fn mixed_template_consumes_in_order() {
        let args = [
            Arg::register(Register::AtHl, IndexRegisterPair::Iy, Displacement::new(3)).as_slice(),
            [Arg::Imm8(0x7f)].as_slice(),
        ]
        .concat();
        assert_eq!(render("ld R,N", &args).as_deref(), Ok("ld (iy+3),0x7f"));
    }

    #[test]
    fn wrong_argument_type_is_reported() {
        let err = render("R", &[Arg::Imm8(1)]).expect_err("imm8 is not a register");
        assert_eq!(
            err,
            RenderError::ArgumentMismatch {
                specifier: Specifier::Register,
                position: 0,
                expected: crate::args::ArgKind::Register,
                found: crate::args::ArgKind::Imm8,
            }
        );
    }

    #[test]
    fn short_register_triplet_is_reported() {
        let args = [Arg::Register(Register::B), Arg::IndexPair(IndexRegisterPair::Hl)];
        assert_eq!(
            render("R", &args),
            Err(RenderError::MissingArgument {
                specifier: Specifier::Register,
                position: 2,
            })
        );
    }

    #[test]
    fn extra_arguments_are_reported() {
        assert_eq!(
            render("nop", &[Arg::Imm8(0)]),
            Err(RenderError::UnconsumedArguments { remaining: 1 })
        );
    }

    #[test]
    fn overflow_is_an_error_not_a_truncation() {
        let renderer = Renderer::new(RenderConfig::default().with_capacity(8));
        assert_eq!(
            renderer.render("ld W", &[Arg::Imm16(0x1234)]),
            Err(RenderError::CapacityExceeded { capacity: 8 })
        );
        assert_eq!(
            renderer.render("ld N", &[Arg::Imm8(0x12)]).as_deref(),
            Ok("ld 0x12")
        );
    }

    #[test]
    fn unbounded_config_renders_long_templates() {
        let template = "x".repeat(100);
        let renderer = Renderer::new(RenderConfig::unbounded());
        assert_eq!(renderer.render(template.as_str(), &[]), Ok(template.clone()));
        assert!(render(template.as_str(), &[]).is_err());
    }

    #[test]
    fn sink_sees_full_text_exactly_once() {
        let mut sink: Vec<String> = Vec::new();
        let args = [[Arg::Alu(AluOp::Sbc)].as_slice(), reg(Register::C).as_slice()].concat();
        Renderer::default()
            .render_to("AR", &args, &mut sink)
            .expect("sbc a,c renders");
        assert_eq!(sink, ["sbc a,c"]);
    }

    #[test]
    fn sink_is_not_called_on_failure() {
        let mut calls = 0;
        let mut sink = crate::sink::FnSink(|_: &str| calls += 1);
        let renderer = Renderer::new(RenderConfig::default().with_capacity(4));
        assert!(renderer
            .render_to("W", &[Arg::Imm16(0xffff)], &mut sink)
            .is_err());
        assert!(renderer.render_to("N", &[], &mut sink).is_err());
        drop(sink);
        assert_eq!(calls, 0);
    }
}
