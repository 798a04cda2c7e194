//! Property coverage for the template interpreter.

use log as _;
use rstest as _;
#[cfg(feature = "serde")]
use serde as _;
use thiserror as _;

use proptest::prelude::*;
use z80_disasm::{
    decode, render, Arg, AluOp, Displacement, IndexRegisterPair, Register, RegisterPair,
    Renderer, ACCUMULATOR_INFIX,
};

fn alu_op() -> impl Strategy<Value = AluOp> {
    prop::sample::select(AluOp::ALL.to_vec())
}

fn register() -> impl Strategy<Value = Register> {
    prop::sample::select(Register::ALL.to_vec())
}

fn index_pair() -> impl Strategy<Value = IndexRegisterPair> {
    prop::sample::select(IndexRegisterPair::ALL.to_vec())
}

fn register_pair() -> impl Strategy<Value = RegisterPair> {
    prop::sample::select(RegisterPair::ALL.to_vec())
}

fn is_lower_hex(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

proptest! {
    #[test]
    fn imm8_is_prefix_plus_two_lowercase_digits(n in any::<u8>()) {
        let text = render("N", &[Arg::Imm8(n)]).expect("imm8 fits");
        prop_assert_eq!(text.len(), 4);
        prop_assert!(text.starts_with("0x"));
        prop_assert!(is_lower_hex(&text[2..]));
        prop_assert_eq!(u8::from_str_radix(&text[2..], 16).ok(), Some(n));
    }

    #[test]
    fn imm16_is_prefix_plus_four_lowercase_digits(nn in any::<u16>()) {
        let text = render("W", &[Arg::Imm16(nn)]).expect("imm16 fits");
        prop_assert_eq!(text.len(), 6);
        prop_assert!(text.starts_with("0x"));
        prop_assert!(is_lower_hex(&text[2..]));
        prop_assert_eq!(u16::from_str_radix(&text[2..], 16).ok(), Some(nn));
    }

    #[test]
    fn accumulator_infix_iff_two_operand(op in alu_op(), reg in register()) {
        let mut args = vec![Arg::Alu(op)];
        args.extend(Arg::plain_register(reg));
        let text = render("A R", &args).expect("alu form fits");
        prop_assert_eq!(text.contains(ACCUMULATOR_INFIX), op.is_two_operand());
        prop_assert!(text.starts_with(op.mnemonic()));
    }

    #[test]
    fn indexed_branch_iff_at_hl_and_not_hl(
        reg in register(),
        index in index_pair(),
        d in any::<i8>(),
    ) {
        let disp = Displacement::new(d);
        let text = render("R", &Arg::register(reg, index, disp)).expect("register fits");
        if reg == Register::AtHl && index != IndexRegisterPair::Hl {
            let expected = format!("({}{}{})", index.name(), disp.sign(), disp.magnitude());
            prop_assert_eq!(text, expected);
        } else {
            prop_assert_eq!(text, reg.name());
        }
    }

    #[test]
    fn register_pair_ignores_everything_but_the_pair(pair in register_pair()) {
        let text = render("P", &[Arg::RegisterPair(pair)]).expect("pair fits");
        prop_assert_eq!(text, pair.name());
    }

    #[test]
    fn rendering_is_deterministic_and_delivers_once(
        op in alu_op(),
        reg in register(),
        index in index_pair(),
        d in any::<i8>(),
    ) {
        let mut args = vec![Arg::Alu(op)];
        args.extend(Arg::register(reg, index, Displacement::new(d)));
        let renderer = Renderer::default();

        let mut first: Vec<String> = Vec::new();
        let mut second: Vec<String> = Vec::new();
        renderer.render_to("AR", &args, &mut first).expect("fits");
        renderer.render_to("AR", &args, &mut second).expect("fits");
        prop_assert_eq!(first.len(), 1);
        prop_assert_eq!(&first, &second);
    }

    #[test]
    fn decoded_byte_sequences_always_render(bytes in prop::collection::vec(any::<u8>(), 0..6)) {
        if let Some(instr) = decode(&bytes) {
            prop_assert!(instr.len <= bytes.len());
            prop_assert!(instr.render(&Renderer::default()).is_ok());
        }
    }
}
