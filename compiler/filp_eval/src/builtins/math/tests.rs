use pretty_assertions::assert_eq;

use super::Op;
use crate::builtins::tests::{error_name, stack};

#[test]
fn integer_ops() {
    assert_eq!(Op::Add.int(2, 3), Some(5));
    assert_eq!(Op::Sub.int(2, 3), Some(-1));
    assert_eq!(Op::Mul.int(i64::MAX, 2), Some(-2));
    assert_eq!(Op::Div.int(7, 2), Some(3));
    assert_eq!(Op::Div.int(-7, 2), Some(-3));
    assert_eq!(Op::Mod.int(-7, 3), Some(-1));
    assert_eq!(Op::Div.int(1, 0), None);
    assert_eq!(Op::Mod.int(1, 0), None);
}

#[test]
fn words_and_aliases() {
    assert_eq!(stack("5 10 +"), ["15"]);
    assert_eq!(stack("5 10 add 3 sub"), ["12"]);
    assert_eq!(stack("6 7 * 6 7 mul"), ["42", "42"]);
    assert_eq!(stack("17 5 / 17 5 %"), ["3", "2"]);
    assert_eq!(stack("17 5 div 17 5 mod"), ["3", "2"]);
}

#[test]
fn operands_are_parsed_leniently() {
    assert_eq!(stack("'12abc' 1 +"), ["13"]);
    assert_eq!(stack("0x10 010 +"), ["24"]);
    assert_eq!(stack("'x' 1 +"), ["1"]);
}

#[test]
fn real_mode_spares_modulo() {
    assert_eq!(stack("/filp_real 1 = 1 2 /"), ["0.500000"]);
    assert_eq!(stack("/filp_real 1 = 7 2 %"), ["1"]);
    assert_eq!(stack("/filp_real 1 = 1 0 /"), ["inf"]);
}

#[test]
fn integer_division_by_zero_fails() {
    assert_eq!(error_name("1 0 /"), "INTERNAL_ERROR");
    assert_eq!(error_name("1 0 %"), "INTERNAL_ERROR");
}

#[test]
fn assignment_operators() {
    assert_eq!(stack("/x 10 = /x 5 += $x"), ["15"]);
    assert_eq!(stack("/x 10 = /x 4 -= $x"), ["6"]);
    assert_eq!(stack("/x 10 = /x 3 *= $x"), ["30"]);
    assert_eq!(stack("/x 10 = /x 3 /= $x"), ["3"]);
}

#[test]
fn assignment_to_unknown_names_does_nothing() {
    assert!(stack("/nothing 5 +=").is_empty());
    assert_eq!(stack("/nothing defined"), ["[NULL]"]);
}
