#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn decode(machine: &mut Machine, token: &str) -> String {
    String::from_utf8(double_quoted(machine, token.as_bytes())).unwrap()
}

#[test]
fn single_quotes_are_verbatim() {
    assert_eq!(single_quoted(br"'a\n$x'"), br"a\n$x");
    assert_eq!(single_quoted(b"'unterminated"), b"unterminated");
    assert_eq!(single_quoted(b"''"), b"");
}

#[test]
fn escapes() {
    let mut m = Machine::default();
    assert_eq!(decode(&mut m, r#""a\tb\nc""#), "a\tb\nc");
    assert_eq!(decode(&mut m, r#""\r\a\e""#), "\r\u{7}\u{1b}");
    assert_eq!(decode(&mut m, r#""say \"hi\"""#), "say \"hi\"");
    assert_eq!(decode(&mut m, r#""back\\slash""#), "back\\slash");
    assert_eq!(decode(&mut m, "\"one \\\ntwo\""), "one two");
}

#[test]
fn interpolation() {
    let mut m = Machine::default();
    let v = m.heap.scalar(b"world");
    m.define(b"who", v).unwrap();

    assert_eq!(decode(&mut m, r#""hello $who!""#), "hello world!");
    assert_eq!(decode(&mut m, r#""[$who]""#), "[world]");
    assert_eq!(decode(&mut m, r#""$nobody here""#), " here");
    assert_eq!(decode(&mut m, r#""cost: $5""#), "cost: 5");
}

#[test]
fn null_symbols_interpolate_as_nothing() {
    let mut m = Machine::default();
    m.define(b"empty", ValueId::NULL).unwrap();
    assert_eq!(decode(&mut m, r#""<$empty>""#), "<>");
}

#[test]
fn name_terminator_is_decoded() {
    let mut m = Machine::default();
    let v = m.heap.scalar(b"x");
    m.define(b"a", v).unwrap();
    assert_eq!(decode(&mut m, r#""$a\t$a""#), "x\tx");
}
