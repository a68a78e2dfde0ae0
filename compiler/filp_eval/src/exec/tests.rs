#![allow(clippy::unwrap_used, clippy::expect_used)]

use filp_core::Kind;
use pretty_assertions::assert_eq;

use crate::{Interpreter, Status};

use super::{is_numeric_looking, is_whole_comment};

fn drain(interp: &mut Interpreter) -> Vec<String> {
    let mut values = Vec::new();
    while interp.depth() > 0 {
        values.push(interp.pop_string());
    }
    values.reverse();
    values
}

fn run(src: &str) -> (Status, Vec<String>) {
    let mut interp = Interpreter::new();
    let status = interp.execute(src);
    (status, drain(&mut interp))
}

#[test]
fn numbers_and_words() {
    assert_eq!(run("5 10 +"), (Status::Ok, vec!["15".to_string()]));
    assert_eq!(run("-5 3 +"), (Status::Ok, vec!["-2".to_string()]));
}

#[test]
fn comments_nest_and_self_close() {
    assert_eq!(run("1 /* 2 3 */ 4").1, ["1", "4"]);
    assert_eq!(run("1 /* a /* b */ c */ 2").1, ["1", "2"]);
    assert_eq!(run("1 /*x*/ 2").1, ["1", "2"]);
    assert_eq!(run("*/ 1").1, ["1"]);
}

#[test]
fn comment_token_shapes() {
    assert!(is_whole_comment(b"/*x*/"));
    assert!(is_whole_comment(b"/**/"));
    assert!(!is_whole_comment(b"/*/"));
    assert!(is_numeric_looking(b"12"));
    assert!(is_numeric_looking(b"-x"));
    assert!(!is_numeric_looking(b"x1"));
}

#[test]
fn outer_block_becomes_code() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.execute("{ dup  { 1 } }"), Status::Ok);
    let top = interp.peek(1);
    assert_eq!(interp.machine.heap.kind(top), Kind::Code);
    assert_eq!(interp.pop_string(), "dup { 1 }");
}

#[test]
fn unmatched_close_brace_ends_the_call() {
    assert_eq!(run("1 } 2"), (Status::Ok, vec!["1".to_string()]));
}

#[test]
fn shebang_line_is_skipped() {
    assert_eq!(run("#!/usr/bin/filp -x\n1 2 +").1, ["3"]);
    assert_eq!(run("#!/usr/bin/filp"), (Status::Ok, vec![]));
}

#[test]
fn unknown_word_is_an_error() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.execute("1 frobnicate 2"), Status::Error);
    let report = interp.take_error().unwrap();
    assert_eq!(report.name, "TOKEN_NOT_FOUND");
    assert_eq!(report.info, "frobnicate");
    assert_eq!(drain(&mut interp), ["1"]);
}

#[test]
fn barewords_are_pushed_when_enabled() {
    let mut interp = Interpreter::builder().barewords(true).build();
    assert_eq!(interp.execute("hello world"), Status::Ok);
    assert_eq!(drain(&mut interp), ["hello", "world"]);
}

#[test]
fn slash_quotes_a_name() {
    assert_eq!(run("/dup /anything").1, ["dup", "anything"]);
}

#[test]
fn dollar_reads_a_symbol() {
    assert_eq!(run("/x 4 = $x $missing").1, ["4", "[NULL]"]);
}

#[test]
fn scalar_symbol_name_pushes_itself() {
    assert_eq!(run("/x 5 = x").1, ["x"]);
}

#[test]
fn quoted_literals() {
    assert_eq!(run("'a b' \"c\\td\"").1, ["a b", "c\td"]);
    assert_eq!(run("/n 'world' = \"hello $n\"").1, ["hello world"]);
}

#[test]
fn break_and_end_stop_execution() {
    assert_eq!(run("1 break 2"), (Status::Break, vec!["1".to_string()]));
    assert_eq!(run("1 end 2"), (Status::End, vec!["1".to_string()]));
}

#[test]
fn user_word_contains_its_break() {
    assert_eq!(
        run("/w { 1 break 2 } = w 3"),
        (Status::Ok, vec!["1".to_string(), "3".to_string()])
    );
}

#[test]
fn bound_arrays_survive_incremental_sweeps() {
    let (status, stack) = run("( 1 2 3 ) /a # = 1 2 3 4 5 6 7 8 pop pop pop pop /a 2 aget");
    assert_eq!(status, Status::Ok);
    assert_eq!(stack, ["1", "2", "3", "4", "2"]);
}

#[test]
fn execute_value_runs_scalars_as_source() {
    let mut interp = Interpreter::new();
    interp.push_scalar("2 3 *").unwrap();
    let v = interp.pop();
    assert_eq!(interp.execute_value(v), Status::Ok);
    assert_eq!(interp.pop_int(), 6);

    interp.push_int(1).unwrap();
    let v = interp.pop();
    assert_eq!(interp.execute_value(v), Status::Ok);
    assert_eq!(interp.pop_int(), 1);
}
