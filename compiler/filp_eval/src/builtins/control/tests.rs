use pretty_assertions::assert_eq;

use crate::builtins::tests::{run, stack};
use crate::{Interpreter, Status};

#[test]
fn conditionals() {
    assert_eq!(stack("1 { 'yes' } if"), ["yes"]);
    assert!(stack("0 { 'yes' } if").is_empty());
    assert_eq!(stack("NULL { 'no' } unless"), ["no"]);
    assert_eq!(stack("'' { 'a' } { 'b' } ifelse"), ["a"]);
    assert_eq!(stack("0 { 'a' } { 'b' } ifelse"), ["b"]);
}

#[test]
fn if_passes_break_to_its_caller() {
    assert_eq!(run("1 { break } if 2"), (Status::Break, vec![]));
}

#[test]
fn unless_and_ifelse_pass_break_on() {
    assert_eq!(run("0 { break } unless 'after'").0, Status::Break);
    assert_eq!(run("0 { 1 } { break } ifelse 'after'").0, Status::Break);
    assert_eq!(run("1 { break } { 1 } ifelse 'after'").0, Status::Break);
}

#[test]
fn while_foreach_and_switch_absorb_break() {
    assert_eq!(stack("/n 3 = { $n } { pop break } while 'after'"), ["after"]);
    assert_eq!(stack("[ 1 2 3 { break } foreach 'after'"), ["1", "after"]);
    assert_eq!(stack("[ { 1 } { break } switch 'after'"), ["after"]);
}

#[test]
fn repeat_runs_n_times() {
    assert_eq!(stack("0 3 { 1 + } repeat"), ["3"]);
    assert_eq!(stack("0 -2 { 1 + } repeat"), ["0"]);
}

#[test]
fn loop_until_break() {
    assert_eq!(
        run("0 { dup 1 + dup 5 == { break } if } loop"),
        (
            Status::Ok,
            ["0", "1", "2", "3", "4", "5"].map(String::from).to_vec()
        )
    );
}

#[test]
fn break_leaves_one_loop_only() {
    let src = "2 { 'outer' 3 { 'inner' break } repeat } repeat 'done'";
    assert_eq!(
        stack(src),
        ["outer", "inner", "outer", "inner", "done"]
    );
}

#[test]
fn errors_escape_loops() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.execute("3 { 1 nosuch } repeat 'after'"), Status::Error);
    assert_eq!(interp.depth(), 1);
}

#[test]
fn foreach_starts_next_to_the_sentinel() {
    assert_eq!(stack("[ 1 2 3 { 10 * } foreach"), ["10", "20", "30"]);
    assert!(stack("[ { 10 * } foreach").is_empty());
}

#[test]
fn foreach_values_survive_collection() {
    let src = "[ 'a' 'b' 'c' { 1 2 3 pop pop pop 'x' strcat } foreach";
    assert_eq!(stack(src), ["ax", "bx", "cx"]);
}

#[test]
fn for_counts_inclusively() {
    assert_eq!(stack("1 1 3 { } for"), ["1", "2", "3"]);
    assert_eq!(stack("0 5 12 { } for"), ["0", "5", "10"]);
    assert!(stack("3 1 1 { } for").is_empty());
    assert_eq!(stack("1 1 9 { dup 2 == { break } if } for"), ["1", "2"]);
}

#[test]
fn while_leaves_the_condition_result_to_the_body() {
    let src = "/n 3 = { $n dup 0 == { pop NULL } if } { /n 1 -= } while";
    assert_eq!(stack(src), ["3", "2", "1"]);
}

#[test]
fn switch_runs_the_first_true_branch() {
    let src = "[ { 0 } { 'a' } { 1 } { 'b' } { 1 } { 'c' } switch";
    assert_eq!(stack(src), ["c"]);
    let src = "[ { 1 } { 'a' } { 0 } { 'b' } switch 'end'";
    assert_eq!(stack(src), ["a", "end"]);
    assert_eq!(stack("[ { 0 } { 'a' } switch 'none'"), ["none"]);
}
