//! End-to-end tests of the filp language through the public API.
//!
//! Each test feeds source text to a fresh interpreter and checks what is
//! left on the stack, the returned status and the pending error.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use std::sync::Arc;

use filp_eval::{ErrorKind, Interpreter, Kind, MemoryLoader, Status};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;

/// The stack from bottom to top as text, emptied.
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

// -- Basic scenarios --

#[test]
fn addition() {
    assert_eq!(run("5 10 +"), (Status::Ok, vec!["15".to_string()]));
}

#[test]
fn symbol_read_back() {
    assert_eq!(run("/x 3 = $x $x *"), (Status::Ok, vec!["9".to_string()]));
}

#[test]
fn array_count() {
    assert_eq!(run("( 1 2 3 ) 0 aget"), (Status::Ok, vec!["3".to_string()]));
}

#[test]
fn loop_with_break() {
    let mut interp = Interpreter::new();
    let status = interp.execute("0 { dup 1 + dup 5 == { break } if } loop");
    assert_eq!(status, Status::Ok);
    assert_eq!(interp.pop_int(), 5);
}

// -- Control flow --

#[test]
fn break_outside_a_loop_reaches_the_host() {
    assert_eq!(run("1 { break } if 2").0, Status::Break);
    assert_eq!(run("end 1"), (Status::End, vec![]));
}

#[test]
fn break_inside_a_user_word_ends_the_word() {
    let src = "/early { 'a' break 'b' } = early 'c'";
    assert_eq!(run(src), (Status::Ok, vec!["a".to_string(), "c".to_string()]));
}

#[test]
fn recursive_words() {
    let src = "/fact { dup 1 > { dup 1 - fact * } if } = 10 fact";
    assert_eq!(run(src).1, ["3628800"]);
}

#[test]
fn deep_recursion_does_not_overflow() {
    let src = "/down { dup 0 > { 1 - down } if } = 5000 down";
    assert_eq!(run(src), (Status::Ok, vec!["0".to_string()]));
}

#[test]
fn nested_loops_and_lists() {
    let src = "
        /total 0 =
        1 1 3 {
            /i # =
            ( 10 20 ) { $i * /total # += } forall
        } for
        $total
    ";
    assert_eq!(run(src).1, ["180"]);
}

// -- Errors --

#[test]
fn errors_stop_the_program_and_are_reported() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.execute("1 2 undefined_word 3"), Status::Error);
    let report = interp.take_error().unwrap();
    assert_eq!(report.kind(), Some(ErrorKind::TokenNotFound));
    assert_eq!(report.info, "undefined_word");
    assert_eq!(drain(&mut interp), ["1", "2"]);
}

#[test]
fn scripts_can_inspect_errors() {
    let src = "{ 1 0 / } eval $filp_error_strings # aget";
    assert_eq!(run(src).1, ["internal error"]);
}

#[test]
fn error_info_is_readable_and_writable() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.execute("bogus"), Status::Error);
    assert_eq!(interp.execute("$filp_error_info"), Status::Ok);
    assert_eq!(interp.pop_string(), "bogus");

    assert_eq!(interp.execute("/filp_error_info 'context' ="), Status::Ok);
    assert_eq!(interp.last_error().unwrap().info, "context");
}

// -- Embedding --

#[test]
fn host_functions_and_variables_together() {
    let calls = Arc::new(Mutex::new(0i64));
    let mut interp = Interpreter::new();
    interp.bind_int("calls", Arc::clone(&calls));
    interp.register_native("square", |i: &mut Interpreter| {
        let n = i.pop_int();
        if i.push_int(n * n).is_err() {
            return Status::Error;
        }
        i.execute("/calls 1 +=")
    });

    assert_eq!(interp.execute("3 square 4 square +"), Status::Ok);
    assert_eq!(interp.pop_int(), 25);
    assert_eq!(*calls.lock(), 2);
}

#[test]
fn host_can_run_stack_values() {
    let mut interp = Interpreter::new();
    assert_eq!(interp.execute("{ 2 * }"), Status::Ok);
    let code = interp.pop();
    assert_eq!(interp.machine().heap.kind(code), Kind::Code);
    interp.push_int(21).unwrap();
    assert_eq!(interp.execute_value(code), Status::Ok);
    assert_eq!(interp.pop_int(), 42);
}

#[test]
fn load_through_a_memory_loader() {
    let loader = MemoryLoader::new()
        .with_file("lib.filp", "#!/usr/bin/filp\n/double { 2 * } =\n'util.filp' load")
        .with_file("util.filp", "/triple { 3 * } =");
    let mut interp = Interpreter::builder().loader(Box::new(loader)).build();

    assert_eq!(interp.execute("'lib.filp' load 5 double triple"), Status::Ok);
    assert_eq!(interp.pop_int(), 30);

    assert_eq!(interp.execute("'absent.filp' load"), Status::Error);
    assert_eq!(
        interp.take_error().unwrap().kind(),
        Some(ErrorKind::FileNotFound)
    );
}

#[test]
fn isolated_interpreters_refuse_to_load() {
    let loader = MemoryLoader::new().with_file("lib.filp", "1");
    let mut interp = Interpreter::builder()
        .loader(Box::new(loader))
        .isolated(true)
        .build();
    assert_eq!(interp.execute("'lib.filp' load"), Status::Error);
    assert_eq!(
        interp.take_error().unwrap().kind(),
        Some(ErrorKind::PermissionDenied)
    );
    assert_eq!(interp.load_exec("lib.filp"), Status::Ok);
}

#[test]
fn instances_share_nothing() {
    let mut first = Interpreter::new();
    let mut second = Interpreter::new();
    first.execute("/shared 1 =");
    assert_eq!(second.execute("/shared defined"), Status::Ok);
    let defined = second.pop();
    assert_eq!(second.machine().heap.kind(defined), Kind::Null);
    assert_eq!(second.depth(), 0);
    assert_eq!(first.depth(), 0);
}

// -- Memory --

#[test]
fn long_programs_keep_memory_bounded() {
    let mut interp = Interpreter::new();
    interp.execute("/acc 0 = 1 1 2000 { /acc # += } for");
    interp.sweep(true);
    let settled = interp.live_values();

    interp.execute("1 1 2000 { /acc # += } for");
    interp.sweep(true);
    assert_eq!(interp.live_values(), settled);

    interp.execute("$acc");
    assert_eq!(interp.pop_int(), 4_002_000);
}
