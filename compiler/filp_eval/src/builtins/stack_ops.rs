//! Stack manipulation and constants.

use filp_core::ValueData;

use super::Word;
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[
    ("nop", nop),
    ("]", nop),
    ("size", size),
    ("lsize", lsize),
    ("dup", dup),
    ("dupnz", dupnz),
    ("idup", idup),
    ("swap", swap),
    ("xchg", swap),
    ("#", swap),
    ("rot", rot),
    ("pop", pop),
    ("swstack", swstack),
    ("true", push_true),
    ("false", push_false),
    ("NULL", push_null),
    ("[", push_null),
    ("(", push_null),
];

fn nop(_: &mut Interpreter) -> Status {
    Status::Ok
}

/// Byte length of a Scalar or Code, element count of an Array.
fn size(interp: &mut Interpreter) -> Status {
    let v = interp.machine.pop();
    let n = match interp.machine.heap.data(v) {
        ValueData::Scalar(bytes) | ValueData::Code(bytes) => bytes.len(),
        ValueData::Array(elements) => elements.len(),
        _ => 0,
    };
    interp.put_int(i64::try_from(n).unwrap_or(i64::MAX));
    Status::Ok
}

fn lsize(interp: &mut Interpreter) -> Status {
    let n = interp.machine.stack.list_size(&interp.machine.heap);
    interp.put_int(i64::try_from(n).unwrap_or(i64::MAX));
    Status::Ok
}

fn dup(interp: &mut Interpreter) -> Status {
    let v = interp.machine.stack.peek(1);
    interp.put(v);
    Status::Ok
}

fn dupnz(interp: &mut Interpreter) -> Status {
    let v = interp.machine.stack.peek(1);
    if interp.machine.heap.is_true(v) {
        interp.put(v);
    }
    Status::Ok
}

fn idup(interp: &mut Interpreter) -> Status {
    let n = interp.machine.pop_int();
    let v = interp.machine.stack.peek(n);
    interp.put(v);
    Status::Ok
}

fn rotate(interp: &mut Interpreter, n: i64) {
    let machine = &mut interp.machine;
    if let Err(overflow) = machine.stack.rotate(&mut machine.heap, n) {
        tracing::debug!(%overflow, "rotate dropped its value");
    }
}

fn swap(interp: &mut Interpreter) -> Status {
    rotate(interp, 2);
    Status::Ok
}

fn rot(interp: &mut Interpreter) -> Status {
    let n = interp.machine.pop_int();
    rotate(interp, n);
    Status::Ok
}

fn pop(interp: &mut Interpreter) -> Status {
    interp.machine.pop();
    Status::Ok
}

fn swstack(interp: &mut Interpreter) -> Status {
    interp.machine.stack.swap();
    Status::Ok
}

fn push_true(interp: &mut Interpreter) -> Status {
    interp.put_bool(true);
    Status::Ok
}

fn push_false(interp: &mut Interpreter) -> Status {
    interp.put_bool(false);
    Status::Ok
}

fn push_null(interp: &mut Interpreter) -> Status {
    interp.put_null();
    Status::Ok
}
