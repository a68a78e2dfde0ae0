//! Comparison and boolean words.
//!
//! `eq`, `gt` and `lt` use the value order (byte-wise for Scalars); `==`,
//! `>` and `<` compare numerically. Results are the canonical booleans.

use std::cmp::Ordering;

use super::Word;
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[
    ("eq", eq),
    ("gt", gt),
    ("lt", lt),
    ("==", num_eq),
    (">", num_gt),
    ("<", num_lt),
    ("and", and),
    ("&&", and),
    ("or", or),
    ("||", or),
];

/// Pops `b` then `a` and orders `a` against `b`.
fn order(interp: &mut Interpreter) -> Ordering {
    let b = interp.machine.pop();
    let a = interp.machine.pop();
    interp.machine.heap.compare(a, b)
}

fn num_order(interp: &mut Interpreter) -> Option<Ordering> {
    let b = interp.machine.pop_real();
    let a = interp.machine.pop_real();
    a.partial_cmp(&b)
}

fn eq(interp: &mut Interpreter) -> Status {
    let r = order(interp) == Ordering::Equal;
    interp.put_bool(r);
    Status::Ok
}

fn gt(interp: &mut Interpreter) -> Status {
    let r = order(interp) == Ordering::Greater;
    interp.put_bool(r);
    Status::Ok
}

fn lt(interp: &mut Interpreter) -> Status {
    let r = order(interp) == Ordering::Less;
    interp.put_bool(r);
    Status::Ok
}

fn num_eq(interp: &mut Interpreter) -> Status {
    let r = num_order(interp) == Some(Ordering::Equal);
    interp.put_bool(r);
    Status::Ok
}

fn num_gt(interp: &mut Interpreter) -> Status {
    let r = num_order(interp) == Some(Ordering::Greater);
    interp.put_bool(r);
    Status::Ok
}

fn num_lt(interp: &mut Interpreter) -> Status {
    let r = num_order(interp) == Some(Ordering::Less);
    interp.put_bool(r);
    Status::Ok
}

fn and(interp: &mut Interpreter) -> Status {
    let b = interp.machine.pop();
    let a = interp.machine.pop();
    let r = interp.machine.heap.is_true(a) && interp.machine.heap.is_true(b);
    interp.put_bool(r);
    Status::Ok
}

fn or(interp: &mut Interpreter) -> Status {
    let b = interp.machine.pop();
    let a = interp.machine.pop();
    let r = interp.machine.heap.is_true(a) || interp.machine.heap.is_true(b);
    interp.put_bool(r);
    Status::Ok
}
