//! Words over Null-terminated runs of stack values.

use std::cmp::Ordering;

use super::{scalar_operand, Word};
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[
    ("reverse", reverse),
    ("seek", seek),
    ("index", index),
    ("join", join),
    ("enum", enumerate),
];

/// Reverse a list in place, sentinel included.
fn reverse(interp: &mut Interpreter) -> Status {
    let list = interp.machine.pop_list();
    interp.put_null();
    for &v in &list {
        interp.put(v);
    }
    Status::Ok
}

/// `[ list ] value seek`: 1-based position of `value` counting from the
/// top, or 0. The list is consumed.
fn seek(interp: &mut Interpreter) -> Status {
    let needle = interp.machine.pop();
    let list = interp.machine.pop_list();
    let heap = &interp.machine.heap;
    let pos = list
        .iter()
        .position(|&v| heap.compare(v, needle) == Ordering::Equal)
        .map_or(0, |pos| pos + 1);
    interp.put_int(i64::try_from(pos).unwrap_or(0));
    Status::Ok
}

/// `[ list ] n index`: the `n`-th value from the top, or Null. The list
/// is consumed.
fn index(interp: &mut Interpreter) -> Status {
    let n = interp.machine.pop_int();
    let list = interp.machine.pop_list();
    let v = usize::try_from(n)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| list.get(i).copied());
    match v {
        Some(v) => interp.put(v),
        None => interp.put_null(),
    }
    Status::Ok
}

/// `[ list ] glue join`: the texts of the list in push order, glued.
fn join(interp: &mut Interpreter) -> Status {
    let glue = interp.machine.pop();
    let glue = interp.machine.heap.text(glue).to_vec();
    let list = interp.machine.pop_list();
    let heap = &interp.machine.heap;
    let joined = list
        .iter()
        .rev()
        .map(|&v| heap.text(v))
        .collect::<Vec<_>>()
        .join(&glue[..]);
    interp.put_scalar(&joined);
    Status::Ok
}

/// `[ names ] first enum`: bind the deepest name to `first`, the next to
/// `first + 1` and so on.
fn enumerate(interp: &mut Interpreter) -> Status {
    let first = interp.machine.pop_int();
    let list = interp.machine.pop_list();
    let mut n = first;
    for &name in list.iter().rev() {
        let Some(name) = scalar_operand(interp, name) else {
            return Status::Error;
        };
        let v = interp.machine.heap.int(n);
        if let Err(kind) = interp.machine.define(&name, v) {
            interp.machine.fail(kind);
            return Status::Error;
        }
        n = n.wrapping_add(1);
    }
    Status::Ok
}
