//! Array words.
//!
//! The array operand is either an Array on the stack or the name of an
//! Array symbol (see [`pop_array`]). Mutating words change a named array
//! in place and push an immediate one back.

use filp_core::{Kind, ValueId};

use super::{pop_array, Word};
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[
    (")", array),
    ("array", array),
    ("aget", aget),
    ("@", aget),
    ("aset", aset),
    ("@=", aset),
    ("ains", ains),
    ("adump", adump),
    ("adel", adel),
    ("aseek", aseek),
    ("abseek", abseek),
    ("asort", asort),
    ("forall", forall),
    ("map", map),
];

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// `( values... )`: collect a list into an Array, first pushed first.
fn array(interp: &mut Interpreter) -> Status {
    let n = interp.machine.stack.list_size(&interp.machine.heap);
    let a = interp.machine.heap.dim(n);
    for i in (1..=count(n)).rev() {
        let e = interp.machine.pop();
        if interp.machine.heap.kind(e) == Kind::Null {
            break;
        }
        interp.machine.heap.array_set(a, i, e);
    }
    // the sentinel
    interp.machine.pop();
    interp.put(a);
    Status::Ok
}

/// `array n aget`: element `n`, or the element count for 0.
fn aget(interp: &mut Interpreter) -> Status {
    let n = interp.machine.pop_int();
    let Some((a, _)) = pop_array(interp, false) else {
        return Status::Error;
    };
    if n == 0 {
        let size = interp.machine.heap.array_size(a);
        interp.put_int(count(size));
    } else {
        let v = interp.machine.heap.array_get(a, n);
        interp.put(v);
    }
    Status::Ok
}

fn store(interp: &mut Interpreter, insert: bool) -> Status {
    let v = interp.machine.pop();
    let n = interp.machine.pop_int();
    let Some((a, immediate)) = pop_array(interp, true) else {
        return Status::Error;
    };
    if insert {
        interp.machine.heap.array_insert(a, n, v);
    } else {
        interp.machine.heap.array_set(a, n, v);
    }
    if immediate {
        interp.put(a);
    }
    Status::Ok
}

/// `array n value aset`
fn aset(interp: &mut Interpreter) -> Status {
    store(interp, false)
}

/// `array n value ains`: insert before `n`; 0 appends.
fn ains(interp: &mut Interpreter) -> Status {
    store(interp, true)
}

/// Push the elements as a Null-terminated list.
fn adump(interp: &mut Interpreter) -> Status {
    let Some((a, _)) = pop_array(interp, false) else {
        return Status::Error;
    };
    let elements = interp.machine.heap.elements(a).map(<[ValueId]>::to_vec);
    interp.put_null();
    for v in elements.unwrap_or_default() {
        interp.put(v);
    }
    Status::Ok
}

fn adel(interp: &mut Interpreter) -> Status {
    let n = interp.machine.pop_int();
    let Some((a, immediate)) = pop_array(interp, false) else {
        return Status::Error;
    };
    interp.machine.heap.array_delete(a, n);
    if immediate {
        interp.put(a);
    }
    Status::Ok
}

/// Pops the key, then the array.
fn pop_key_and_array(interp: &mut Interpreter) -> Option<(Vec<u8>, ValueId)> {
    let key = interp.machine.pop();
    let key = interp.machine.heap.text(key).to_vec();
    pop_array(interp, false).map(|(a, _)| (key, a))
}

/// `array key aseek`: subscript of `key`, or 0.
fn aseek(interp: &mut Interpreter) -> Status {
    let Some((key, a)) = pop_key_and_array(interp) else {
        return Status::Error;
    };
    let pos = interp.machine.heap.seek(a, &key, 1);
    interp.put_int(count(pos));
    Status::Ok
}

/// `array key abseek` on a sorted array: subscript of `key`, or the
/// negated subscript it would be inserted at.
fn abseek(interp: &mut Interpreter) -> Status {
    let Some((key, a)) = pop_key_and_array(interp) else {
        return Status::Error;
    };
    let pos = interp.machine.heap.binary_seek(a, &key, 1);
    interp.put_int(pos);
    Status::Ok
}

fn asort(interp: &mut Interpreter) -> Status {
    let Some((a, immediate)) = pop_array(interp, false) else {
        return Status::Error;
    };
    interp.machine.heap.sort(a, 1);
    if immediate {
        interp.put(a);
    }
    Status::Ok
}

/// Run `code` once per non-empty element with the element pushed. With
/// `reassign`, the value the code leaves replaces the element.
fn each(interp: &mut Interpreter, reassign: bool) -> Status {
    let code = interp.machine.pop();
    let Some((a, immediate)) = pop_array(interp, false) else {
        return Status::Error;
    };
    interp.machine.heap.retain(code);
    interp.machine.heap.retain(a);

    let mut status = Status::Ok;
    let mut n = 1;
    while n <= count(interp.machine.heap.array_size(a)) {
        let v = interp.machine.heap.array_get(a, n);
        if interp.machine.heap.kind(v) != Kind::Null {
            interp.put(v);
            status = interp.execute_value(code);
            if !status.is_ok() {
                break;
            }
            if reassign {
                let r = interp.machine.pop();
                interp.machine.heap.array_set(a, n, r);
            }
        }
        n += 1;
    }

    interp.machine.heap.release(a);
    interp.machine.heap.release(code);
    if reassign && immediate {
        interp.put(a);
    }
    status.absorb_break()
}

/// `array { code } forall`
fn forall(interp: &mut Interpreter) -> Status {
    each(interp, false)
}

/// `array { code } map`
fn map(interp: &mut Interpreter) -> Status {
    each(interp, true)
}
