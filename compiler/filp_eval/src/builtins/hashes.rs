//! Hash words. Keys are Scalars; the hash operand follows the same rules
//! as the array words.

use filp_core::{Kind, HASH_BUCKETS};

use super::{pop_array, scalar_operand, Word};
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[
    ("hash", hash),
    ("hget", hget),
    ("hset", hset),
    ("hdel", hdel),
    ("hdump", hdump),
    ("keys", keys),
    ("values", values),
    ("hsize", hsize),
];

/// `[ key value ... ] hash`
fn hash(interp: &mut Interpreter) -> Status {
    let h = interp.machine.heap.new_hash(HASH_BUCKETS);
    // held while the pairs are popped into it
    interp.machine.heap.retain(h);

    let mut status = Status::Ok;
    loop {
        let v = interp.machine.pop();
        if interp.machine.heap.kind(v) == Kind::Null {
            break;
        }
        let k = interp.machine.pop();
        if interp.machine.heap.kind(k) == Kind::Null {
            break;
        }
        let Some(key) = scalar_operand(interp, k) else {
            interp.machine.pop_list();
            status = Status::Error;
            break;
        };
        interp.machine.heap.hash_set(h, &key, v);
    }

    interp.put(h);
    interp.machine.heap.release(h);
    status
}

/// `hash key hget`: the stored value, or Null.
fn hget(interp: &mut Interpreter) -> Status {
    let k = interp.machine.pop();
    let Some((h, _)) = pop_array(interp, false) else {
        return Status::Error;
    };
    let Some(key) = scalar_operand(interp, k) else {
        return Status::Error;
    };
    match interp.machine.heap.hash_get(h, &key) {
        Some(v) => interp.put(v),
        None => interp.put_null(),
    }
    Status::Ok
}

/// `hash key value hset`
fn hset(interp: &mut Interpreter) -> Status {
    let v = interp.machine.pop();
    let k = interp.machine.pop();
    let Some((h, immediate)) = pop_array(interp, false) else {
        return Status::Error;
    };
    let Some(key) = scalar_operand(interp, k) else {
        return Status::Error;
    };
    interp.machine.heap.hash_set(h, &key, v);
    if immediate {
        interp.put(h);
    }
    Status::Ok
}

/// `hash key hdel`
fn hdel(interp: &mut Interpreter) -> Status {
    let k = interp.machine.pop();
    let Some((h, immediate)) = pop_array(interp, false) else {
        return Status::Error;
    };
    let Some(key) = scalar_operand(interp, k) else {
        return Status::Error;
    };
    interp.machine.heap.hash_del(h, &key);
    if immediate {
        interp.put(h);
    }
    Status::Ok
}

/// Push the pairs as a Null-terminated list, keys and/or values.
fn dump_pairs(interp: &mut Interpreter, with_keys: bool, with_values: bool) -> Status {
    let Some((h, _)) = pop_array(interp, false) else {
        return Status::Error;
    };
    let pairs = interp.machine.heap.hash_pairs(h);
    interp.put_null();
    for (k, v) in pairs {
        if with_keys {
            interp.put(k);
        }
        if with_values {
            interp.put(v);
        }
    }
    Status::Ok
}

fn hdump(interp: &mut Interpreter) -> Status {
    dump_pairs(interp, true, true)
}

fn keys(interp: &mut Interpreter) -> Status {
    dump_pairs(interp, true, false)
}

fn values(interp: &mut Interpreter) -> Status {
    dump_pairs(interp, false, true)
}

fn hsize(interp: &mut Interpreter) -> Status {
    let Some((h, _)) = pop_array(interp, false) else {
        return Status::Error;
    };
    let size = interp.machine.heap.hash_size(h);
    interp.put_int(i64::try_from(size).unwrap_or(i64::MAX));
    Status::Ok
}
