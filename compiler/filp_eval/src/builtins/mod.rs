//! The core word library.
//!
//! Each submodule exports a `WORDS` table of `(name, word)` pairs;
//! [`register`] installs all of them as natives. Aliases are separate
//! entries pointing at the same function. A handful of words are defined
//! in filp itself by [`run_prelude`], once the natives they use exist.
//!
//! Words follow one convention: operands are popped in reverse order of
//! how a script pushes them, results are pushed with the `put*` helpers,
//! and a failure sets the error kind and returns [`Status::Error`].

mod arrays;
mod compare;
mod control;
mod dumper;
mod hashes;
mod lists;
mod math;
mod prelude;
mod runtime;
mod stack_ops;
mod strings;
mod symbols;

use filp_core::{ErrorKind, Symbol, ValueData, ValueId};

use crate::{Interpreter, Status};

/// A library word.
pub(crate) type Word = fn(&mut Interpreter) -> Status;

const TABLES: [&[(&str, Word)]; 11] = [
    stack_ops::WORDS,
    symbols::WORDS,
    math::WORDS,
    compare::WORDS,
    control::WORDS,
    lists::WORDS,
    strings::WORDS,
    arrays::WORDS,
    dumper::WORDS,
    hashes::WORDS,
    runtime::WORDS,
];

pub(crate) fn register(interp: &mut Interpreter) {
    for table in TABLES {
        for &(name, word) in table {
            if !interp.register_native(name, word) {
                tracing::debug!(name, "library word shadowed");
            }
        }
    }
}

pub(crate) fn run_prelude(interp: &mut Interpreter) {
    for line in prelude::PRELUDE {
        let status = interp.execute(line);
        if !status.is_ok() {
            tracing::debug!(line, ?status, "prelude line failed");
        }
    }
}

/// Pop the operand of an array or hash word.
///
/// A Scalar names an Array symbol, whose binding is used in place; with
/// `create`, an unknown name is bound to a new empty Array first. An
/// Array is used as is. Returns the array and whether it came from the
/// stack, or `None` with `ARRAY_EXPECTED` set.
pub(crate) fn pop_array(interp: &mut Interpreter, create: bool) -> Option<(ValueId, bool)> {
    let machine = &mut interp.machine;
    let v = machine.pop();

    let found = match machine.heap.data(v) {
        ValueData::Array(_) => Some((v, true)),
        ValueData::Scalar(name) => {
            let name = name.to_vec();
            match machine.find_symbol(&name) {
                Some(id) => machine
                    .symbols
                    .get(id)
                    .map(Symbol::value)
                    .filter(|&a| machine.heap.is_array(a))
                    .map(|a| (a, false)),
                None if create => {
                    let a = machine.heap.dim(0);
                    machine.define(&name, a).ok().map(|_| (a, false))
                }
                None => None,
            }
        }
        _ => None,
    };

    if found.is_none() {
        machine.fail(ErrorKind::ArrayExpected);
    }
    found
}

/// Bytes of a Scalar operand, or `SCALAR_EXPECTED`.
pub(crate) fn scalar_operand(interp: &mut Interpreter, v: ValueId) -> Option<Vec<u8>> {
    let bytes = interp.machine.heap.scalar_bytes(v).map(<[u8]>::to_vec);
    if bytes.is_none() {
        interp.machine.fail(ErrorKind::ScalarExpected);
    }
    bytes
}
