//! Arithmetic.
//!
//! Integer arithmetic wraps. `filp_real` switches every operator but `%`
//! to reals.

use filp_core::{ErrorKind, ValueId};

use super::Word;
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[
    ("add", add),
    ("+", add),
    ("sub", sub),
    ("-", sub),
    ("mul", mul),
    ("*", mul),
    ("div", div),
    ("/", div),
    ("mod", modulo),
    ("%", modulo),
    ("+=", add_assign),
    ("-=", sub_assign),
    ("*=", mul_assign),
    ("/=", div_assign),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl Op {
    /// `None` on division by zero.
    fn int(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Op::Add => Some(a.wrapping_add(b)),
            Op::Sub => Some(a.wrapping_sub(b)),
            Op::Mul => Some(a.wrapping_mul(b)),
            Op::Div => (b != 0).then(|| a.wrapping_div(b)),
            Op::Mod => (b != 0).then(|| a.wrapping_rem(b)),
        }
    }

    fn real(self, a: f64, b: f64) -> f64 {
        match self {
            Op::Add => a + b,
            Op::Sub => a - b,
            Op::Mul => a * b,
            Op::Div => a / b,
            Op::Mod => a % b,
        }
    }
}

/// `a op b` as a new value, in the current mode.
fn apply(interp: &mut Interpreter, op: Op, a: ValueId, b: ValueId) -> Option<ValueId> {
    let machine = &mut interp.machine;
    if machine.flags.real && op != Op::Mod {
        let r = op.real(machine.heap.to_real(a), machine.heap.to_real(b));
        return Some(machine.heap.real(r));
    }
    match op.int(machine.heap.to_int(a), machine.heap.to_int(b)) {
        Some(n) => Some(machine.heap.int(n)),
        None => {
            machine.fail_with(ErrorKind::InternalError, b"division by zero");
            None
        }
    }
}

fn binary(interp: &mut Interpreter, op: Op) -> Status {
    let b = interp.machine.pop();
    let a = interp.machine.pop();
    match apply(interp, op, a, b) {
        Some(r) => {
            interp.put(r);
            Status::Ok
        }
        None => Status::Error,
    }
}

/// `name operand op=`: update a symbol in place. Unknown names are left
/// alone.
fn assign(interp: &mut Interpreter, op: Op) -> Status {
    let operand = interp.machine.pop();
    let name = interp.machine.pop();
    let name = interp.machine.heap.text(name).to_vec();
    let Some(id) = interp.machine.find_symbol(&name) else {
        return Status::Ok;
    };

    let current = interp.machine.symbol_value(id);
    let Some(r) = apply(interp, op, current, operand) else {
        return Status::Error;
    };
    match interp.machine.set_symbol(id, r) {
        Ok(()) => Status::Ok,
        Err(kind) => {
            interp.machine.fail(kind);
            Status::Error
        }
    }
}

fn add(interp: &mut Interpreter) -> Status {
    binary(interp, Op::Add)
}

fn sub(interp: &mut Interpreter) -> Status {
    binary(interp, Op::Sub)
}

fn mul(interp: &mut Interpreter) -> Status {
    binary(interp, Op::Mul)
}

fn div(interp: &mut Interpreter) -> Status {
    binary(interp, Op::Div)
}

fn modulo(interp: &mut Interpreter) -> Status {
    binary(interp, Op::Mod)
}

fn add_assign(interp: &mut Interpreter) -> Status {
    assign(interp, Op::Add)
}

fn sub_assign(interp: &mut Interpreter) -> Status {
    assign(interp, Op::Sub)
}

fn mul_assign(interp: &mut Interpreter) -> Status {
    assign(interp, Op::Mul)
}

fn div_assign(interp: &mut Interpreter) -> Status {
    assign(interp, Op::Div)
}

#[cfg(test)]
mod tests;
