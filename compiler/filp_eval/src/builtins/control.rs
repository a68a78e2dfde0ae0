//! Control flow over deferred blocks.
//!
//! Conditionals pass a Break on to their caller so `{ break } if` can leave
//! an enclosing loop. Every looping word stops at the first non-Ok status
//! of its body and absorbs a Break, so `break` leaves exactly one loop.
//!
//! Blocks that run more than once are held for the whole loop: the
//! collector runs between the tokens of each iteration.

use filp_core::{Kind, ValueId};

use super::Word;
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[
    ("if", if_true),
    ("unless", unless),
    ("ifelse", ifelse),
    ("repeat", repeat),
    ("loop", forever),
    ("foreach", foreach),
    ("for", for_range),
    ("while", while_true),
    ("switch", switch),
];

fn hold(interp: &mut Interpreter, v: ValueId) {
    interp.machine.heap.retain(v);
}

fn drop_hold(interp: &mut Interpreter, v: ValueId) {
    interp.machine.heap.release(v);
}

fn conditional(interp: &mut Interpreter, when: bool) -> Status {
    let code = interp.machine.pop();
    let cond = interp.machine.pop();
    if interp.machine.heap.is_true(cond) == when {
        interp.execute_value(code)
    } else {
        Status::Ok
    }
}

fn if_true(interp: &mut Interpreter) -> Status {
    conditional(interp, true)
}

fn unless(interp: &mut Interpreter) -> Status {
    conditional(interp, false)
}

fn ifelse(interp: &mut Interpreter) -> Status {
    let else_code = interp.machine.pop();
    let if_code = interp.machine.pop();
    let cond = interp.machine.pop();
    if interp.machine.heap.is_true(cond) {
        interp.execute_value(if_code)
    } else {
        interp.execute_value(else_code)
    }
}

/// `n { body } repeat`
fn repeat(interp: &mut Interpreter) -> Status {
    let code = interp.machine.pop();
    let times = interp.machine.pop_int();
    hold(interp, code);
    let mut status = Status::Ok;
    for _ in 0..times.max(0) {
        status = interp.execute_value(code);
        if !status.is_ok() {
            break;
        }
    }
    drop_hold(interp, code);
    status.absorb_break()
}

fn forever(interp: &mut Interpreter) -> Status {
    let code = interp.machine.pop();
    hold(interp, code);
    let status = loop {
        let status = interp.execute_value(code);
        if !status.is_ok() {
            break status;
        }
    };
    drop_hold(interp, code);
    status.absorb_break()
}

/// `[ values... ] { body } foreach`
///
/// The whole list is taken off the stack first. Each value is then pushed
/// and the body run, starting with the value nearest the sentinel.
fn foreach(interp: &mut Interpreter) -> Status {
    let code = interp.machine.pop();
    hold(interp, code);
    let list = interp.machine.pop_list();
    for &v in &list {
        hold(interp, v);
    }

    let mut status = Status::Ok;
    for &v in list.iter().rev() {
        if status.is_ok() {
            interp.put(v);
            status = interp.execute_value(code);
        }
        drop_hold(interp, v);
    }

    drop_hold(interp, code);
    status.absorb_break()
}

/// `from inc to { body } for`: the counter is pushed before each run of
/// the body, up to and including `to`.
fn for_range(interp: &mut Interpreter) -> Status {
    let code = interp.machine.pop();
    let to = interp.machine.pop_int();
    let inc = interp.machine.pop_int();
    let from = interp.machine.pop_int();
    hold(interp, code);

    let mut status = Status::Ok;
    let mut n = from;
    while n <= to {
        interp.put_int(n);
        status = interp.execute_value(code);
        if !status.is_ok() {
            break;
        }
        match n.checked_add(inc) {
            Some(next) => n = next,
            None => break,
        }
    }

    drop_hold(interp, code);
    status.absorb_break()
}

/// `{ cond } { body } while`: the condition's result stays on the stack
/// for the body; a Null result ends the loop.
fn while_true(interp: &mut Interpreter) -> Status {
    let code = interp.machine.pop();
    let cond = interp.machine.pop();
    hold(interp, code);
    hold(interp, cond);

    let status = loop {
        let status = interp.execute_value(cond);
        if !status.is_ok() {
            break status;
        }
        let v = interp.machine.pop();
        if interp.machine.heap.kind(v) == Kind::Null {
            break Status::Ok;
        }
        interp.put(v);
        let status = interp.execute_value(code);
        if !status.is_ok() {
            break status;
        }
    };

    drop_hold(interp, cond);
    drop_hold(interp, code);
    status.absorb_break()
}

/// `[ { cond } { code } ... ] switch`
///
/// Pairs are tried from the top of the stack down. The first condition
/// leaving a true value selects its code; the rest of the list is
/// discarded before that code runs.
fn switch(interp: &mut Interpreter) -> Status {
    let mut status = Status::Ok;
    let mut chosen = None;
    let mut at_sentinel = false;

    loop {
        let code = interp.machine.pop();
        if interp.machine.heap.kind(code) == Kind::Null {
            at_sentinel = true;
            break;
        }
        hold(interp, code);
        let cond = interp.machine.pop();
        status = interp.execute_value(cond);
        if matches!(status, Status::Error | Status::End) {
            drop_hold(interp, code);
            break;
        }
        let v = interp.machine.pop();
        if interp.machine.heap.is_true(v) {
            chosen = Some(code);
            break;
        }
        drop_hold(interp, code);
    }

    if !at_sentinel {
        interp.machine.pop_list();
    }

    if let Some(code) = chosen {
        status = interp.execute_value(code);
        drop_hold(interp, code);
    }
    status.absorb_break()
}

#[cfg(test)]
mod tests;
