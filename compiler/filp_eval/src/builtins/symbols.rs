//! Symbol management and explicit execution.

use filp_core::Symbol;

use super::{scalar_operand, Word};
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[
    ("set", set),
    ("def", set),
    ("=", set),
    ("unset", unset),
    ("undef", unset),
    ("defined", defined),
    ("type", type_of),
    ("val", val),
    ("exec", exec),
    ("eval", eval),
    ("symbol", symbol),
];

/// `name value set`. The symbol takes on the kind of the value, so
/// binding Code makes the name a word.
fn set(interp: &mut Interpreter) -> Status {
    let value = interp.machine.pop();
    let name = interp.machine.pop();
    let Some(name) = scalar_operand(interp, name) else {
        return Status::Error;
    };
    match interp.machine.define(&name, value) {
        Ok(_) => Status::Ok,
        Err(kind) => {
            interp.machine.fail(kind);
            Status::Error
        }
    }
}

fn unset(interp: &mut Interpreter) -> Status {
    let name = interp.machine.pop();
    let Some(name) = scalar_operand(interp, name) else {
        return Status::Error;
    };
    if let Some(id) = interp.machine.find_symbol(&name) {
        interp.machine.destroy_symbol(id);
    }
    Status::Ok
}

fn defined(interp: &mut Interpreter) -> Status {
    let v = interp.machine.pop();
    let name = interp.machine.heap.text(v).to_vec();
    let found = interp.machine.find_symbol(&name).is_some();
    interp.put_bool(found);
    Status::Ok
}

/// Kind name of the symbol the operand names, or of the operand itself.
fn type_of(interp: &mut Interpreter) -> Status {
    let machine = &mut interp.machine;
    let v = machine.pop();
    let name = machine.heap.text(v).to_vec();
    let kind = machine
        .find_symbol(&name)
        .and_then(|id| machine.symbols.get(id).map(Symbol::kind))
        .unwrap_or_else(|| machine.heap.kind(v));
    interp.put_scalar(kind.name().as_bytes());
    Status::Ok
}

fn val(interp: &mut Interpreter) -> Status {
    let v = interp.machine.pop();
    let name = interp.machine.heap.text(v).to_vec();
    if let Err(overflow) = interp.machine.push_symbol_value(&name) {
        tracing::debug!(%overflow, "value dropped");
    }
    Status::Ok
}

fn exec(interp: &mut Interpreter) -> Status {
    let v = interp.machine.pop();
    interp.execute_value(v)
}

/// Run the operand and push the error code it left, clearing it. Never
/// fails. Isolation entered inside ends with it.
fn eval(interp: &mut Interpreter) -> Status {
    let v = interp.machine.pop();
    let isolated = interp.machine.flags.isolated;
    interp.machine.diagnostics.clear();

    let status = interp.execute_value(v);
    tracing::trace!(?status, "eval finished");

    let code = interp.machine.diagnostics.code();
    interp.put_int(code);
    interp.machine.diagnostics.clear();
    interp.machine.flags.isolated = isolated;
    Status::Ok
}

/// Push the names starting with a prefix as a Null-terminated list.
fn symbol(interp: &mut Interpreter) -> Status {
    let v = interp.machine.pop();
    let prefix = interp.machine.heap.text(v).to_vec();
    if let Err(overflow) = interp.machine.push_dict(&prefix) {
        tracing::debug!(%overflow, "symbol list truncated");
    }
    Status::Ok
}
