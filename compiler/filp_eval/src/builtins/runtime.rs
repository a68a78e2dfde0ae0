//! Words that reach the interpreter itself rather than the stack.

use filp_core::ErrorKind;

use super::Word;
use crate::{Interpreter, Status};

pub(super) const WORDS: &[(&str, Word)] = &[("sweep", sweep), ("safe", safe), ("load", load)];

fn sweep(interp: &mut Interpreter) -> Status {
    interp.machine.sweep(true);
    Status::Ok
}

/// Enter isolated mode. Inside `eval` this lasts until `eval` returns.
fn safe(interp: &mut Interpreter) -> Status {
    interp.machine.flags.isolated = true;
    Status::Ok
}

/// `name load`: run a program fetched through the host loader.
fn load(interp: &mut Interpreter) -> Status {
    let v = interp.machine.pop();
    let name = String::from_utf8_lossy(interp.machine.heap.text(v)).into_owned();
    if interp.machine.flags.isolated {
        interp
            .machine
            .fail_with(ErrorKind::PermissionDenied, name.as_bytes());
        return Status::Error;
    }
    interp.load_exec(&name)
}
