//! Special variables bound at start-up.

use filp_core::{ErrorKind, IntCell, Register, StringCell, ValueData, ValueId};

use super::Interpreter;

const REGISTERS: [(&str, Register); 7] = [
    ("filp_stack_size", Register::StackSize),
    ("filp_stack_elems", Register::StackElems),
    ("filp_val_account", Register::ValAccount),
    ("filp_sym_account", Register::SymAccount),
    ("filp_real", Register::Real),
    ("filp_bareword", Register::Bareword),
    ("filp_error", Register::Error),
];

pub(super) fn bind(interp: &mut Interpreter, args: &[String]) {
    for (name, register) in REGISTERS {
        interp.bind(name, ValueData::ExtInt(IntCell::Register(register)));
    }
    interp.bind(
        "filp_error_info",
        ValueData::ExtString(StringCell::ErrorInfo),
    );
    interp.bind("filp_version", ValueData::ExtString(StringCell::Version));

    let machine = &mut interp.machine;

    // Indexed by error code.
    let messages: Vec<ValueId> = ErrorKind::ALL
        .iter()
        .map(|kind| machine.heap.scalar(kind.message().as_bytes()))
        .collect();
    let strings = machine.heap.array_from(&messages);

    let argv: Vec<ValueId> = args
        .iter()
        .map(|arg| machine.heap.scalar(arg.as_bytes()))
        .collect();
    let argv = machine.heap.array_from(&argv);

    for (name, v) in [(&b"filp_error_strings"[..], strings), (&b"ARGV"[..], argv)] {
        if let Err(kind) = machine.define(name, v) {
            tracing::debug!(%kind, "special variable not set");
        }
    }
}
